use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// A database row as a JSON object
pub type Record = Map<String, Value>;

/// Table names used by the service
pub mod tables {
    pub const USERS: &str = "users";
    pub const CLIENTS: &str = "clients";
    pub const PROPOSALS: &str = "proposals";
    pub const TASKS: &str = "tasks";
    pub const PORTFOLIO_ITEMS: &str = "portfolio_items";
}

/// Errors that can occur when talking to the data store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Column equality filter
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Result ordering by one column
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self { column: column.into(), ascending: true }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self { column: column.into(), ascending: false }
    }
}

/// Generic table access used by the service layer
///
/// The matcher and synthesizer never see this; callers load records, run the
/// pure core, and write results back.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Read rows matching every filter, optionally ordered
    async fn read(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&Order>,
    ) -> Result<Vec<Record>, StoreError>;

    /// Insert a row and return it as stored
    async fn insert(&self, table: &str, record: Record) -> Result<Record, StoreError>;

    /// Insert a row, or merge its columns into the existing row with the same `id`
    async fn upsert(&self, table: &str, record: Record) -> Result<Record, StoreError>;

    /// Apply a partial update to the row with the given id
    async fn update(&self, table: &str, id: &str, partial: Record) -> Result<(), StoreError>;

    /// Delete the row with the given id; returns whether a row was removed
    async fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError>;

    async fn health_check(&self) -> bool;
}

/// Convert a typed value into a row object
pub fn to_record<T: Serialize>(value: &T) -> Result<Record, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::InvalidResponse(format!(
            "expected an object, got {}",
            other
        ))),
        Err(e) => Err(StoreError::InvalidResponse(e.to_string())),
    }
}

/// A column's value when it holds a string
pub fn text_column<'a>(record: &'a Record, column: &str) -> Option<&'a str> {
    record.get(column).and_then(Value::as_str)
}

/// Parse a row into a typed value
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(record))
        .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse record: {}", e)))
}
