use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::services::store::{DataStore, Filter, Order, Record, StoreError};

/// In-process table store
///
/// Used for local runs without a hosted database and as the store behind the
/// service tests. Inserted rows get an `id` and `created_at` when missing.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<String, Vec<Record>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load rows into a table as-is, bypassing id generation
    pub async fn seed(&self, table: &str, rows: Vec<Record>) {
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().extend(rows);
    }

    pub async fn len(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }
}

fn column_text(record: &Record, column: &str) -> Option<String> {
    match record.get(column)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn matches_filters(record: &Record, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| column_text(record, &f.column).as_deref() == Some(f.value.as_str()))
}

/// Compare two rows on one column; nulls sort last in both directions
fn compare_rows(a: &Record, b: &Record, order: &Order) -> Ordering {
    match (column_text(a, &order.column), column_text(b, &order.column)) {
        (Some(x), Some(y)) if order.ascending => x.cmp(&y),
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn read(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&Order>,
    ) -> Result<Vec<Record>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Record> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_filters(row, filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = order {
            rows.sort_by(|a, b| compare_rows(a, b, order));
        }

        Ok(rows)
    }

    async fn insert(&self, table: &str, mut record: Record) -> Result<Record, StoreError> {
        if column_text(&record, "id").is_none() {
            record.insert("id".to_string(), Value::String(uuid::Uuid::new_v4().to_string()));
        }
        if column_text(&record, "created_at").is_none() {
            record.insert(
                "created_at".to_string(),
                Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }

        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().push(record.clone());

        Ok(record)
    }

    async fn upsert(&self, table: &str, record: Record) -> Result<Record, StoreError> {
        let Some(id) = column_text(&record, "id") else {
            return self.insert(table, record).await;
        };

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();

        if let Some(row) = rows
            .iter_mut()
            .find(|row| column_text(row, "id").as_deref() == Some(id.as_str()))
        {
            row.extend(record);
            return Ok(row.clone());
        }

        let mut record = record;
        if column_text(&record, "created_at").is_none() {
            record.insert(
                "created_at".to_string(),
                Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        rows.push(record.clone());

        Ok(record)
    }

    async fn update(&self, table: &str, id: &str, partial: Record) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .get_mut(table)
            .and_then(|rows| {
                rows.iter_mut()
                    .find(|row| column_text(row, "id").as_deref() == Some(id))
            })
            .ok_or_else(|| StoreError::NotFound(format!("{} row {}", table, id)))?;

        row.extend(partial);
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(false);
        };

        let before = rows.len();
        rows.retain(|row| column_text(row, "id").as_deref() != Some(id));
        Ok(rows.len() < before)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
