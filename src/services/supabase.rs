use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::services::store::{DataStore, Filter, Order, Record, StoreError};

/// Supabase (PostgREST) API client
///
/// Handles all communication with the hosted database including:
/// - Reading filtered and ordered rows
/// - Inserting rows and returning their stored representation
/// - Upserting rows keyed on their primary key
/// - Patching and deleting rows by id
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Map non-success statuses to store errors
    async fn check_status(response: Response, action: &str) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Failed to {}: {} - {}", action, status, body);

        Err(StoreError::ApiError(format!("Failed to {}: {}", action, status)))
    }

    async fn rows(response: Response) -> Result<Vec<Record>, StoreError> {
        let json: Value = response.json().await?;

        let rows = match json {
            Value::Array(rows) => rows,
            _ => return Err(StoreError::InvalidResponse("Expected an array of rows".into())),
        };

        rows.into_iter()
            .map(|row| match row {
                Value::Object(map) => Ok(map),
                other => Err(StoreError::InvalidResponse(format!(
                    "Expected a row object, got {}",
                    other
                ))),
            })
            .collect()
    }
}

/// Build a PostgREST query string from equality filters and an ordering
pub fn build_query(filters: &[Filter], order: Option<&Order>) -> String {
    let mut params = vec!["select=*".to_string()];

    for filter in filters {
        params.push(format!(
            "{}=eq.{}",
            urlencoding::encode(&filter.column),
            urlencoding::encode(&filter.value)
        ));
    }

    if let Some(order) = order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(format!(
            "order={}.{}.nullslast",
            urlencoding::encode(&order.column),
            direction
        ));
    }

    params.join("&")
}

#[async_trait]
impl DataStore for SupabaseClient {
    async fn read(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&Order>,
    ) -> Result<Vec<Record>, StoreError> {
        let url = format!("{}?{}", self.table_url(table), build_query(filters, order));

        tracing::debug!("Reading rows from: {}", url);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::check_status(response, &format!("read {}", table)).await?;
        let rows = Self::rows(response).await?;

        tracing::debug!("Read {} rows from {}", rows.len(), table);

        Ok(rows)
    }

    async fn insert(&self, table: &str, record: Record) -> Result<Record, StoreError> {
        let response = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&Value::Object(record))
            .send()
            .await?;

        let response = Self::check_status(response, &format!("insert into {}", table)).await?;

        Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidResponse(format!("Insert into {} returned no row", table)))
    }

    async fn upsert(&self, table: &str, record: Record) -> Result<Record, StoreError> {
        let response = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&Value::Object(record))
            .send()
            .await?;

        let response = Self::check_status(response, &format!("upsert into {}", table)).await?;

        Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidResponse(format!("Upsert into {} returned no row", table)))
    }

    async fn update(&self, table: &str, id: &str, partial: Record) -> Result<(), StoreError> {
        let url = format!(
            "{}?{}",
            self.table_url(table),
            build_query(&[Filter::eq("id", id)], None)
        );

        let response = self
            .authorized(self.client.patch(&url))
            .header("Prefer", "return=representation")
            .json(&Value::Object(partial))
            .send()
            .await?;

        let response = Self::check_status(response, &format!("update {}", table)).await?;

        if Self::rows(response).await?.is_empty() {
            return Err(StoreError::NotFound(format!("{} row {}", table, id)));
        }

        tracing::debug!("Updated {} row {}", table, id);
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError> {
        let url = format!(
            "{}?{}",
            self.table_url(table),
            build_query(&[Filter::eq("id", id)], None)
        );

        let response = self
            .authorized(self.client.delete(&url))
            .header("Prefer", "return=representation")
            .send()
            .await?;

        let response = Self::check_status(response, &format!("delete from {}", table)).await?;

        Ok(!Self::rows(response).await?.is_empty())
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/rest/v1/", self.base_url.trim_end_matches('/'));

        match self.authorized(self.client.get(&url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Supabase health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> SupabaseClient {
        SupabaseClient::new(server.url(), "test_key".to_string(), 5).unwrap()
    }

    #[test]
    fn test_build_query() {
        let query = build_query(
            &[Filter::eq("user_id", "a b")],
            Some(&Order::desc("created_at")),
        );

        assert_eq!(query, "select=*&user_id=eq.a%20b&order=created_at.desc.nullslast");
    }

    #[tokio::test]
    async fn test_read_sends_filters_and_keys() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/proposals")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("user_id".into(), "eq.u1".into()),
                Matcher::UrlEncoded("order".into(), "created_at.desc.nullslast".into()),
            ]))
            .match_header("apikey", "test_key")
            .match_header("authorization", "Bearer test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"p1","status":"draft"}]"#)
            .create_async()
            .await;

        let store = client_for(&server);
        let rows = store
            .read("proposals", &[Filter::eq("user_id", "u1")], Some(&Order::desc("created_at")))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("id"), Some(&json!("p1")));
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/proposals")
            .match_header("prefer", "return=representation")
            .match_body(Matcher::PartialJson(json!({"status": "draft"})))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"generated","status":"draft"}]"#)
            .create_async()
            .await;

        let store = client_for(&server);
        let mut record = Record::new();
        record.insert("status".to_string(), json!("draft"));

        let stored = store.insert("proposals", record).await.unwrap();

        mock.assert_async().await;
        assert_eq!(stored.get("id"), Some(&json!("generated")));
    }

    #[tokio::test]
    async fn test_upsert_merges_duplicates() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/users")
            .match_header("prefer", "resolution=merge-duplicates,return=representation")
            .match_body(Matcher::PartialJson(json!({"id": "u1", "skills": "Rust"})))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"u1","skills":"Rust","full_name":"Ada"}]"#)
            .create_async()
            .await;

        let store = client_for(&server);
        let mut record = Record::new();
        record.insert("id".to_string(), json!("u1"));
        record.insert("skills".to_string(), json!("Rust"));

        let stored = store.upsert("users", record).await.unwrap();

        mock.assert_async().await;
        assert_eq!(stored.get("full_name"), Some(&json!("Ada")));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/rest/v1/proposals")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.missing".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let store = client_for(&server);
        let result = store.update("proposals", "missing", Record::new()).await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unauthorized_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/clients")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let store = client_for(&server);
        let result = store.read("clients", &[], None).await;

        assert!(matches!(result, Err(StoreError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/rest/v1/tasks")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let store = client_for(&server);
        let result = store.delete("tasks", "t1").await;

        assert!(matches!(result, Err(StoreError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_delete_reports_removed_rows() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/rest/v1/proposals")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.p1".into()))
            .match_header("prefer", "return=representation")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"p1"}]"#)
            .create_async()
            .await;

        let store = client_for(&server);

        assert!(store.delete("proposals", "p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_non_array_body_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/clients")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"not rows"}"#)
            .create_async()
            .await;

        let store = client_for(&server);
        let result = store.read("clients", &[], None).await;

        assert!(matches!(result, Err(StoreError::InvalidResponse(_))));
    }
}
