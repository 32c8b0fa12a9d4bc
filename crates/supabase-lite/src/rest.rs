//! Table CRUD over PostgREST.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde_json::Value;

use crate::client::Client;
use crate::error::{parse_body, ServiceError, ServiceResult};
use crate::query::{filters_to_query, Filter, Query};

/// Per-table CRUD contract of the remote data service.
///
/// Rows travel as JSON; typed decoding is left to the caller. Writes use
/// `return=minimal`: the realtime feed delivers the resulting rows.
#[async_trait(?Send)]
pub trait TableApi {
    async fn select(&self, table: &str, query: &Query) -> ServiceResult<Vec<Value>>;

    async fn insert(&self, table: &str, rows: Vec<Value>) -> ServiceResult<()>;

    /// Patch every row matching `filters`. An empty filter list is refused.
    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> ServiceResult<()>;

    /// Insert or merge on primary key.
    async fn upsert(&self, table: &str, rows: Vec<Value>) -> ServiceResult<()>;

    /// Delete every row matching `filters`. An empty filter list is refused.
    async fn delete(&self, table: &str, filters: &[Filter]) -> ServiceResult<()>;
}

impl Client {
    fn table_url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/{}", self.config().rest_url(), table)
        } else {
            format!("{}/{}?{}", self.config().rest_url(), table, query)
        }
    }
}

async fn read_json(response: Response) -> ServiceResult<Value> {
    let status = response.status();
    let body = response.text().await?;
    parse_body(status, &body)
}

fn into_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

#[async_trait(?Send)]
impl TableApi for Client {
    async fn select(&self, table: &str, query: &Query) -> ServiceResult<Vec<Value>> {
        let url = self.table_url(table, &query.to_query_string());
        let response = self
            .authorize(Request::get(&url))
            .header("Accept", "application/json")
            .send()
            .await?;
        Ok(into_rows(read_json(response).await?))
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> ServiceResult<()> {
        let url = self.table_url(table, "");
        let response = self
            .authorize(Request::post(&url))
            .header("Prefer", "return=minimal")
            .json(&rows)?
            .send()
            .await?;
        read_json(response).await.map(|_| ())
    }

    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> ServiceResult<()> {
        if filters.is_empty() {
            return Err(ServiceError::MissingFilter("update"));
        }
        let url = self.table_url(table, &filters_to_query(filters));
        let response = self
            .authorize(Request::patch(&url))
            .header("Prefer", "return=minimal")
            .json(&patch)?
            .send()
            .await?;
        read_json(response).await.map(|_| ())
    }

    async fn upsert(&self, table: &str, rows: Vec<Value>) -> ServiceResult<()> {
        let url = self.table_url(table, "");
        let response = self
            .authorize(Request::post(&url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&rows)?
            .send()
            .await?;
        read_json(response).await.map(|_| ())
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> ServiceResult<()> {
        if filters.is_empty() {
            return Err(ServiceError::MissingFilter("delete"));
        }
        let url = self.table_url(table, &filters_to_query(filters));
        let response = self
            .authorize(Request::delete(&url))
            .header("Prefer", "return=minimal")
            .send()
            .await?;
        read_json(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_rows_shapes() {
        assert_eq!(into_rows(json!([{"id": "a"}, {"id": "b"}])).len(), 2);
        assert!(into_rows(Value::Null).is_empty());
        assert_eq!(into_rows(json!({"id": "a"})), vec![json!({"id": "a"})]);
    }
}
