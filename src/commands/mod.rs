//! Data Access
//!
//! Typed queries and mutations over the remote tables, one module per
//! resource. Everything takes the `TableApi` / `ObjectStorage` seams so it
//! can run against a fake in tests.

mod activity;
mod mail;
mod media;
mod personal;
mod project;
mod reminder;

use serde::Serialize;
use serde_json::Value;
use supabase_lite::{Query, ServiceResult, TableApi};

use crate::store::Record;

pub use activity::*;
pub use mail::*;
pub use media::*;
pub use personal::*;
pub use project::*;
pub use reminder::*;

/// Decode rows, skipping (and logging) any that don't match `T`.
pub fn decode_rows<T: Record>(rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<T>(row) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("skipping undecodable {} row: {}", T::TABLE, e);
                None
            }
        })
        .collect()
}

pub fn to_row<T: Serialize>(value: &T) -> ServiceResult<Value> {
    Ok(serde_json::to_value(value)?)
}

pub async fn fetch<T: Record, A: TableApi + ?Sized>(api: &A, query: &Query) -> ServiceResult<Vec<T>> {
    let rows = api.select(T::TABLE, query).await?;
    Ok(decode_rows(rows))
}

/// `None` for blank form fields.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
pub(crate) mod fake {
    //! Recording stand-ins for the remote service.

    use async_trait::async_trait;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::rc::Rc;
    use supabase_lite::{Filter, ObjectStorage, Query, ServiceError, ServiceResult, TableApi};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Select { table: String, query: String },
        Insert { table: String, rows: Vec<Value> },
        Update { table: String, patch: Value, filters: Vec<String> },
        Upsert { table: String, rows: Vec<Value> },
        Delete { table: String, filters: Vec<String> },
    }

    #[derive(Default)]
    pub struct FakeApi {
        pub calls: RefCell<Vec<Call>>,
        pub rows: Vec<Value>,
        pub fail: Option<ServiceError>,
    }

    impl FakeApi {
        pub fn failing(err: ServiceError) -> Self {
            Self { fail: Some(err), ..Default::default() }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: Call) -> ServiceResult<()> {
            self.calls.borrow_mut().push(call);
            match &self.fail {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    fn params(filters: &[Filter]) -> Vec<String> {
        filters.iter().map(Filter::to_param).collect()
    }

    #[async_trait(?Send)]
    impl TableApi for FakeApi {
        async fn select(&self, table: &str, query: &Query) -> ServiceResult<Vec<Value>> {
            self.record(Call::Select { table: table.into(), query: query.to_query_string() })?;
            Ok(self.rows.clone())
        }

        async fn insert(&self, table: &str, rows: Vec<Value>) -> ServiceResult<()> {
            self.record(Call::Insert { table: table.into(), rows })
        }

        async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> ServiceResult<()> {
            self.record(Call::Update { table: table.into(), patch, filters: params(filters) })
        }

        async fn upsert(&self, table: &str, rows: Vec<Value>) -> ServiceResult<()> {
            self.record(Call::Upsert { table: table.into(), rows })
        }

        async fn delete(&self, table: &str, filters: &[Filter]) -> ServiceResult<()> {
            self.record(Call::Delete { table: table.into(), filters: params(filters) })
        }
    }

    pub const STORAGE_URL: &str = "https://abc.supabase.co/storage/v1";

    /// Storage fake; bodies are plain byte counts.
    #[derive(Default)]
    pub struct FakeStorage {
        pub uploads: RefCell<Vec<(String, String, String)>>,
        pub removals: RefCell<Vec<(String, Vec<String>)>>,
    }

    #[async_trait(?Send)]
    impl ObjectStorage for FakeStorage {
        type Body = u64;

        async fn upload(
            &self,
            bucket: &str,
            path: &str,
            _body: &u64,
            content_type: &str,
            on_progress: Rc<dyn Fn(u8)>,
        ) -> ServiceResult<String> {
            self.uploads
                .borrow_mut()
                .push((bucket.into(), path.into(), content_type.into()));
            on_progress(50);
            on_progress(100);
            Ok(self.public_url(bucket, path))
        }

        async fn remove(&self, bucket: &str, paths: &[String]) -> ServiceResult<()> {
            self.removals.borrow_mut().push((bucket.into(), paths.to_vec()));
            Ok(())
        }

        fn public_url(&self, bucket: &str, path: &str) -> String {
            supabase_lite::storage::public_object_url(STORAGE_URL, bucket, path)
        }

        fn object_path(&self, bucket: &str, public_url: &str) -> Option<String> {
            supabase_lite::storage::object_path_from_url(STORAGE_URL, bucket, public_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{Call, FakeApi};
    use super::*;
    use crate::models::Project;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_skips_bad_rows() {
        let api = FakeApi {
            rows: vec![
                json!({"id": "p1", "title": "Ok", "category": "fixes"}),
                json!({"id": "p2", "title": "Bad", "category": "branding"}),
            ],
            ..Default::default()
        };
        let projects: Vec<Project> = fetch(&api, &Query::new()).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, "p1");
        assert_eq!(
            api.calls(),
            vec![Call::Select { table: "projects".into(), query: "select=*".into() }]
        );
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" x "), Some("x".into()));
    }
}
