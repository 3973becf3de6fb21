//! In-process document store.
//!
//! Backs the service and HTTP tests, and any tooling that wants the full
//! application without a database. Unique fields are enforced the same way
//! the `PostgreSQL` indexes enforce them.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, RepositoryError};

/// A collection held in memory, in insertion order.
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Document> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> MemoryStore<T> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for MemoryStore<T> {
    async fn insert(&self, draft: T::Draft) -> Result<T, RepositoryError> {
        let record = T::materialize(T::new_id(), draft, Utc::now());
        let mut records = self.records.write().await;

        for field in T::UNIQUE_FIELDS {
            let value = record.field_value(*field);
            if records.iter().any(|r| r.field_value(*field) == value) {
                return Err(RepositoryError::Conflict(format!(
                    "{}.{field:?} already exists",
                    T::COLLECTION
                )));
            }
        }

        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_one(&self, field: T::Field, value: &str) -> Result<Option<T>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.field_value(field) == value).cloned())
    }
}
