//! Persistence boundary for entity records

use crate::core::entity::Data;
use crate::core::error::DashResult;
use crate::core::query::{GetQuery, Page};
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing records of one entity type
///
/// The dashboard is agnostic to the underlying storage mechanism; it only
/// needs these operations. Implementations own `id` and timestamps once a
/// record is stored.
#[async_trait]
pub trait DataService<T: Data>: Send + Sync {
    /// Store a new record
    async fn create(&self, entity: T) -> DashResult<T>;

    /// Get a record by ID
    async fn get(&self, id: &Uuid) -> DashResult<Option<T>>;

    /// List records matching every `(field, value)` condition, then apply
    /// search, sort and pagination from `query`
    async fn list(&self, query: &GetQuery, conditions: &[(&str, String)]) -> DashResult<Page<T>>;

    /// Replace an existing record; fails with `NotFound` when absent
    async fn update(&self, id: &Uuid, entity: T) -> DashResult<T>;

    /// Delete a record; fails with `NotFound` when absent
    async fn delete(&self, id: &Uuid) -> DashResult<()>;

    /// All records whose `field` equals `value`, in storage order
    async fn find_by(&self, field: &str, value: &str) -> DashResult<Vec<T>>;

    /// Number of records whose `field` equals `value`
    async fn count_by(&self, field: &str, value: &str) -> DashResult<usize> {
        Ok(self.find_by(field, value).await?.len())
    }

    /// Delete every record whose `field` equals `value`, returning how many went
    async fn delete_by(&self, field: &str, value: &str) -> DashResult<usize>;

    async fn exists(&self, id: &Uuid) -> DashResult<bool> {
        Ok(self.get(id).await?.is_some())
    }
}
