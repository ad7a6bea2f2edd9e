//! In-memory implementation of DataService for testing and development

use crate::core::entity::Data;
use crate::core::error::{DashError, DashResult};
use crate::core::query::{GetQuery, Page};
use crate::core::service::DataService;
use crate::core::store::QueryableStore;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory data service
///
/// Records are kept in insertion order behind an `RwLock`; clones share the
/// same storage.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    records: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T: Data> InMemoryDataService<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> DashResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> DashResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> DashResult<std::sync::RwLockReadGuard<'_, IndexMap<Uuid, T>>> {
        self.records
            .read()
            .map_err(|e| DashError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> DashResult<std::sync::RwLockWriteGuard<'_, IndexMap<Uuid, T>>> {
        self.records
            .write()
            .map_err(|e| DashError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn not_found(id: &Uuid) -> DashError {
        DashError::NotFound {
            entity: T::resource_name_singular(),
            id: *id,
        }
    }
}

impl<T: Data> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Data> QueryableStore<T> for InMemoryDataService<T> {
    fn list_all(&self) -> DashResult<Vec<T>> {
        Ok(self.read()?.values().cloned().collect())
    }
}

#[async_trait]
impl<T: Data> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> DashResult<T> {
        let mut records = self.write()?;
        let id = entity.id();
        if records.contains_key(&id) {
            return Err(DashError::Storage(format!(
                "{} with id '{}' already exists",
                T::resource_name_singular(),
                id
            )));
        }

        records.insert(id, entity.clone());
        tracing::debug!(entity = T::resource_name_singular(), id = %id, "record created");

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> DashResult<Option<T>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn list(&self, query: &GetQuery, conditions: &[(&str, String)]) -> DashResult<Page<T>> {
        self.query(query, conditions)
    }

    async fn update(&self, id: &Uuid, entity: T) -> DashResult<T> {
        let mut records = self.write()?;
        let slot = records.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        *slot = entity.clone();
        tracing::debug!(entity = T::resource_name_singular(), id = %id, "record updated");

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> DashResult<()> {
        let mut records = self.write()?;
        records.shift_remove(id).ok_or_else(|| Self::not_found(id))?;
        tracing::debug!(entity = T::resource_name_singular(), id = %id, "record deleted");

        Ok(())
    }

    async fn find_by(&self, field: &str, value: &str) -> DashResult<Vec<T>> {
        let records = self.read()?;
        Ok(records
            .values()
            .filter(|r| r.field_value(field).is_some_and(|v| v.matches_text(value)))
            .cloned()
            .collect())
    }

    async fn delete_by(&self, field: &str, value: &str) -> DashResult<usize> {
        let mut records = self.write()?;
        let before = records.len();
        records.retain(|_, r| !r.field_value(field).is_some_and(|v| v.matches_text(value)));
        let removed = before - records.len();
        if removed > 0 {
            tracing::debug!(
                entity = T::resource_name_singular(),
                field = %field,
                removed,
                "records deleted by field"
            );
        }

        Ok(removed)
    }
}
