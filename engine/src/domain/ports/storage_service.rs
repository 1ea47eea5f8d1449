use crate::domain::{Result, StoragePool};
use async_trait::async_trait;

/// Primary storage port
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Delete a storage pool; `forced` deletes even when volumes remain
    async fn delete_pool(&self, id: i64, forced: bool) -> Result<bool>;

    async fn get_storage_pool(&self, id: i64) -> Result<Option<StoragePool>>;
}
