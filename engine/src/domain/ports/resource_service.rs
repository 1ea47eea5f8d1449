use crate::domain::Result;
use async_trait::async_trait;

/// Compute resource port
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceService: Send + Sync {
    async fn delete_cluster(&self, id: i64) -> Result<bool>;
}
