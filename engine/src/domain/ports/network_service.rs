use crate::domain::Result;
use async_trait::async_trait;

/// Network port
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkService: Send + Sync {
    async fn disassociate_ip_address(&self, id: i64) -> Result<bool>;
}
