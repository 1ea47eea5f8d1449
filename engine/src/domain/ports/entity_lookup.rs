use crate::domain::{AccountId, EntityRef, Result};
use async_trait::async_trait;

/// Resolves an entity to its owning account
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityLookup: Send + Sync {
    /// Owning account of `entity`, or `None` if the entity does not exist
    async fn find_owner(&self, entity: EntityRef) -> Result<Option<AccountId>>;
}
