//! deleteStoragePool
//!
//! A failed deletion that still leaves the pool in `Removed` state means the pool left
//! inventory but cleanup did not finish; that is reported as a domain state error.

use crate::domain::commands::{ApiCommand, BoundCommand, CommandFactory};
use crate::domain::ports::StorageService;
use crate::domain::responses::{ResponsePayload, SuccessResponse};
use crate::domain::{
    ApiError, ApiResponse, BoundParams, CallContext, OwnerRule, ParamSpec, ParamType, Result,
    StoragePoolStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

const API_NAME: &str = "deleteStoragePool";
const RESPONSE_NAME: &str = "deletestoragepoolresponse";

const PARAMETERS: &[ParamSpec] = &[
    ParamSpec::required("id", ParamType::Long, "Storage pool id"),
    ParamSpec::optional(
        "forced",
        ParamType::Boolean,
        "Force destroy storage pool, expunging volumes in destroyed state",
    ),
];

pub struct DeleteStoragePoolFactory {
    storage: Arc<dyn StorageService>,
}

impl DeleteStoragePoolFactory {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl CommandFactory for DeleteStoragePoolFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMETERS
    }

    async fn build(&self, params: &BoundParams, _ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Sync(Box::new(DeleteStoragePoolCommand {
            storage: self.storage.clone(),
            id: params.require_long("id")?,
            forced: params.boolean("forced").unwrap_or(false),
        })))
    }
}

struct DeleteStoragePoolCommand {
    storage: Arc<dyn StorageService>,
    id: i64,
    forced: bool,
}

#[async_trait]
impl ApiCommand for DeleteStoragePoolCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::System
    }

    async fn execute(&self) -> Result<ApiResponse> {
        if self.storage.delete_pool(self.id, self.forced).await? {
            info!(pool_id = self.id, forced = self.forced, "Storage pool deleted");
            return Ok(ApiResponse::new(
                RESPONSE_NAME,
                ResponsePayload::Success(SuccessResponse::ok()),
            ));
        }

        let pool = self.storage.get_storage_pool(self.id).await?;
        match pool {
            Some(pool) if pool.status == StoragePoolStatus::Removed => {
                warn!(pool_id = self.id, "Storage pool removed but cleanup did not finish");
                Err(ApiError::DomainState(
                    "Failed to finish storage pool removal. The storage pool will not be usable."
                        .to_string(),
                ))
            }
            _ => Err(ApiError::OperationFailed(
                "Failed to delete storage pool".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::test_support::build;
    use crate::domain::ports::MockStorageService;
    use crate::domain::StoragePool;
    use mockall::predicate::eq;

    fn pool(status: StoragePoolStatus) -> StoragePool {
        StoragePool {
            id: 7,
            name: "primary".to_string(),
            status,
            volumes: 0,
        }
    }

    async fn run(storage: MockStorageService, pairs: &[(&str, &str)]) -> Result<ApiResponse> {
        let factory = DeleteStoragePoolFactory::new(Arc::new(storage));
        build(&factory, pairs, CallContext::system())
            .await?
            .execute()
            .await
    }

    #[tokio::test]
    async fn test_delete_success_skips_pool_read() {
        let mut storage = MockStorageService::new();
        storage
            .expect_delete_pool()
            .with(eq(7), eq(true))
            .times(1)
            .returning(|_, _| Ok(true));
        storage.expect_get_storage_pool().times(0);

        let response = run(storage, &[("id", "7"), ("forced", "true")]).await.unwrap();
        assert_eq!(response.response_name(), "deletestoragepoolresponse");
    }

    #[tokio::test]
    async fn test_forced_defaults_to_false() {
        let mut storage = MockStorageService::new();
        storage
            .expect_delete_pool()
            .with(eq(7), eq(false))
            .times(1)
            .returning(|_, _| Ok(true));

        assert!(run(storage, &[("id", "7")]).await.is_ok());
    }

    #[tokio::test]
    async fn test_removed_pool_reports_cleanup_pending() {
        let mut storage = MockStorageService::new();
        storage.expect_delete_pool().returning(|_, _| Ok(false));
        storage
            .expect_get_storage_pool()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(Some(pool(StoragePoolStatus::Removed))));

        assert_eq!(
            run(storage, &[("id", "7")]).await.unwrap_err(),
            ApiError::DomainState(
                "Failed to finish storage pool removal. The storage pool will not be usable."
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_other_failures_are_plain() {
        for found in [Some(pool(StoragePoolStatus::Up)), None] {
            let mut storage = MockStorageService::new();
            storage.expect_delete_pool().returning(|_, _| Ok(false));
            storage
                .expect_get_storage_pool()
                .returning(move |_| Ok(found.clone()));

            assert_eq!(
                run(storage, &[("id", "7")]).await.unwrap_err(),
                ApiError::OperationFailed("Failed to delete storage pool".to_string())
            );
        }
    }
}
