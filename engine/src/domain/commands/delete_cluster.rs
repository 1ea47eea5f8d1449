//! deleteCluster

use crate::domain::commands::{ApiCommand, BoundCommand, CommandFactory};
use crate::domain::ports::ResourceService;
use crate::domain::responses::{ResponsePayload, SuccessResponse};
use crate::domain::{
    ApiError, ApiResponse, BoundParams, CallContext, OwnerRule, ParamSpec, ParamType, Result,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

const API_NAME: &str = "deleteCluster";
const RESPONSE_NAME: &str = "deleteclusterresponse";

const PARAMETERS: &[ParamSpec] = &[ParamSpec::required(
    "id",
    ParamType::Long,
    "The cluster ID",
)];

pub struct DeleteClusterFactory {
    resources: Arc<dyn ResourceService>,
}

impl DeleteClusterFactory {
    pub fn new(resources: Arc<dyn ResourceService>) -> Self {
        Self { resources }
    }
}

#[async_trait]
impl CommandFactory for DeleteClusterFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMETERS
    }

    async fn build(&self, params: &BoundParams, _ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Sync(Box::new(DeleteClusterCommand {
            resources: self.resources.clone(),
            id: params.require_long("id")?,
        })))
    }
}

struct DeleteClusterCommand {
    resources: Arc<dyn ResourceService>,
    id: i64,
}

#[async_trait]
impl ApiCommand for DeleteClusterCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::System
    }

    async fn execute(&self) -> Result<ApiResponse> {
        if !self.resources.delete_cluster(self.id).await? {
            return Err(ApiError::OperationFailed(
                "Failed to delete cluster".to_string(),
            ));
        }

        info!(cluster_id = self.id, "Cluster deleted");
        Ok(ApiResponse::new(
            RESPONSE_NAME,
            ResponsePayload::Success(SuccessResponse::ok()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::test_support::build;
    use crate::domain::ports::MockResourceService;
    use mockall::predicate::eq;

    fn factory(deleted: bool) -> DeleteClusterFactory {
        let mut resources = MockResourceService::new();
        resources
            .expect_delete_cluster()
            .with(eq(42))
            .times(1)
            .returning(move |_| Ok(deleted));
        DeleteClusterFactory::new(Arc::new(resources))
    }

    #[tokio::test]
    async fn test_delete_cluster_success() {
        let command = build(&factory(true), &[("id", "42")], CallContext::system())
            .await
            .unwrap();
        let wire = command.execute().await.unwrap().to_wire().unwrap();
        assert_eq!(wire["deleteclusterresponse"]["success"], true);
    }

    #[tokio::test]
    async fn test_delete_cluster_failure() {
        let command = build(&factory(false), &[("id", "42")], CallContext::system())
            .await
            .unwrap();
        assert_eq!(
            command.execute().await.unwrap_err(),
            ApiError::OperationFailed("Failed to delete cluster".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_id_never_calls_service() {
        let mut resources = MockResourceService::new();
        resources.expect_delete_cluster().times(0);
        let factory = DeleteClusterFactory::new(Arc::new(resources));

        let result = build(&factory, &[], CallContext::system()).await;
        assert_eq!(
            result.unwrap_err(),
            ApiError::Validation("Missing required parameter: id".to_string())
        );
    }
}
