//! deleteSSHKeyPair

use crate::domain::commands::{ApiCommand, BoundCommand, CommandFactory};
use crate::domain::ports::ManagementService;
use crate::domain::responses::{ResponsePayload, SuccessResponse};
use crate::domain::{
    AccountId, ApiError, ApiResponse, BoundParams, CallContext, OwnerRule, ParamSpec, ParamType,
    Result,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

const API_NAME: &str = "deleteSSHKeyPair";
const RESPONSE_NAME: &str = "deletesshkeypairresponse";

const PARAMETERS: &[ParamSpec] = &[ParamSpec::required(
    "name",
    ParamType::String,
    "Name of the keypair",
)];

pub struct DeleteSshKeyPairFactory {
    management: Arc<dyn ManagementService>,
}

impl DeleteSshKeyPairFactory {
    pub fn new(management: Arc<dyn ManagementService>) -> Self {
        Self { management }
    }
}

#[async_trait]
impl CommandFactory for DeleteSshKeyPairFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMETERS
    }

    async fn build(&self, params: &BoundParams, ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Sync(Box::new(DeleteSshKeyPairCommand {
            management: self.management.clone(),
            account_id: ctx.caller_or_system(),
            name: params.require_string("name")?.to_string(),
        })))
    }
}

struct DeleteSshKeyPairCommand {
    management: Arc<dyn ManagementService>,
    account_id: AccountId,
    name: String,
}

#[async_trait]
impl ApiCommand for DeleteSshKeyPairCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::Caller
    }

    async fn execute(&self) -> Result<ApiResponse> {
        if !self
            .management
            .delete_ssh_key_pair(self.account_id, &self.name)
            .await?
        {
            return Err(ApiError::OperationFailed(
                "Failed to delete SSH key pair".to_string(),
            ));
        }

        info!(account = %self.account_id, key_pair = %self.name, "SSH key pair deleted");
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
    use crate::domain::ports::MockManagementService;

    async fn run(deleted: bool) -> Result<ApiResponse> {
        let mut management = MockManagementService::new();
        management
            .expect_delete_ssh_key_pair()
            .withf(|account, name| *account == AccountId::new(3) && name == "old")
            .times(1)
            .returning(move |_, _| Ok(deleted));
        let factory = DeleteSshKeyPairFactory::new(Arc::new(management));

        build(
            &factory,
            &[("name", "old")],
            CallContext::for_caller(AccountId::new(3)),
        )
        .await?
        .execute()
        .await
    }

    #[tokio::test]
    async fn test_delete_success() {
        let response = run(true).await.unwrap();
        assert_eq!(
            response.to_wire().unwrap()["deletesshkeypairresponse"]["success"],
            true
        );
    }

    #[tokio::test]
    async fn test_delete_failure() {
        assert_eq!(
            run(false).await.unwrap_err(),
            ApiError::OperationFailed("Failed to delete SSH key pair".to_string())
        );
    }
}
