//! registerSSHKeyPair

use crate::domain::commands::{ApiCommand, BoundCommand, CommandFactory};
use crate::domain::ports::ManagementService;
use crate::domain::responses::ResponsePayload;
use crate::domain::services::ResponseGenerator;
use crate::domain::{
    AccountId, ApiError, ApiResponse, BoundParams, CallContext, OwnerRule, ParamSpec, ParamType,
    Result,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

const API_NAME: &str = "registerSSHKeyPair";
const RESPONSE_NAME: &str = "registersshkeypairresponse";

const PARAMETERS: &[ParamSpec] = &[
    ParamSpec::required("name", ParamType::String, "Name of the keypair"),
    ParamSpec::required(
        "publickey",
        ParamType::String,
        "Public key material of the keypair",
    ),
];

pub struct RegisterSshKeyPairFactory {
    management: Arc<dyn ManagementService>,
}

impl RegisterSshKeyPairFactory {
    pub fn new(management: Arc<dyn ManagementService>) -> Self {
        Self { management }
    }
}

#[async_trait]
impl CommandFactory for RegisterSshKeyPairFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMETERS
    }

    async fn build(&self, params: &BoundParams, ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Sync(Box::new(RegisterSshKeyPairCommand {
            management: self.management.clone(),
            account_id: ctx.caller_or_system(),
            name: params.require_string("name")?.to_string(),
            public_key: params.require_string("publickey")?.to_string(),
        })))
    }
}

struct RegisterSshKeyPairCommand {
    management: Arc<dyn ManagementService>,
    account_id: AccountId,
    name: String,
    public_key: String,
}

#[async_trait]
impl ApiCommand for RegisterSshKeyPairCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::Caller
    }

    async fn execute(&self) -> Result<ApiResponse> {
        let key_pair = self
            .management
            .register_ssh_key_pair(self.account_id, &self.name, &self.public_key)
            .await?
            .ok_or_else(|| {
                ApiError::OperationFailed("Failed to register SSH key pair".to_string())
            })?;

        info!(
            account = %self.account_id,
            key_pair = %key_pair.name,
            "SSH key pair registered"
        );

        let dto = ResponseGenerator::key_pair_response(&key_pair.without_private_key());
        Ok(
            ApiResponse::new(RESPONSE_NAME, ResponsePayload::KeyPair(dto))
                .with_object_name("keypair"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::test_support::build;
    use crate::domain::ports::MockManagementService;
    use crate::domain::SshKeyPair;

    #[tokio::test]
    async fn test_register_omits_private_key() {
        let mut management = MockManagementService::new();
        management
            .expect_register_ssh_key_pair()
            .withf(|_, name, key| name == "laptop" && key == "ecdsa-sha2-nistp256 AAAA")
            .times(1)
            .returning(|account_id, name, key| {
                Ok(Some(SshKeyPair {
                    name: name.to_string(),
                    account_id,
                    fingerprint: "SHA256:xyz".to_string(),
                    public_key: key.to_string(),
                    private_key: None,
                }))
            });
        let factory = RegisterSshKeyPairFactory::new(Arc::new(management));

        let command = build(
            &factory,
            &[("name", "laptop"), ("publickey", "ecdsa-sha2-nistp256 AAAA")],
            CallContext::for_caller(AccountId::new(2)),
        )
        .await
        .unwrap();
        let wire = command.execute().await.unwrap().to_wire().unwrap();

        let key_pair = &wire["registersshkeypairresponse"]["keypair"];
        assert_eq!(key_pair["fingerprint"], "SHA256:xyz");
        assert!(key_pair.get("privatekey").is_none());
    }

    #[tokio::test]
    async fn test_public_key_required() {
        let mut management = MockManagementService::new();
        management.expect_register_ssh_key_pair().times(0);
        let factory = RegisterSshKeyPairFactory::new(Arc::new(management));

        let result = build(&factory, &[("name", "laptop")], CallContext::system()).await;
        assert_eq!(
            result.unwrap_err(),
            ApiError::Validation("Missing required parameter: publickey".to_string())
        );
    }

    #[tokio::test]
    async fn test_register_failure() {
        let mut management = MockManagementService::new();
        management
            .expect_register_ssh_key_pair()
            .returning(|_, _, _| Ok(None));
        let factory = RegisterSshKeyPairFactory::new(Arc::new(management));

        let command = build(
            &factory,
            &[("name", "laptop"), ("publickey", "garbage")],
            CallContext::system(),
        )
        .await
        .unwrap();
        assert_eq!(
            command.execute().await.unwrap_err().to_string(),
            "Failed to register SSH key pair"
        );
    }
}
