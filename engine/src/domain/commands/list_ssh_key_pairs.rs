//! listSSHKeyPairs
//! Lists the caller's key pairs without private key material

use crate::domain::commands::{ApiCommand, BoundCommand, CommandFactory};
use crate::domain::ports::ManagementService;
use crate::domain::responses::ResponsePayload;
use crate::domain::services::ResponseGenerator;
use crate::domain::{
    AccountId, ApiResponse, BoundParams, CallContext, OwnerRule, ParamSpec, ParamType, Result,
};
use async_trait::async_trait;
use std::sync::Arc;

const API_NAME: &str = "listSSHKeyPairs";
const RESPONSE_NAME: &str = "listsshkeypairsresponse";

const PARAMETERS: &[ParamSpec] = &[
    ParamSpec::optional("name", ParamType::String, "A key pair name to look for"),
    ParamSpec::optional(
        "fingerprint",
        ParamType::String,
        "A public key fingerprint to look for",
    ),
];

pub struct ListSshKeyPairsFactory {
    management: Arc<dyn ManagementService>,
}

impl ListSshKeyPairsFactory {
    pub fn new(management: Arc<dyn ManagementService>) -> Self {
        Self { management }
    }
}

#[async_trait]
impl CommandFactory for ListSshKeyPairsFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMETERS
    }

    async fn build(&self, params: &BoundParams, ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Sync(Box::new(ListSshKeyPairsCommand {
            management: self.management.clone(),
            account_id: ctx.caller_or_system(),
            name: params.string("name").map(str::to_string),
            fingerprint: params.string("fingerprint").map(str::to_string),
        })))
    }
}

struct ListSshKeyPairsCommand {
    management: Arc<dyn ManagementService>,
    account_id: AccountId,
    name: Option<String>,
    fingerprint: Option<String>,
}

#[async_trait]
impl ApiCommand for ListSshKeyPairsCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::Caller
    }

    async fn execute(&self) -> Result<ApiResponse> {
        let key_pairs = self
            .management
            .list_ssh_key_pairs(self.account_id, self.name.clone(), self.fingerprint.clone())
            .await?;

        let dtos = key_pairs
            .iter()
            .map(|key_pair| ResponseGenerator::key_pair_response(&key_pair.without_private_key()))
            .collect();

        Ok(ApiResponse::new(RESPONSE_NAME, ResponsePayload::KeyPairs(dtos)))
    }
}
