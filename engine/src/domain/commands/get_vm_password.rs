//! getVMPassword

use crate::domain::commands::{ApiCommand, BoundCommand, CommandFactory};
use crate::domain::ports::ManagementService;
use crate::domain::responses::{PasswordResponse, ResponsePayload};
use crate::domain::{
    ApiError, ApiResponse, BoundParams, CallContext, EntityKind, EntityRef, OwnerRule, ParamSpec,
    ParamType, Result,
};
use async_trait::async_trait;
use std::sync::Arc;

const API_NAME: &str = "getVMPassword";
const RESPONSE_NAME: &str = "getvmpasswordresponse";

const PARAMETERS: &[ParamSpec] = &[ParamSpec::required(
    "id",
    ParamType::Long,
    "The ID of the virtual machine",
)];

pub struct GetVmPasswordFactory {
    management: Arc<dyn ManagementService>,
}

impl GetVmPasswordFactory {
    pub fn new(management: Arc<dyn ManagementService>) -> Self {
        Self { management }
    }
}

#[async_trait]
impl CommandFactory for GetVmPasswordFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMETERS
    }

    async fn build(&self, params: &BoundParams, _ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Sync(Box::new(GetVmPasswordCommand {
            management: self.management.clone(),
            id: params.require_long("id")?,
        })))
    }
}

struct GetVmPasswordCommand {
    management: Arc<dyn ManagementService>,
    id: i64,
}

#[async_trait]
impl ApiCommand for GetVmPasswordCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::Entity(EntityRef::new(EntityKind::VirtualMachine, self.id))
    }

    async fn execute(&self) -> Result<ApiResponse> {
        let password = self
            .management
            .get_vm_password(self.id)
            .await?
            .filter(|password| !password.is_empty())
            .ok_or_else(|| {
                ApiError::NotFound(format!("No password for VM with id '{}' found.", self.id))
            })?;

        Ok(ApiResponse::new(
            RESPONSE_NAME,
            ResponsePayload::Password(PasswordResponse {
                encrypted_password: password,
            }),
        ))
    }
}
