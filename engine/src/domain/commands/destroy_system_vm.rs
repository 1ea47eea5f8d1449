//! destroySystemVm
//! Async: destroys a console proxy or secondary storage VM

use crate::domain::commands::{ApiCommand, AsyncApiCommand, BoundCommand, CommandFactory};
use crate::domain::event_types;
use crate::domain::ports::ManagementService;
use crate::domain::responses::ResponsePayload;
use crate::domain::services::ResponseGenerator;
use crate::domain::{
    ApiError, ApiResponse, BoundParams, CallContext, InstanceType, OwnerRule, ParamSpec,
    ParamType, Result, SystemVmType,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

const API_NAME: &str = "destroySystemVm";
const RESPONSE_NAME: &str = "destroysystemvmresponse";

const PARAMETERS: &[ParamSpec] = &[ParamSpec::required(
    "id",
    ParamType::Long,
    "The ID of the system virtual machine",
)];

pub struct DestroySystemVmFactory {
    management: Arc<dyn ManagementService>,
}

impl DestroySystemVmFactory {
    pub fn new(management: Arc<dyn ManagementService>) -> Self {
        Self { management }
    }
}

#[async_trait]
impl CommandFactory for DestroySystemVmFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMETERS
    }

    async fn build(&self, params: &BoundParams, _ctx: &CallContext) -> Result<BoundCommand> {
        let id = params.require_long("id")?;
        let vm_type = self.management.find_system_vm_type(id).await?;
        debug!(system_vm_id = id, vm_type = ?vm_type, "Resolved system vm type");

        Ok(BoundCommand::Async(Box::new(DestroySystemVmCommand {
            management: self.management.clone(),
            id,
            vm_type,
        })))
    }
}

struct DestroySystemVmCommand {
    management: Arc<dyn ManagementService>,
    id: i64,
    vm_type: Option<SystemVmType>,
}

#[async_trait]
impl ApiCommand for DestroySystemVmCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::Caller
    }

    async fn execute(&self) -> Result<ApiResponse> {
        let vm = self
            .management
            .destroy_system_vm(self.id)
            .await?
            .ok_or_else(|| ApiError::OperationFailed("Fail to destroy system vm".to_string()))?;

        info!(system_vm_id = vm.id, name = %vm.name, "System vm destroyed");

        let dto = ResponseGenerator::system_vm_response(&vm);
        Ok(
            ApiResponse::new(RESPONSE_NAME, ResponsePayload::SystemVm(dto))
                .with_object_name("systemvm"),
        )
    }
}

impl AsyncApiCommand for DestroySystemVmCommand {
    fn event_type(&self) -> &'static str {
        match self.vm_type {
            Some(SystemVmType::ConsoleProxy) => event_types::PROXY_DESTROY,
            _ => event_types::SSVM_DESTROY,
        }
    }

    fn event_description(&self) -> String {
        format!("destroying system vm: {}", self.id)
    }

    fn instance_type(&self) -> InstanceType {
        InstanceType::SystemVm
    }

    fn instance_id(&self) -> Option<i64> {
        Some(self.id)
    }
}
