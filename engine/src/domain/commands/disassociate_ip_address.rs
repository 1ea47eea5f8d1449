//! disassociateIpAddress
//! Async: releases a public IP address

use crate::domain::commands::{ApiCommand, AsyncApiCommand, BoundCommand, CommandFactory};
use crate::domain::event_types;
use crate::domain::ports::NetworkService;
use crate::domain::responses::{ResponsePayload, SuccessResponse};
use crate::domain::{
    ApiError, ApiResponse, BoundParams, CallContext, EntityKind, EntityRef, InstanceType,
    OwnerRule, ParamSpec, ParamType, Result,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

const API_NAME: &str = "disassociateIpAddress";
const RESPONSE_NAME: &str = "disassociateipaddressresponse";

const PARAMETERS: &[ParamSpec] = &[ParamSpec::required(
    "id",
    ParamType::Long,
    "The ID of the public IP address to disassociate",
)];

pub struct DisassociateIpAddressFactory {
    network: Arc<dyn NetworkService>,
}

impl DisassociateIpAddressFactory {
    pub fn new(network: Arc<dyn NetworkService>) -> Self {
        Self { network }
    }
}

#[async_trait]
impl CommandFactory for DisassociateIpAddressFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMETERS
    }

    async fn build(&self, params: &BoundParams, _ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Async(Box::new(DisassociateIpAddressCommand {
            network: self.network.clone(),
            id: params.require_long("id")?,
        })))
    }
}

struct DisassociateIpAddressCommand {
    network: Arc<dyn NetworkService>,
    id: i64,
}

#[async_trait]
impl ApiCommand for DisassociateIpAddressCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::CallerOrEntity(EntityRef::new(EntityKind::IpAddress, self.id))
    }

    async fn execute(&self) -> Result<ApiResponse> {
        if !self.network.disassociate_ip_address(self.id).await? {
            return Err(ApiError::OperationFailed(
                "Failed to disassociate ip address".to_string(),
            ));
        }

        info!(ip_address_id = self.id, "Ip address disassociated");
        Ok(ApiResponse::new(
            RESPONSE_NAME,
            ResponsePayload::Success(SuccessResponse::ok()),
        ))
    }
}

impl AsyncApiCommand for DisassociateIpAddressCommand {
    fn event_type(&self) -> &'static str {
        event_types::NET_IP_RELEASE
    }

    fn event_description(&self) -> String {
        format!("Disassociating ip address with id={}", self.id)
    }

    fn instance_type(&self) -> InstanceType {
        InstanceType::IpAddress
    }

    fn instance_id(&self) -> Option<i64> {
        Some(self.id)
    }
}
