//! listEventTypes

use crate::domain::commands::{ApiCommand, BoundCommand, CommandFactory};
use crate::domain::ports::ManagementService;
use crate::domain::responses::ResponsePayload;
use crate::domain::services::ResponseGenerator;
use crate::domain::{ApiResponse, BoundParams, CallContext, OwnerRule, ParamSpec, Result};
use async_trait::async_trait;
use std::sync::Arc;

const API_NAME: &str = "listEventTypes";
const RESPONSE_NAME: &str = "listeventtypesresponse";

pub struct ListEventTypesFactory {
    management: Arc<dyn ManagementService>,
}

impl ListEventTypesFactory {
    pub fn new(management: Arc<dyn ManagementService>) -> Self {
        Self { management }
    }
}

#[async_trait]
impl CommandFactory for ListEventTypesFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }

    async fn build(&self, _params: &BoundParams, _ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Sync(Box::new(ListEventTypesCommand {
            management: self.management.clone(),
        })))
    }
}

struct ListEventTypesCommand {
    management: Arc<dyn ManagementService>,
}

#[async_trait]
impl ApiCommand for ListEventTypesCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::System
    }

    async fn execute(&self) -> Result<ApiResponse> {
        let names = self.management.list_event_types().await?;
        let dtos = ResponseGenerator::event_type_responses(names);

        Ok(ApiResponse::new(RESPONSE_NAME, ResponsePayload::EventTypes(dtos))
            .with_object_name("eventtype"))
    }
}
