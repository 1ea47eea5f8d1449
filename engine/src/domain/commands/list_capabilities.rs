//! listCapabilities

use crate::domain::commands::{ApiCommand, BoundCommand, CommandFactory};
use crate::domain::ports::ManagementService;
use crate::domain::responses::ResponsePayload;
use crate::domain::services::ResponseGenerator;
use crate::domain::{ApiResponse, BoundParams, CallContext, OwnerRule, ParamSpec, Result};
use async_trait::async_trait;
use std::sync::Arc;

const API_NAME: &str = "listCapabilities";
const RESPONSE_NAME: &str = "listcapabilitiesresponse";

pub struct ListCapabilitiesFactory {
    management: Arc<dyn ManagementService>,
}

impl ListCapabilitiesFactory {
    pub fn new(management: Arc<dyn ManagementService>) -> Self {
        Self { management }
    }
}

#[async_trait]
impl CommandFactory for ListCapabilitiesFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }

    async fn build(&self, _params: &BoundParams, _ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Sync(Box::new(ListCapabilitiesCommand {
            management: self.management.clone(),
        })))
    }
}

struct ListCapabilitiesCommand {
    management: Arc<dyn ManagementService>,
}

#[async_trait]
impl ApiCommand for ListCapabilitiesCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::System
    }

    async fn execute(&self) -> Result<ApiResponse> {
        let capabilities = self.management.list_capabilities().await?;
        let dto = ResponseGenerator::capabilities_response(&capabilities);

        Ok(ApiResponse::new(RESPONSE_NAME, ResponsePayload::Capabilities(dto))
            .with_object_name("capability"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::test_support::build;
    use crate::domain::ports::MockManagementService;
    use crate::domain::Capabilities;

    #[tokio::test]
    async fn test_list_capabilities() {
        let mut management = MockManagementService::new();
        management.expect_list_capabilities().times(1).returning(|| {
            Ok(Capabilities {
                version: "4.2.0".to_string(),
                security_groups_enabled: true,
                ..Capabilities::default()
            })
        });
        let factory = ListCapabilitiesFactory::new(Arc::new(management));

        let command = build(&factory, &[], CallContext::system()).await.unwrap();
        assert_eq!(command.owner_rule(), OwnerRule::System);

        let wire = command.execute().await.unwrap().to_wire().unwrap();
        let capability = &wire["listcapabilitiesresponse"]["capability"];
        assert_eq!(capability["cloudstackversion"], "4.2.0");
        assert_eq!(capability["securitygroupsenabled"], true);
    }
}
