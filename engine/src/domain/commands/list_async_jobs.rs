//! listAsyncJobs
//! Jobs attributed to the caller; the system account sees every job

use crate::domain::commands::{ApiCommand, BoundCommand, CommandFactory};
use crate::domain::responses::ResponsePayload;
use crate::domain::services::ResponseGenerator;
use crate::domain::{AccountId, ApiResponse, BoundParams, CallContext, OwnerRule, ParamSpec, Result};
use async_trait::async_trait;
use std::sync::Arc;

const API_NAME: &str = "listAsyncJobs";
const RESPONSE_NAME: &str = "listasyncjobsresponse";

pub struct ListAsyncJobsFactory {
    responses: Arc<ResponseGenerator>,
}

impl ListAsyncJobsFactory {
    pub fn new(responses: Arc<ResponseGenerator>) -> Self {
        Self { responses }
    }
}

#[async_trait]
impl CommandFactory for ListAsyncJobsFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }

    async fn build(&self, _params: &BoundParams, ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Sync(Box::new(ListAsyncJobsCommand {
            responses: self.responses.clone(),
            account_id: ctx.caller_or_system(),
        })))
    }
}

struct ListAsyncJobsCommand {
    responses: Arc<ResponseGenerator>,
    account_id: AccountId,
}

#[async_trait]
impl ApiCommand for ListAsyncJobsCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::Caller
    }

    async fn execute(&self) -> Result<ApiResponse> {
        let jobs = self.responses.list_jobs(self.account_id).await?;

        Ok(ApiResponse::new(RESPONSE_NAME, ResponsePayload::AsyncJobs(jobs)))
    }
}
