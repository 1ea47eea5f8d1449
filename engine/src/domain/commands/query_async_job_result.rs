//! queryAsyncJobResult
//! Reads the status and, once terminal, the result of an async job

use crate::domain::commands::{ApiCommand, BoundCommand, CommandFactory};
use crate::domain::responses::ResponsePayload;
use crate::domain::services::ResponseGenerator;
use crate::domain::{
    ApiResponse, BoundParams, CallContext, JobId, OwnerRule, ParamSpec, ParamType, Result,
};
use async_trait::async_trait;
use std::sync::Arc;

const API_NAME: &str = "queryAsyncJobResult";
const RESPONSE_NAME: &str = "queryasyncjobresultresponse";

const PARAMETERS: &[ParamSpec] = &[ParamSpec::required(
    "jobid",
    ParamType::Uuid,
    "The ID of the asynchronous job",
)];

pub struct QueryAsyncJobResultFactory {
    responses: Arc<ResponseGenerator>,
}

impl QueryAsyncJobResultFactory {
    pub fn new(responses: Arc<ResponseGenerator>) -> Self {
        Self { responses }
    }
}

#[async_trait]
impl CommandFactory for QueryAsyncJobResultFactory {
    fn api_name(&self) -> &'static str {
        API_NAME
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMETERS
    }

    async fn build(&self, params: &BoundParams, _ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Sync(Box::new(QueryAsyncJobResultCommand {
            responses: self.responses.clone(),
            job_id: JobId::from(params.require_uuid("jobid")?),
        })))
    }
}

struct QueryAsyncJobResultCommand {
    responses: Arc<ResponseGenerator>,
    job_id: JobId,
}

#[async_trait]
impl ApiCommand for QueryAsyncJobResultCommand {
    fn command_name(&self) -> &'static str {
        RESPONSE_NAME
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::System
    }

    async fn execute(&self) -> Result<ApiResponse> {
        let job = self.responses.query_job_result(self.job_id).await?;

        Ok(
            ApiResponse::new(RESPONSE_NAME, ResponsePayload::AsyncJob(job))
                .with_object_name("asyncjobs"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::test_support::build;
    use crate::domain::ports::MockAsyncJobRepository;
    use crate::domain::{AccountId, ApiError, AsyncJob, InstanceType};

    #[tokio::test]
    async fn test_query_pending_job() {
        let job = AsyncJob::new(
            "disassociateIpAddress",
            AccountId::new(3),
            InstanceType::IpAddress,
            Some(31),
        );
        let job_id = job.id();
        let mut jobs = MockAsyncJobRepository::new();
        jobs.expect_find_by_id()
            .returning(move |_| Ok(Some(job.clone())));
        let responses = Arc::new(ResponseGenerator::new(Arc::new(jobs)));
        let factory = QueryAsyncJobResultFactory::new(responses);

        let job_id_param = job_id.to_string();
        let command = build(
            &factory,
            &[("jobid", job_id_param.as_str())],
            CallContext::for_caller(AccountId::new(3)),
        )
        .await
        .unwrap();
        assert_eq!(command.owner_rule(), OwnerRule::System);

        let response = command.execute().await.unwrap();
        assert_eq!(response.object_name(), "asyncjobs");

        let wire = response.to_wire().unwrap();
        let body = &wire["queryasyncjobresultresponse"];
        assert_eq!(body["jobid"], job_id.to_string());
        assert_eq!(body["jobstatus"], 0);
        assert_eq!(body["cmd"], "disassociateIpAddress");
        assert_eq!(body["jobinstancetype"], "IpAddress");
        assert_eq!(body["jobinstanceid"], 31);
        assert!(body.get("jobresult").is_none());
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let mut jobs = MockAsyncJobRepository::new();
        jobs.expect_find_by_id().returning(|_| Ok(None));
        let responses = Arc::new(ResponseGenerator::new(Arc::new(jobs)));
        let factory = QueryAsyncJobResultFactory::new(responses);

        let job_id = "550e8400-e29b-41d4-a716-446655440000";
        let command = build(&factory, &[("jobid", job_id)], CallContext::system())
            .await
            .unwrap();
        assert_eq!(
            command.execute().await.unwrap_err(),
            ApiError::NotFound(format!("Unable to find async job with id {}", job_id))
        );
    }

    #[tokio::test]
    async fn test_malformed_job_id() {
        let mut jobs = MockAsyncJobRepository::new();
        jobs.expect_find_by_id().times(0);
        let responses = Arc::new(ResponseGenerator::new(Arc::new(jobs)));
        let factory = QueryAsyncJobResultFactory::new(responses);

        let result = build(&factory, &[("jobid", "42")], CallContext::system()).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
