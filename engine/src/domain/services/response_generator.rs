//! Response generator
//! Builds wire DTOs from domain objects and answers job-id lookups

use crate::domain::entities::JobResult;
use crate::domain::ports::AsyncJobRepository;
use crate::domain::responses::{
    AsyncJobResponse, CapabilitiesResponse, EventTypeResponse, KeyPairResponse,
    SystemVmResponse,
};
use crate::domain::{
    AccountId, ApiError, AsyncJob, Capabilities, JobId, Result, SshKeyPair, SystemVm,
};
use std::sync::Arc;
use tracing::debug;

const JOB_RESULT_TYPE: &str = "object";

pub struct ResponseGenerator {
    jobs: Arc<dyn AsyncJobRepository>,
}

impl ResponseGenerator {
    pub fn new(jobs: Arc<dyn AsyncJobRepository>) -> Self {
        Self { jobs }
    }

    pub fn key_pair_response(key_pair: &SshKeyPair) -> KeyPairResponse {
        KeyPairResponse {
            name: key_pair.name.clone(),
            fingerprint: key_pair.fingerprint.clone(),
            private_key: key_pair.private_key.clone(),
        }
    }

    pub fn system_vm_response(vm: &SystemVm) -> SystemVmResponse {
        SystemVmResponse {
            id: vm.id,
            name: vm.name.clone(),
            system_vm_type: vm.vm_type.to_string(),
            state: vm.state.to_string(),
        }
    }

    pub fn capabilities_response(capabilities: &Capabilities) -> CapabilitiesResponse {
        CapabilitiesResponse {
            version: capabilities.version.clone(),
            security_groups_enabled: capabilities.security_groups_enabled,
            user_public_template_enabled: capabilities.user_public_template_enabled,
            project_invite_required: capabilities.project_invite_required,
            allow_user_create_projects: capabilities.allow_user_create_projects,
        }
    }

    pub fn event_type_responses(names: Vec<String>) -> Vec<EventTypeResponse> {
        names
            .into_iter()
            .map(|name| EventTypeResponse { name })
            .collect()
    }

    /// Job status DTO; terminal jobs embed the stored response body or error
    pub fn async_job_response(job: &AsyncJob) -> Result<AsyncJobResponse> {
        let job_result = match job.result() {
            Some(JobResult::Response(response)) => Some(response.body()?),
            Some(JobResult::Error(error)) => Some(serde_json::to_value(error)?),
            None => None,
        };

        Ok(AsyncJobResponse {
            job_id: job.id(),
            cmd: job.api_name().to_string(),
            account_id: job.account_id(),
            job_status: job.status().code(),
            job_proc_status: 0,
            job_result_code: job.result_code(),
            job_result_type: JOB_RESULT_TYPE.to_string(),
            job_result,
            job_instance_type: job.instance_type().to_string(),
            job_instance_id: job.instance_id(),
            created: job.created_at(),
        })
    }

    /// Look up a job by id and render its status
    pub async fn query_job_result(&self, job_id: JobId) -> Result<AsyncJobResponse> {
        debug!(job_id = %job_id, "Querying async job result");

        let job = self.jobs.find_by_id(job_id).await?.ok_or_else(|| {
            ApiError::NotFound(format!("Unable to find async job with id {}", job_id))
        })?;

        Self::async_job_response(&job)
    }

    /// Jobs owned by `account`, or every job for the system account
    pub async fn list_jobs(&self, account: AccountId) -> Result<Vec<AsyncJobResponse>> {
        self.jobs
            .find_all()
            .await?
            .iter()
            .filter(|job| account.is_system() || job.account_id() == account)
            .map(Self::async_job_response)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockAsyncJobRepository;
    use crate::domain::responses::ResponsePayload;
    use crate::domain::{ApiResponse, InstanceType, SystemVmState, SystemVmType};

    fn destroyed_vm_response() -> ApiResponse {
        let vm = SystemVm {
            id: 12,
            name: "v-12-VM".to_string(),
            vm_type: SystemVmType::ConsoleProxy,
            state: SystemVmState::Destroyed,
        };
        ApiResponse::new(
            "destroysystemvmresponse",
            ResponsePayload::SystemVm(ResponseGenerator::system_vm_response(&vm)),
        )
    }

    fn completed_job() -> AsyncJob {
        let mut job = AsyncJob::new(
            "destroySystemVm",
            AccountId::new(2),
            InstanceType::SystemVm,
            Some(12),
        );
        job.mark_running().unwrap();
        job.complete(destroyed_vm_response()).unwrap();
        job
    }

    #[test]
    fn test_pending_job_has_no_result() {
        let job = AsyncJob::new(
            "destroySystemVm",
            AccountId::SYSTEM,
            InstanceType::SystemVm,
            Some(1),
        );
        let dto = ResponseGenerator::async_job_response(&job).unwrap();
        assert_eq!(dto.job_status, 0);
        assert_eq!(dto.job_result_code, 0);
        assert_eq!(dto.job_result_type, "object");
        assert!(dto.job_result.is_none());
        assert_eq!(dto.job_instance_type, "SystemVm");
    }

    #[test]
    fn test_completed_job_embeds_response_body() {
        let dto = ResponseGenerator::async_job_response(&completed_job()).unwrap();
        assert_eq!(dto.job_status, 1);

        let result = dto.job_result.unwrap();
        assert_eq!(result["systemvm"]["id"], 12);
        assert_eq!(result["systemvm"]["state"], "Destroyed");
        assert_eq!(result["systemvm"]["systemvmtype"], "consoleproxy");
    }

    #[test]
    fn test_failed_job_embeds_error() {
        let mut job = AsyncJob::new(
            "disassociateIpAddress",
            AccountId::SYSTEM,
            InstanceType::IpAddress,
            Some(4),
        );
        job.mark_running().unwrap();
        job.fail(&ApiError::OperationFailed("Failed to disassociate ip address".into()))
            .unwrap();

        let dto = ResponseGenerator::async_job_response(&job).unwrap();
        assert_eq!(dto.job_status, 2);
        assert_eq!(dto.job_result_code, 530);
        let result = dto.job_result.unwrap();
        assert_eq!(result["errorcode"], 530);
        assert_eq!(result["errortext"], "Failed to disassociate ip address");
    }

    #[tokio::test]
    async fn test_query_unknown_job() {
        let mut jobs = MockAsyncJobRepository::new();
        jobs.expect_find_by_id().returning(|_| Ok(None));
        let generator = ResponseGenerator::new(Arc::new(jobs));

        let job_id = JobId::generate();
        let result = generator.query_job_result(job_id).await;
        assert_eq!(
            result.unwrap_err(),
            ApiError::NotFound(format!("Unable to find async job with id {}", job_id))
        );
    }

    #[tokio::test]
    async fn test_repeated_queries_are_identical() {
        let job = completed_job();
        let job_id = job.id();
        let mut jobs = MockAsyncJobRepository::new();
        jobs.expect_find_by_id()
            .times(2)
            .returning(move |_| Ok(Some(job.clone())));
        let generator = ResponseGenerator::new(Arc::new(jobs));

        let first = generator.query_job_result(job_id).await.unwrap();
        let second = generator.query_job_result(job_id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_list_jobs_filters_by_account() {
        let mine = completed_job();
        let theirs = AsyncJob::new(
            "destroySystemVm",
            AccountId::new(3),
            InstanceType::SystemVm,
            Some(2),
        );
        let mut jobs = MockAsyncJobRepository::new();
        jobs.expect_find_all()
            .returning(move || Ok(vec![mine.clone(), theirs.clone()]));
        let generator = ResponseGenerator::new(Arc::new(jobs));

        assert_eq!(generator.list_jobs(AccountId::new(2)).await.unwrap().len(), 1);
        assert_eq!(generator.list_jobs(AccountId::SYSTEM).await.unwrap().len(), 2);
    }

    #[test]
    fn test_event_type_responses() {
        let dtos = ResponseGenerator::event_type_responses(vec!["A".into(), "B".into()]);
        assert_eq!(dtos.len(), 2);
        assert_eq!(dtos[1].name, "B");
    }
}
