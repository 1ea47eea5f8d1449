//! AsyncJob entity
//! Tracks one asynchronous command from submission to its terminal result

use crate::domain::error::ErrorResponse;
use crate::domain::{AccountId, ApiError, ApiResponse, InstanceType, JobId, JobStatus, Result};
use chrono::{DateTime, Utc};

/// Outcome attached to a terminal job
#[derive(Debug, Clone, PartialEq)]
pub enum JobResult {
    /// The command's own response
    Response(ApiResponse),
    /// The error the command failed with
    Error(ErrorResponse),
}

/// A background job record
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncJob {
    id: JobId,
    api_name: String,
    account_id: AccountId,
    instance_type: InstanceType,
    instance_id: Option<i64>,
    status: JobStatus,
    result_code: u16,
    result: Option<JobResult>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl AsyncJob {
    pub fn new(
        api_name: impl Into<String>,
        account_id: AccountId,
        instance_type: InstanceType,
        instance_id: Option<i64>,
    ) -> Self {
        Self {
            id: JobId::generate(),
            api_name: api_name.into(),
            account_id,
            instance_type,
            instance_id,
            status: JobStatus::Pending,
            result_code: 0,
            result: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    // Getters
    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn instance_type(&self) -> InstanceType {
        self.instance_type
    }

    pub fn instance_id(&self) -> Option<i64> {
        self.instance_id
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn result_code(&self) -> u16 {
        self.result_code
    }

    pub fn result(&self) -> Option<&JobResult> {
        self.result.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    // State transitions
    pub fn mark_running(&mut self) -> Result<()> {
        self.transition(JobStatus::Running)
    }

    /// Attach the command's response and mark the job succeeded
    pub fn complete(&mut self, response: ApiResponse) -> Result<()> {
        self.transition(JobStatus::Succeeded)?;
        self.result_code = 0;
        self.result = Some(JobResult::Response(response));
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Attach the error and mark the job failed
    pub fn fail(&mut self, error: &ApiError) -> Result<()> {
        self.transition(JobStatus::Failed)?;
        let response = error.to_error_response();
        self.result_code = response.error_code;
        self.result = Some(JobResult::Error(response));
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    fn transition(&mut self, next: JobStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(ApiError::Internal(format!(
                "Invalid job state transition from {} to {} for job {}",
                self.status, next, self.id
            )));
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::responses::SuccessResponse;
    use crate::domain::ResponsePayload;

    fn job() -> AsyncJob {
        AsyncJob::new(
            "disassociateIpAddress",
            AccountId::new(5),
            InstanceType::IpAddress,
            Some(12),
        )
    }

    #[test]
    fn test_new_job_is_pending() {
        let job = job();
        assert_eq!(job.status(), JobStatus::Pending);
        assert_eq!(job.result_code(), 0);
        assert!(job.result().is_none());
        assert!(job.completed_at().is_none());
        assert_eq!(job.instance_id(), Some(12));
    }

    #[test]
    fn test_complete_after_running() {
        let mut job = job();
        job.mark_running().unwrap();

        let response = ApiResponse::new(
            "disassociateipaddressresponse",
            ResponsePayload::Success(SuccessResponse::ok()),
        );
        job.complete(response.clone()).unwrap();

        assert_eq!(job.status(), JobStatus::Succeeded);
        assert_eq!(job.result(), Some(&JobResult::Response(response)));
        assert!(job.completed_at().is_some());
    }

    #[test]
    fn test_fail_records_error_code() {
        let mut job = job();
        job.mark_running().unwrap();
        job.fail(&ApiError::OperationFailed("Failed to disassociate ip address".into()))
            .unwrap();

        assert_eq!(job.status(), JobStatus::Failed);
        assert_eq!(job.result_code(), 530);
        match job.result() {
            Some(JobResult::Error(err)) => {
                assert_eq!(err.error_text, "Failed to disassociate ip address")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_pending_job_can_fail_directly() {
        let mut job = job();
        assert!(job.fail(&ApiError::OperationFailed("cancelled".into())).is_ok());
        assert_eq!(job.status(), JobStatus::Failed);
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut job = job();
        let response = ApiResponse::new(
            "x",
            ResponsePayload::Success(SuccessResponse::ok()),
        );
        assert!(job.complete(response).is_err());

        job.mark_running().unwrap();
        assert!(job.mark_running().is_err());
    }
}
