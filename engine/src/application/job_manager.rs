//! Async job manager
//!
//! Records a `Pending` job before returning to the dispatcher, then runs the command on a
//! tokio worker bounded by a semaphore. Jobs still waiting for a worker slot at shutdown
//! are failed without executing; running jobs are awaited.
//!
//! A job whose running or final state cannot be saved is failed with an internal error.
//! If that record cannot be saved either, the stored job keeps its last saved state and
//! pollers only see it time out.

use crate::constants::jobs::{DEFAULT_MAX_CONCURRENT_JOBS, DEFAULT_POLL_INTERVAL_MS};
use crate::domain::commands::AsyncApiCommand;
use crate::domain::ports::{ActionEvent, ActionEventSink, ActionEventState, AsyncJobRepository};
use crate::domain::{AccountId, ApiError, ApiResponse, AsyncJob, JobId, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

const CANCELLED_MESSAGE: &str = "Job cancelled before execution";

pub struct AsyncJobManager {
    repository: Arc<dyn AsyncJobRepository>,
    events: Arc<dyn ActionEventSink>,
    permits: Arc<Semaphore>,
    cancellation_token: CancellationToken,
    tracker: TaskTracker,
    poll_interval: Duration,
}

impl AsyncJobManager {
    pub fn new(
        repository: Arc<dyn AsyncJobRepository>,
        events: Arc<dyn ActionEventSink>,
        max_concurrent_jobs: usize,
        poll_interval: Duration,
    ) -> Self {
        Self {
            repository,
            events,
            permits: Arc::new(Semaphore::new(max_concurrent_jobs.max(1))),
            cancellation_token: CancellationToken::new(),
            tracker: TaskTracker::new(),
            poll_interval,
        }
    }

    /// Manager with the default worker count and poll interval
    pub fn with_defaults(
        repository: Arc<dyn AsyncJobRepository>,
        events: Arc<dyn ActionEventSink>,
    ) -> Self {
        Self::new(
            repository,
            events,
            DEFAULT_MAX_CONCURRENT_JOBS,
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        )
    }

    /// Record a pending job for `command` and schedule it on a worker
    ///
    /// The job is saved before this returns, so it is immediately queryable.
    pub async fn submit(
        &self,
        api_name: &str,
        owner: AccountId,
        command: Box<dyn AsyncApiCommand>,
    ) -> Result<AsyncJob> {
        if self.cancellation_token.is_cancelled() {
            return Err(ApiError::OperationFailed(
                "Job manager is shutting down".to_string(),
            ));
        }

        let job = AsyncJob::new(
            api_name,
            owner,
            command.instance_type(),
            command.instance_id(),
        );
        self.repository.save(job.clone()).await?;

        info!(
            job_id = %job.id(),
            api = api_name,
            owner = %owner,
            instance_type = %job.instance_type(),
            instance_id = ?job.instance_id(),
            "Async job scheduled"
        );

        let worker = JobWorker {
            repository: self.repository.clone(),
            events: self.events.clone(),
            event_type: command.event_type(),
            description: command.event_description(),
            command,
        };
        worker.publish(&job, ActionEventState::Scheduled).await;

        let permits = self.permits.clone();
        let cancellation_token = self.cancellation_token.clone();
        let scheduled = job.clone();
        self.tracker.spawn(async move {
            worker.run(scheduled, permits, cancellation_token).await;
        });

        Ok(job)
    }

    /// Poll until the job is terminal or `timeout` elapses
    pub async fn wait_for_completion(&self, job_id: JobId, timeout: Duration) -> Result<AsyncJob> {
        let deadline = Instant::now() + timeout;

        loop {
            match self.repository.find_by_id(job_id).await? {
                Some(job) if job.is_terminal() => return Ok(job),
                Some(_) => {}
                None => {
                    return Err(ApiError::NotFound(format!(
                        "Unable to find async job with id {}",
                        job_id
                    )))
                }
            }

            if Instant::now() >= deadline {
                return Err(ApiError::OperationFailed(format!(
                    "Timed out waiting for async job {}",
                    job_id
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Fail jobs still waiting for a worker and wait for running jobs to finish
    pub async fn shutdown(&self) {
        info!(in_flight = self.tracker.len(), "Shutting down async job manager");
        self.cancellation_token.cancel();
        self.tracker.close();
        self.tracker.wait().await;
        info!("Async job manager stopped");
    }
}

struct JobWorker {
    repository: Arc<dyn AsyncJobRepository>,
    events: Arc<dyn ActionEventSink>,
    event_type: &'static str,
    description: String,
    command: Box<dyn AsyncApiCommand>,
}

impl JobWorker {
    async fn run(
        self,
        mut job: AsyncJob,
        permits: Arc<Semaphore>,
        cancellation_token: CancellationToken,
    ) {
        let permit = tokio::select! {
            biased;
            _ = cancellation_token.cancelled() => None,
            permit = permits.acquire_owned() => permit.ok(),
        };
        let Some(_permit) = permit else {
            warn!(job_id = %job.id(), "Async job cancelled before execution");
            let cancelled = ApiError::OperationFailed(CANCELLED_MESSAGE.to_string());
            self.finish(&mut job, Err(cancelled)).await;
            return;
        };

        if let Err(e) = job.mark_running() {
            error!(job_id = %job.id(), error = %e, "Failed to start async job");
            return;
        }
        if let Err(e) = self.repository.save(job.clone()).await {
            error!(job_id = %job.id(), error = %e, "Failed to save running async job");
            let failure = ApiError::Internal(format!("Failed to start async job: {}", e));
            self.finish(&mut job, Err(failure)).await;
            return;
        }
        self.publish(&job, ActionEventState::Started).await;

        debug!(
            job_id = %job.id(),
            command = self.command.command_name(),
            "Executing async job"
        );
        let outcome = self.command.execute().await;
        self.finish(&mut job, outcome).await;
    }

    async fn finish(&self, job: &mut AsyncJob, outcome: Result<ApiResponse>) {
        let unfinished = job.clone();
        let (transition, mut state) = match outcome {
            Ok(response) => (job.complete(response), ActionEventState::Completed),
            Err(e) => {
                warn!(job_id = %job.id(), error = %e, "Async job failed");
                (job.fail(&e), ActionEventState::Failed)
            }
        };

        if let Err(e) = transition {
            error!(job_id = %job.id(), error = %e, "Failed to record async job result");
            return;
        }
        if let Err(e) = self.repository.save(job.clone()).await {
            error!(job_id = %job.id(), error = %e, "Failed to save async job result");
            if !self.record_failure(job, unfinished, e).await {
                return;
            }
            state = ActionEventState::Failed;
        }

        info!(
            job_id = %job.id(),
            status = %job.status(),
            result_code = job.result_code(),
            "Async job finished"
        );
        self.publish(job, state).await;
    }

    /// Replace a result that could not be saved with an internal failure
    ///
    /// Returns false when the failure record cannot be saved either; the stored job then
    /// stays in its last saved state.
    async fn record_failure(
        &self,
        job: &mut AsyncJob,
        mut unfinished: AsyncJob,
        cause: ApiError,
    ) -> bool {
        let failure = ApiError::Internal(format!("Failed to save async job result: {}", cause));
        if let Err(e) = unfinished.fail(&failure) {
            error!(job_id = %job.id(), error = %e, "Failed to record async job failure");
            return false;
        }
        if let Err(e) = self.repository.save(unfinished.clone()).await {
            error!(
                job_id = %job.id(),
                error = %e,
                "Failed to save async job failure, job left unfinished"
            );
            return false;
        }

        *job = unfinished;
        true
    }

    async fn publish(&self, job: &AsyncJob, state: ActionEventState) {
        self.events
            .publish(ActionEvent {
                account_id: job.account_id(),
                event_type: self.event_type.to_string(),
                description: self.description.clone(),
                state,
                job_id: Some(job.id()),
            })
            .await;
    }
}
