//! In-Memory Async Job Repository
//! Thread-safe implementation of AsyncJobRepository port

use crate::domain::{ports::AsyncJobRepository, ApiError, AsyncJob, JobId, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Thread-safe in-memory job repository
#[derive(Clone, Default)]
pub struct InMemoryAsyncJobRepository {
    jobs: Arc<RwLock<HashMap<JobId, AsyncJob>>>,
}

impl InMemoryAsyncJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> ApiError {
    ApiError::Internal("job repository lock poisoned".to_string())
}

#[async_trait]
impl AsyncJobRepository for InMemoryAsyncJobRepository {
    async fn save(&self, job: AsyncJob) -> Result<()> {
        let mut jobs = self.jobs.write().map_err(poisoned)?;

        debug!(
            job_id = %job.id(),
            status = %job.status(),
            total_jobs = jobs.len(),
            "Saving async job"
        );
        jobs.insert(job.id(), job);

        Ok(())
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<AsyncJob>> {
        let jobs = self.jobs.read().map_err(poisoned)?;
        Ok(jobs.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<AsyncJob>> {
        let jobs = self.jobs.read().map_err(poisoned)?;
        let mut all: Vec<_> = jobs.values().cloned().collect();
        all.sort_by_key(|job| job.created_at());
        Ok(all)
    }
}
