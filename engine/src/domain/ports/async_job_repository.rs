//! Repository port for async job records
//! This is an interface - implementations are in infrastructure layer

use crate::domain::{AsyncJob, JobId, Result};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AsyncJobRepository: Send + Sync {
    /// Save a job (create or update)
    async fn save(&self, job: AsyncJob) -> Result<()>;

    /// Find a job by ID
    async fn find_by_id(&self, id: JobId) -> Result<Option<AsyncJob>>;

    /// List all jobs, oldest first
    async fn find_all(&self) -> Result<Vec<AsyncJob>>;
}
