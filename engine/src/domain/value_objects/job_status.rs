//! JobStatus value object
//! Lifecycle state of an async job

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum JobStatus {
    /// Job recorded, waiting for a worker
    #[default]
    Pending,

    /// A worker is executing the command
    Running,

    /// Command returned a response
    Succeeded,

    /// Command returned an error, or never ran
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }

    /// Wire status code: 0 in progress, 1 succeeded, 2 failed
    pub fn code(&self) -> i32 {
        match self {
            JobStatus::Pending | JobStatus::Running => 0,
            JobStatus::Succeeded => 1,
            JobStatus::Failed => 2,
        }
    }

    /// Validate state transition
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        use JobStatus::*;

        matches!(
            (self, next),
            (Pending, Running) | (Pending, Failed) | (Running, Succeeded) | (Running, Failed)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Succeeded => write!(f, "succeeded"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}
