//! Audit events emitted around async command execution

use crate::domain::{AccountId, JobId};
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionEventState {
    Scheduled,
    Started,
    Completed,
    Failed,
}

impl fmt::Display for ActionEventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionEventState::Scheduled => write!(f, "Scheduled"),
            ActionEventState::Started => write!(f, "Started"),
            ActionEventState::Completed => write!(f, "Completed"),
            ActionEventState::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    pub account_id: AccountId,
    pub event_type: String,
    pub description: String,
    pub state: ActionEventState,
    pub job_id: Option<JobId>,
}

/// Destination for audit events. Publishing never fails the caller.
#[async_trait]
pub trait ActionEventSink: Send + Sync {
    async fn publish(&self, event: ActionEvent);
}
