//! Action event sinks

use crate::domain::ports::{ActionEvent, ActionEventSink, ActionEventState};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Writes one structured log line per event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActionEventSink for TracingEventSink {
    async fn publish(&self, event: ActionEvent) {
        let job_id = event.job_id.map(|id| id.to_string()).unwrap_or_default();
        match event.state {
            ActionEventState::Failed => warn!(
                account = %event.account_id,
                event_type = %event.event_type,
                state = %event.state,
                job_id = %job_id,
                "{}",
                event.description
            ),
            _ => info!(
                account = %event.account_id,
                event_type = %event.event_type,
                state = %event.state,
                job_id = %job_id,
                "{}",
                event.description
            ),
        }
    }
}

/// Keeps every published event in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<ActionEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events published so far, in order
    pub fn events(&self) -> Vec<ActionEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl ActionEventSink for RecordingEventSink {
    async fn publish(&self, event: ActionEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
