//! Engine bootstrap
//! Wires the in-memory adapters, the job manager and the command registry together

use super::config::EngineConfig;
use super::event_sink::TracingEventSink;
use super::in_memory_inventory::InMemoryInventory;
use super::in_memory_job_repository::InMemoryAsyncJobRepository;
use crate::application::{ApiDispatcher, AsyncJobManager, Collaborators, CommandRegistry};
use crate::domain::ports::ActionEventSink;
use std::sync::Arc;
use tracing::info;

/// A fully wired engine
pub struct Engine {
    pub dispatcher: ApiDispatcher,
    pub jobs: Arc<AsyncJobManager>,
    pub inventory: Arc<InMemoryInventory>,
    pub job_repository: Arc<InMemoryAsyncJobRepository>,
}

/// Build an engine that publishes action events to the log
pub fn build_engine(config: &EngineConfig) -> Result<Engine, String> {
    build_engine_with_events(config, Arc::new(TracingEventSink::new()))
}

/// Build an engine publishing action events to `events`
pub fn build_engine_with_events(
    config: &EngineConfig,
    events: Arc<dyn ActionEventSink>,
) -> Result<Engine, String> {
    config.validate()?;

    let inventory = Arc::new(InMemoryInventory::from_config(config)?);
    let job_repository = Arc::new(InMemoryAsyncJobRepository::new());

    let collaborators = Collaborators {
        management: inventory.clone(),
        resources: inventory.clone(),
        storage: inventory.clone(),
        network: inventory.clone(),
        entities: inventory.clone(),
        jobs: job_repository.clone(),
    };
    let registry = Arc::new(CommandRegistry::new(&collaborators));

    let jobs = Arc::new(AsyncJobManager::new(
        job_repository.clone(),
        events,
        config.jobs.max_concurrent_jobs,
        config.jobs.poll_interval(),
    ));

    info!(
        commands = registry.api_names().len(),
        max_concurrent_jobs = config.jobs.max_concurrent_jobs,
        "Engine ready"
    );

    let dispatcher = ApiDispatcher::new(registry, collaborators.entities, jobs.clone());

    Ok(Engine {
        dispatcher,
        jobs,
        inventory,
        job_repository,
    })
}
