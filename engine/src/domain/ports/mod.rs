//! Ports
//! Interfaces to the collaborators commands delegate to; implementations live in
//! the infrastructure layer

pub mod action_event_sink;
pub mod async_job_repository;
pub mod entity_lookup;
pub mod management_service;
pub mod network_service;
pub mod resource_service;
pub mod storage_service;

pub use action_event_sink::{ActionEvent, ActionEventSink, ActionEventState};
pub use async_job_repository::AsyncJobRepository;
pub use entity_lookup::EntityLookup;
pub use management_service::ManagementService;
pub use network_service::NetworkService;
pub use resource_service::ResourceService;
pub use storage_service::StorageService;

#[cfg(test)]
pub use async_job_repository::MockAsyncJobRepository;
#[cfg(test)]
pub use entity_lookup::MockEntityLookup;
#[cfg(test)]
pub use management_service::MockManagementService;
#[cfg(test)]
pub use network_service::MockNetworkService;
#[cfg(test)]
pub use resource_service::MockResourceService;
#[cfg(test)]
pub use storage_service::MockStorageService;
