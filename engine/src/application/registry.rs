//! Command Registry
//! Central composition root for all API commands (Dependency Injection container)

use crate::domain::commands::{
    CommandFactory, CreateSshKeyPairFactory, DeleteClusterFactory, DeleteSshKeyPairFactory,
    DeleteStoragePoolFactory, DestroySystemVmFactory, DisassociateIpAddressFactory,
    GetVmPasswordFactory, ListAsyncJobsFactory, ListCapabilitiesFactory, ListEventTypesFactory,
    ListSshKeyPairsFactory, QueryAsyncJobResultFactory, RegisterSshKeyPairFactory,
    UpdatePermissionsFactory,
};
use crate::domain::ports::{
    AsyncJobRepository, EntityLookup, ManagementService, NetworkService, ResourceService,
    StorageService,
};
use crate::domain::services::ResponseGenerator;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Backing collaborators the commands delegate to
#[derive(Clone)]
pub struct Collaborators {
    pub management: Arc<dyn ManagementService>,
    pub resources: Arc<dyn ResourceService>,
    pub storage: Arc<dyn StorageService>,
    pub network: Arc<dyn NetworkService>,
    pub entities: Arc<dyn EntityLookup>,
    pub jobs: Arc<dyn AsyncJobRepository>,
}

/// Registry of command factories keyed by API name
/// This is the composition root where dependencies are wired together
pub struct CommandRegistry {
    factories: HashMap<&'static str, Arc<dyn CommandFactory>>,
}

impl CommandRegistry {
    /// Create a registry with every API command wired to `collaborators`
    pub fn new(collaborators: &Collaborators) -> Self {
        let management = &collaborators.management;
        let responses = Arc::new(ResponseGenerator::new(collaborators.jobs.clone()));

        let factories: Vec<Arc<dyn CommandFactory>> = vec![
            // Key pairs
            Arc::new(CreateSshKeyPairFactory::new(management.clone())),
            Arc::new(RegisterSshKeyPairFactory::new(management.clone())),
            Arc::new(DeleteSshKeyPairFactory::new(management.clone())),
            Arc::new(ListSshKeyPairsFactory::new(management.clone())),
            // Virtual machines
            Arc::new(DestroySystemVmFactory::new(management.clone())),
            Arc::new(GetVmPasswordFactory::new(management.clone())),
            // Server metadata
            Arc::new(ListCapabilitiesFactory::new(management.clone())),
            Arc::new(ListEventTypesFactory::new(management.clone())),
            // Image visibility
            Arc::new(UpdatePermissionsFactory::templates(management.clone())),
            Arc::new(UpdatePermissionsFactory::isos(management.clone())),
            // Infrastructure
            Arc::new(DeleteClusterFactory::new(collaborators.resources.clone())),
            Arc::new(DeleteStoragePoolFactory::new(collaborators.storage.clone())),
            Arc::new(DisassociateIpAddressFactory::new(
                collaborators.network.clone(),
            )),
            // Jobs
            Arc::new(QueryAsyncJobResultFactory::new(responses.clone())),
            Arc::new(ListAsyncJobsFactory::new(responses)),
        ];

        let mut registry = Self::empty();
        for factory in factories {
            registry.register(factory);
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory, replacing any factory with the same API name
    pub fn register(&mut self, factory: Arc<dyn CommandFactory>) {
        debug!(api = factory.api_name(), "Registering command");
        self.factories.insert(factory.api_name(), factory);
    }

    pub fn get(&self, api_name: &str) -> Option<Arc<dyn CommandFactory>> {
        self.factories.get(api_name).cloned()
    }

    /// Registered API names, sorted
    pub fn api_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
