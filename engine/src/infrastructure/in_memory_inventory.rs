//! In-Memory Inventory
//! Backs every collaborator port with one lock-protected state seeded from configuration

use super::config::EngineConfig;
use super::ssh_keys;
use crate::domain::{
    event_types,
    ports::{EntityLookup, ManagementService, NetworkService, ResourceService, StorageService},
    AccountId, ApiError, Capabilities, Cluster, EntityKind, EntityRef, IpAddress,
    PermissionOperation, PermissionUpdate, Result, SshKeyPair, StoragePool, StoragePoolStatus,
    SystemVm, SystemVmState, SystemVmType, Template, VirtualMachine,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct InventoryState {
    clusters: BTreeMap<i64, Cluster>,
    storage_pools: BTreeMap<i64, StoragePool>,
    system_vms: BTreeMap<i64, SystemVm>,
    virtual_machines: BTreeMap<i64, VirtualMachine>,
    ip_addresses: BTreeMap<i64, IpAddress>,
    templates: BTreeMap<i64, Template>,
    /// Stored without private key material
    key_pairs: Vec<SshKeyPair>,
}

impl InventoryState {
    fn key_pair_exists(&self, account_id: AccountId, name: &str) -> bool {
        self.key_pairs
            .iter()
            .any(|kp| kp.account_id == account_id && kp.name == name)
    }

    fn fingerprint_exists(&self, account_id: AccountId, fingerprint: &str) -> bool {
        self.key_pairs
            .iter()
            .any(|kp| kp.account_id == account_id && kp.fingerprint == fingerprint)
    }
}

/// Thread-safe in-memory implementation of the collaborator ports
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    state: Arc<RwLock<InventoryState>>,
    capabilities: Capabilities,
}

fn poisoned<T>(_: T) -> ApiError {
    ApiError::Internal("inventory lock poisoned".to_string())
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the inventory described by `config`
    ///
    /// Seeded public keys are validated the same way `registerSSHKeyPair` validates them.
    pub fn from_config(config: &EngineConfig) -> std::result::Result<Self, String> {
        let inventory = &config.inventory;
        let mut state = InventoryState {
            clusters: by_id(&inventory.clusters, |c| c.id),
            storage_pools: by_id(&inventory.storage_pools, |p| p.id),
            system_vms: by_id(&inventory.system_vms, |v| v.id),
            virtual_machines: by_id(&inventory.virtual_machines, |v| v.id),
            ip_addresses: by_id(&inventory.ip_addresses, |ip| ip.id),
            templates: by_id(&inventory.templates, |t| t.id),
            key_pairs: Vec::new(),
        };

        for seed in &inventory.key_pairs {
            let parsed = ssh_keys::parse_public_key(&seed.public_key)
                .map_err(|e| format!("Key pair '{}': {}", seed.name, e))?;
            if state.fingerprint_exists(seed.account_id, &parsed.fingerprint) {
                return Err(format!(
                    "Key pair '{}': public key already registered for account {}",
                    seed.name, seed.account_id
                ));
            }
            state.key_pairs.push(SshKeyPair {
                name: seed.name.clone(),
                account_id: seed.account_id,
                fingerprint: parsed.fingerprint,
                public_key: parsed.public_key,
                private_key: None,
            });
        }

        info!(
            clusters = state.clusters.len(),
            storage_pools = state.storage_pools.len(),
            system_vms = state.system_vms.len(),
            virtual_machines = state.virtual_machines.len(),
            ip_addresses = state.ip_addresses.len(),
            templates = state.templates.len(),
            key_pairs = state.key_pairs.len(),
            "Loaded inventory"
        );

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            capabilities: config.capabilities.clone(),
        })
    }

    pub fn cluster(&self, id: i64) -> Result<Option<Cluster>> {
        Ok(self.state.read().map_err(poisoned)?.clusters.get(&id).cloned())
    }

    pub fn system_vm(&self, id: i64) -> Result<Option<SystemVm>> {
        Ok(self.state.read().map_err(poisoned)?.system_vms.get(&id).cloned())
    }

    pub fn ip_address(&self, id: i64) -> Result<Option<IpAddress>> {
        Ok(self.state.read().map_err(poisoned)?.ip_addresses.get(&id).cloned())
    }

    pub fn template(&self, id: i64) -> Result<Option<Template>> {
        Ok(self.state.read().map_err(poisoned)?.templates.get(&id).cloned())
    }
}

fn by_id<T: Clone>(items: &[T], id: impl Fn(&T) -> i64) -> BTreeMap<i64, T> {
    items.iter().map(|item| (id(item), item.clone())).collect()
}

fn apply_list(current: &mut Vec<String>, values: &[String], operation: PermissionOperation) {
    match operation {
        PermissionOperation::Add => {
            for value in values {
                if !current.contains(value) {
                    current.push(value.clone());
                }
            }
        }
        PermissionOperation::Remove => current.retain(|value| !values.contains(value)),
        PermissionOperation::Reset => current.clear(),
    }
}

#[async_trait]
impl ManagementService for InMemoryInventory {
    async fn create_ssh_key_pair(
        &self,
        account_id: AccountId,
        name: &str,
    ) -> Result<Option<SshKeyPair>> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.key_pair_exists(account_id, name) {
            return Err(ApiError::Validation(format!(
                "A key pair with name '{}' already exists.",
                name
            )));
        }

        let generated = match ssh_keys::generate_key_pair() {
            Ok(generated) => generated,
            Err(e) => {
                warn!(account_id = %account_id, name, error = %e, "Key generation failed");
                return Ok(None);
            }
        };

        let key_pair = SshKeyPair {
            name: name.to_string(),
            account_id,
            fingerprint: generated.fingerprint,
            public_key: generated.public_key,
            private_key: Some(generated.private_key),
        };
        state.key_pairs.push(key_pair.without_private_key());

        debug!(
            account_id = %account_id,
            name,
            fingerprint = %key_pair.fingerprint,
            "Created key pair"
        );
        Ok(Some(key_pair))
    }

    async fn register_ssh_key_pair(
        &self,
        account_id: AccountId,
        name: &str,
        public_key: &str,
    ) -> Result<Option<SshKeyPair>> {
        let parsed = ssh_keys::parse_public_key(public_key)
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        let mut state = self.state.write().map_err(poisoned)?;
        if state.key_pair_exists(account_id, name) {
            return Err(ApiError::Validation(format!(
                "A key pair with name '{}' already exists.",
                name
            )));
        }
        if state.fingerprint_exists(account_id, &parsed.fingerprint) {
            return Err(ApiError::Validation(format!(
                "A key pair with fingerprint '{}' already exists.",
                parsed.fingerprint
            )));
        }

        let key_pair = SshKeyPair {
            name: name.to_string(),
            account_id,
            fingerprint: parsed.fingerprint,
            public_key: parsed.public_key,
            private_key: None,
        };
        state.key_pairs.push(key_pair.clone());

        debug!(account_id = %account_id, name, "Registered key pair");
        Ok(Some(key_pair))
    }

    async fn delete_ssh_key_pair(&self, account_id: AccountId, name: &str) -> Result<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        let before = state.key_pairs.len();
        state
            .key_pairs
            .retain(|kp| !(kp.account_id == account_id && kp.name == name));
        Ok(state.key_pairs.len() < before)
    }

    async fn list_ssh_key_pairs(
        &self,
        account_id: AccountId,
        name: Option<String>,
        fingerprint: Option<String>,
    ) -> Result<Vec<SshKeyPair>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .key_pairs
            .iter()
            .filter(|kp| account_id.is_system() || kp.account_id == account_id)
            .filter(|kp| name.as_deref().map_or(true, |n| kp.name == n))
            .filter(|kp| fingerprint.as_deref().map_or(true, |f| kp.fingerprint == f))
            .cloned()
            .collect())
    }

    async fn destroy_system_vm(&self, id: i64) -> Result<Option<SystemVm>> {
        let mut state = self.state.write().map_err(poisoned)?;
        match state.system_vms.get_mut(&id) {
            Some(vm) if vm.state.can_destroy() => {
                vm.state = SystemVmState::Destroyed;
                info!(system_vm_id = id, name = %vm.name, "Destroyed system VM");
                Ok(Some(vm.clone()))
            }
            Some(vm) => {
                debug!(system_vm_id = id, state = %vm.state, "System VM cannot be destroyed");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn find_system_vm_type(&self, id: i64) -> Result<Option<SystemVmType>> {
        Ok(self.system_vm(id)?.map(|vm| vm.vm_type))
    }

    async fn get_vm_password(&self, vm_id: i64) -> Result<Option<String>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .virtual_machines
            .get(&vm_id)
            .and_then(|vm| vm.password.clone()))
    }

    async fn list_capabilities(&self) -> Result<Capabilities> {
        Ok(self.capabilities.clone())
    }

    async fn list_event_types(&self) -> Result<Vec<String>> {
        Ok(event_types::ALL.iter().map(|s| s.to_string()).collect())
    }

    async fn update_template_permissions(&self, update: PermissionUpdate) -> Result<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        let template = match state.templates.get_mut(&update.id) {
            Some(template) if template.is_iso == (update.kind == EntityKind::Iso) => template,
            _ => return Ok(false),
        };

        if let Some(is_public) = update.is_public {
            template.is_public = is_public;
        }
        if let Some(is_featured) = update.is_featured {
            template.is_featured = is_featured;
        }
        if let Some(is_extractable) = update.is_extractable {
            template.is_extractable = is_extractable;
        }
        if let Some(operation) = update.operation {
            apply_list(&mut template.launch_accounts, &update.accounts, operation);
            apply_list(&mut template.launch_projects, &update.project_ids, operation);
        }

        debug!(template_id = update.id, kind = %update.kind, "Updated permissions");
        Ok(true)
    }
}

#[async_trait]
impl ResourceService for InMemoryInventory {
    async fn delete_cluster(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.clusters.remove(&id).is_some())
    }
}

#[async_trait]
impl StorageService for InMemoryInventory {
    async fn delete_pool(&self, id: i64, forced: bool) -> Result<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(pool) = state.storage_pools.get(&id) else {
            return Ok(false);
        };

        // A removed pool is left behind for cleanup
        if pool.status == StoragePoolStatus::Removed {
            return Ok(false);
        }
        if pool.volumes > 0 && !forced {
            debug!(pool_id = id, volumes = pool.volumes, "Pool still has volumes");
            return Ok(false);
        }

        state.storage_pools.remove(&id);
        Ok(true)
    }

    async fn get_storage_pool(&self, id: i64) -> Result<Option<StoragePool>> {
        Ok(self.state.read().map_err(poisoned)?.storage_pools.get(&id).cloned())
    }
}

#[async_trait]
impl NetworkService for InMemoryInventory {
    async fn disassociate_ip_address(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        let releasable = state
            .ip_addresses
            .get(&id)
            .map_or(false, |ip| !ip.source_nat);
        if releasable {
            state.ip_addresses.remove(&id);
        }
        Ok(releasable)
    }
}

#[async_trait]
impl EntityLookup for InMemoryInventory {
    async fn find_owner(&self, entity: EntityRef) -> Result<Option<AccountId>> {
        let state = self.state.read().map_err(poisoned)?;
        let owner = match entity.kind {
            EntityKind::Template | EntityKind::Iso => state
                .templates
                .get(&entity.id)
                .filter(|t| t.is_iso == (entity.kind == EntityKind::Iso))
                .map(|t| t.account_id),
            EntityKind::VirtualMachine => {
                state.virtual_machines.get(&entity.id).map(|vm| vm.account_id)
            }
            EntityKind::IpAddress => state.ip_addresses.get(&entity.id).map(|ip| ip.account_id),
            EntityKind::SystemVm => state
                .system_vms
                .contains_key(&entity.id)
                .then_some(AccountId::SYSTEM),
            EntityKind::StoragePool => state
                .storage_pools
                .contains_key(&entity.id)
                .then_some(AccountId::SYSTEM),
            EntityKind::Cluster => state
                .clusters
                .contains_key(&entity.id)
                .then_some(AccountId::SYSTEM),
        };
        Ok(owner)
    }
}
