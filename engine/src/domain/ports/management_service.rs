//! Management server port
//! Key pairs, system VMs, VM passwords, capabilities and template visibility

use crate::domain::{
    AccountId, Capabilities, PermissionUpdate, Result, SshKeyPair, SystemVm, SystemVmType,
};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagementService: Send + Sync {
    /// Generate a new key pair; `None` when the pair could not be created
    async fn create_ssh_key_pair(
        &self,
        account_id: AccountId,
        name: &str,
    ) -> Result<Option<SshKeyPair>>;

    /// Register an existing public key; `None` when it could not be registered
    async fn register_ssh_key_pair(
        &self,
        account_id: AccountId,
        name: &str,
        public_key: &str,
    ) -> Result<Option<SshKeyPair>>;

    async fn delete_ssh_key_pair(&self, account_id: AccountId, name: &str) -> Result<bool>;

    /// Key pairs of an account, optionally filtered by name and fingerprint
    async fn list_ssh_key_pairs(
        &self,
        account_id: AccountId,
        name: Option<String>,
        fingerprint: Option<String>,
    ) -> Result<Vec<SshKeyPair>>;

    /// Destroy a system VM; `None` when nothing was destroyed
    async fn destroy_system_vm(&self, id: i64) -> Result<Option<SystemVm>>;

    async fn find_system_vm_type(&self, id: i64) -> Result<Option<SystemVmType>>;

    async fn get_vm_password(&self, vm_id: i64) -> Result<Option<String>>;

    async fn list_capabilities(&self) -> Result<Capabilities>;

    async fn list_event_types(&self) -> Result<Vec<String>>;

    /// Apply a visibility change to a template or ISO
    async fn update_template_permissions(&self, update: PermissionUpdate) -> Result<bool>;
}
