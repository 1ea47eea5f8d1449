//! API commands
//!
//! A `CommandFactory` publishes a command's parameter schema and builds a request-scoped
//! command from bound parameters. The command performs one unit of work against its
//! collaborator and returns a tagged `ApiResponse`.

pub mod create_ssh_key_pair;
pub mod delete_cluster;
pub mod delete_ssh_key_pair;
pub mod delete_storage_pool;
pub mod destroy_system_vm;
pub mod disassociate_ip_address;
pub mod get_vm_password;
pub mod list_async_jobs;
pub mod list_capabilities;
pub mod list_event_types;
pub mod list_ssh_key_pairs;
pub mod query_async_job_result;
pub mod register_ssh_key_pair;
pub mod update_permissions;

pub use create_ssh_key_pair::CreateSshKeyPairFactory;
pub use delete_cluster::DeleteClusterFactory;
pub use delete_ssh_key_pair::DeleteSshKeyPairFactory;
pub use delete_storage_pool::DeleteStoragePoolFactory;
pub use destroy_system_vm::DestroySystemVmFactory;
pub use disassociate_ip_address::DisassociateIpAddressFactory;
pub use get_vm_password::GetVmPasswordFactory;
pub use list_async_jobs::ListAsyncJobsFactory;
pub use list_capabilities::ListCapabilitiesFactory;
pub use list_event_types::ListEventTypesFactory;
pub use list_ssh_key_pairs::ListSshKeyPairsFactory;
pub use query_async_job_result::QueryAsyncJobResultFactory;
pub use register_ssh_key_pair::RegisterSshKeyPairFactory;
pub use update_permissions::{PermissionTarget, UpdatePermissionsFactory};

use crate::domain::{
    ApiResponse, BoundParams, CallContext, InstanceType, OwnerRule, ParamSpec, Result,
};
use async_trait::async_trait;
use std::fmt;

/// A bound, request-scoped command
#[async_trait]
pub trait ApiCommand: Send + Sync {
    /// Fixed response name, also used as the log correlation field
    fn command_name(&self) -> &'static str;

    /// How the owning account is attributed. Must not have side effects.
    fn owner_rule(&self) -> OwnerRule;

    /// Perform the command's single backing operation
    async fn execute(&self) -> Result<ApiResponse>;
}

/// A command executed as a tracked background job
pub trait AsyncApiCommand: ApiCommand {
    fn event_type(&self) -> &'static str;

    fn event_description(&self) -> String;

    fn instance_type(&self) -> InstanceType;

    fn instance_id(&self) -> Option<i64>;
}

/// Output of a factory: either executed inline or handed to the job manager
pub enum BoundCommand {
    Sync(Box<dyn ApiCommand>),
    Async(Box<dyn AsyncApiCommand>),
}

impl BoundCommand {
    pub fn command_name(&self) -> &'static str {
        match self {
            BoundCommand::Sync(command) => command.command_name(),
            BoundCommand::Async(command) => command.command_name(),
        }
    }

    pub fn owner_rule(&self) -> OwnerRule {
        match self {
            BoundCommand::Sync(command) => command.owner_rule(),
            BoundCommand::Async(command) => command.owner_rule(),
        }
    }

    pub fn is_async(&self) -> bool {
        matches!(self, BoundCommand::Async(_))
    }

    /// Execute inline regardless of mode
    pub async fn execute(&self) -> Result<ApiResponse> {
        match self {
            BoundCommand::Sync(command) => command.execute().await,
            BoundCommand::Async(command) => command.execute().await,
        }
    }
}

impl fmt::Debug for BoundCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.is_async() { "Async" } else { "Sync" };
        f.debug_tuple(mode).field(&self.command_name()).finish()
    }
}

/// Builds one kind of command from validated parameters
#[async_trait]
pub trait CommandFactory: Send + Sync {
    /// Wire API name, e.g. `deleteCluster`
    fn api_name(&self) -> &'static str;

    fn parameters(&self) -> &'static [ParamSpec];

    /// Build a command. May perform read-only lookups.
    async fn build(&self, params: &BoundParams, ctx: &CallContext) -> Result<BoundCommand>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::domain::RequestBinder;
    use std::collections::HashMap;

    pub fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Bind `pairs` against the factory's schema and build the command
    pub async fn build(
        factory: &dyn CommandFactory,
        pairs: &[(&str, &str)],
        ctx: CallContext,
    ) -> Result<BoundCommand> {
        let params = RequestBinder::bind(factory.parameters(), &raw(pairs))?;
        factory.build(&params, &ctx).await
    }
}
