//! Domain entities

mod async_job;
mod capabilities;
mod inventory;
mod permission_update;
mod ssh_key_pair;

pub use async_job::{AsyncJob, JobResult};
pub use capabilities::Capabilities;
pub use inventory::{Cluster, IpAddress, StoragePool, SystemVm, Template, VirtualMachine};
pub use permission_update::{PermissionOperation, PermissionUpdate};
pub use ssh_key_pair::SshKeyPair;
