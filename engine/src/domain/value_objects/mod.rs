//! Value objects
//! Immutable, identity-less types shared across the domain

mod account_id;
mod instance_type;
mod job_id;
mod job_status;
mod storage_pool_status;
mod system_vm;

pub use account_id::AccountId;
pub use instance_type::InstanceType;
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use storage_pool_status::StoragePoolStatus;
pub use system_vm::{SystemVmState, SystemVmType};
