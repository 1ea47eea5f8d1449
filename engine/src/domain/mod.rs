pub mod commands;
pub mod entities;
pub mod error;
pub mod event_types;
pub mod ownership;
pub mod params;
pub mod ports;
pub mod responses;
pub mod services;
pub mod value_objects;

pub use commands::{ApiCommand, AsyncApiCommand, BoundCommand, CommandFactory};
pub use entities::{
    AsyncJob, Capabilities, Cluster, IpAddress, JobResult, PermissionOperation, PermissionUpdate,
    SshKeyPair, StoragePool, SystemVm, Template, VirtualMachine,
};
pub use error::{ApiError, ApiErrorCode, Result};
pub use ownership::{CallContext, EntityKind, EntityRef, OwnerRule};
pub use params::{BoundParams, ParamSpec, ParamType, ParamValue, RequestBinder};
pub use responses::{ApiResponse, ResponsePayload};
pub use value_objects::{
    AccountId, InstanceType, JobId, JobStatus, StoragePoolStatus, SystemVmState, SystemVmType,
};
