//! InstanceType value object
//! Kind of resource an async job is associated with

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceType {
    None,
    VirtualMachine,
    SystemVm,
    Volume,
    Template,
    Iso,
    IpAddress,
    StoragePool,
    Host,
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstanceType::None => "None",
            InstanceType::VirtualMachine => "VirtualMachine",
            InstanceType::SystemVm => "SystemVm",
            InstanceType::Volume => "Volume",
            InstanceType::Template => "Template",
            InstanceType::Iso => "Iso",
            InstanceType::IpAddress => "IpAddress",
            InstanceType::StoragePool => "StoragePool",
            InstanceType::Host => "Host",
        };
        write!(f, "{}", s)
    }
}
