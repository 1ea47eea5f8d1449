//! Inventory records the collaborators operate on

use crate::domain::{AccountId, StoragePoolStatus, SystemVmState, SystemVmType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoragePool {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status: StoragePoolStatus,
    /// Volumes still allocated on the pool; blocks deletion unless forced
    #[serde(default)]
    pub volumes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemVm {
    pub id: i64,
    pub name: String,
    pub vm_type: SystemVmType,
    #[serde(default)]
    pub state: SystemVmState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachine {
    pub id: i64,
    pub name: String,
    pub account_id: AccountId,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddress {
    pub id: i64,
    pub address: String,
    pub account_id: AccountId,
    #[serde(default)]
    pub source_nat: bool,
}

/// A template or ISO image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub account_id: AccountId,
    #[serde(default)]
    pub is_iso: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_extractable: bool,
    #[serde(default)]
    pub launch_accounts: Vec<String>,
    #[serde(default)]
    pub launch_projects: Vec<String>,
}
