//! Configuration loading from YAML files
//!
//! One YAML file configures the job workers, the advertised capabilities and the
//! inventory the in-memory collaborators start with.

use crate::constants::config::{DEFAULT_CONFIG_FILE, ENV_CONFIG_FILE};
use crate::constants::jobs::{
    DEFAULT_MAX_CONCURRENT_JOBS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_SEC,
};
use crate::domain::{
    AccountId, Capabilities, Cluster, IpAddress, StoragePool, SystemVm, Template, VirtualMachine,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub jobs: JobsConfig,

    #[serde(default)]
    pub capabilities: Capabilities,

    #[serde(default)]
    pub inventory: InventoryConfig,
}

/// Async job worker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsConfig {
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_wait_timeout_sec")]
    pub wait_timeout_sec: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: DEFAULT_MAX_CONCURRENT_JOBS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            wait_timeout_sec: DEFAULT_WAIT_TIMEOUT_SEC,
        }
    }
}

impl JobsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_sec)
    }
}

fn default_max_concurrent_jobs() -> usize {
    DEFAULT_MAX_CONCURRENT_JOBS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_wait_timeout_sec() -> u64 {
    DEFAULT_WAIT_TIMEOUT_SEC
}

/// A public key registered at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPairSeed {
    pub name: String,
    pub account_id: AccountId,
    pub public_key: String,
}

/// Initial inventory for the in-memory collaborators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub clusters: Vec<Cluster>,

    #[serde(default)]
    pub storage_pools: Vec<StoragePool>,

    #[serde(default)]
    pub system_vms: Vec<SystemVm>,

    #[serde(default)]
    pub virtual_machines: Vec<VirtualMachine>,

    #[serde(default)]
    pub ip_addresses: Vec<IpAddress>,

    /// Templates and ISOs
    #[serde(default)]
    pub templates: Vec<Template>,

    #[serde(default)]
    pub key_pairs: Vec<KeyPairSeed>,
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &str) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

        Self::from_yaml(&contents).map_err(|e| format!("Invalid config file '{}': {}", path, e))
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, String> {
        let config: Self = serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse YAML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jobs.max_concurrent_jobs == 0 {
            return Err("jobs.max_concurrent_jobs must be greater than zero".to_string());
        }
        if self.jobs.poll_interval_ms == 0 {
            return Err("jobs.poll_interval_ms must be greater than zero".to_string());
        }

        let inventory = &self.inventory;
        unique_ids("clusters", inventory.clusters.iter().map(|c| c.id))?;
        unique_ids("storage_pools", inventory.storage_pools.iter().map(|p| p.id))?;
        unique_ids("system_vms", inventory.system_vms.iter().map(|v| v.id))?;
        unique_ids("virtual_machines", inventory.virtual_machines.iter().map(|v| v.id))?;
        unique_ids("ip_addresses", inventory.ip_addresses.iter().map(|ip| ip.id))?;
        unique_ids("templates", inventory.templates.iter().map(|t| t.id))?;

        let mut seen = HashSet::new();
        for key_pair in &inventory.key_pairs {
            if !seen.insert((key_pair.account_id, key_pair.name.as_str())) {
                return Err(format!(
                    "Duplicate key pair '{}' for account {}",
                    key_pair.name, key_pair.account_id
                ));
            }
        }

        Ok(())
    }
}

fn unique_ids(section: &str, ids: impl Iterator<Item = i64>) -> Result<(), String> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(format!("Duplicate id {} in inventory.{}", id, section));
        }
    }
    Ok(())
}

/// Load configuration from a YAML file path
pub fn load_config_from_path(config_path: &str) -> Result<EngineConfig, String> {
    let path = Path::new(config_path);

    if path.is_file() {
        EngineConfig::load(config_path)
    } else if path.is_dir() {
        Err(format!(
            "Configuration path is a directory, expected a YAML file: {}",
            config_path
        ))
    } else {
        Err(format!("Configuration file does not exist: {}", config_path))
    }
}

/// Determine configuration file path using precedence rules
///
/// Precedence (first match wins):
/// 1. MGMT_CONFIG_FILE environment variable
/// 2. /etc/mgmt-engine/engine.yaml (if the file exists)
/// 3. None (start with an empty inventory)
pub fn get_default_config_path() -> Option<String> {
    if let Ok(path) = std::env::var(ENV_CONFIG_FILE) {
        return Some(path);
    }

    if Path::new(DEFAULT_CONFIG_FILE).is_file() {
        return Some(DEFAULT_CONFIG_FILE.to_string());
    }

    None
}
