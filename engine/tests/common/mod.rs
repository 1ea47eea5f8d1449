//! Shared fixtures for the dispatcher integration tests

#![allow(dead_code)]

use mgmt_engine::infrastructure::{
    build_engine_with_events, Engine, EngineConfig, RecordingEventSink,
};
use std::collections::HashMap;
use std::sync::Arc;

pub const INVENTORY: &str = r#"
jobs:
  max_concurrent_jobs: 2
  poll_interval_ms: 10
capabilities:
  version: "4.2.0"
inventory:
  clusters:
    - id: 42
      name: cluster-a
  storage_pools:
    - id: 5
      name: primary-1
      volumes: 2
    - id: 7
      name: primary-2
      status: Removed
  system_vms:
    - id: 12
      name: v-12-VM
      vm_type: ConsoleProxy
    - id: 13
      name: s-13-VM
      vm_type: SecondaryStorageVm
      state: Destroyed
  virtual_machines:
    - id: 21
      name: web
      account_id: 2
      password: c2VjcmV0
    - id: 22
      name: db
      account_id: 2
      password: ""
  ip_addresses:
    - id: 31
      address: 10.1.1.31
      account_id: 2
  templates:
    - id: 8
      name: ubuntu
      account_id: 2
    - id: 9
      name: tools
      account_id: 3
      is_iso: true
"#;

pub struct TestEngine {
    pub engine: Engine,
    pub events: Arc<RecordingEventSink>,
}

/// Engine seeded with `INVENTORY` and a recording event sink
pub fn setup_engine() -> TestEngine {
    let config = EngineConfig::from_yaml(INVENTORY).expect("Failed to parse test inventory");
    let events = Arc::new(RecordingEventSink::new());
    let engine =
        build_engine_with_events(&config, events.clone()).expect("Failed to build engine");
    TestEngine { engine, events }
}

pub fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
