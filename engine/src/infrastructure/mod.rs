//! Infrastructure Layer
//!
//! This module contains the adapters that implement the ports defined in the domain layer.
//!
//! ## Adapters
//!
//! - `InMemoryInventory`: in-memory management, resource, storage and network services
//! - `InMemoryAsyncJobRepository`: Thread-safe in-memory storage for job records
//! - `TracingEventSink` / `RecordingEventSink`: audit event destinations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mgmt_engine::infrastructure::{build_engine, EngineConfig};
//!
//! let engine = build_engine(&EngineConfig::default()).expect("valid configuration");
//! // engine.dispatcher.dispatch(...)
//! ```

pub mod bootstrap;
pub mod config;
pub mod event_sink;
pub mod in_memory_inventory;
pub mod in_memory_job_repository;
pub mod logging;
pub mod ssh_keys;

pub use bootstrap::{build_engine, build_engine_with_events, Engine};
pub use config::{
    get_default_config_path, load_config_from_path, EngineConfig, InventoryConfig, JobsConfig,
};
pub use event_sink::{RecordingEventSink, TracingEventSink};
pub use in_memory_inventory::InMemoryInventory;
pub use in_memory_job_repository::InMemoryAsyncJobRepository;
pub use logging::init_logging;
