//! Application-wide constants and default values

/// Async job execution defaults
pub mod jobs {
    /// Number of jobs allowed to execute concurrently
    pub const DEFAULT_MAX_CONCURRENT_JOBS: usize = 4;

    /// Interval between job status polls while waiting for completion (milliseconds)
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

    /// Default time to wait for a job to reach a terminal state (seconds)
    pub const DEFAULT_WAIT_TIMEOUT_SEC: u64 = 30;
}

/// Configuration file locations
pub mod config {
    /// Environment variable pointing at the engine configuration file
    pub const ENV_CONFIG_FILE: &str = "MGMT_CONFIG_FILE";

    /// Default configuration file
    pub const DEFAULT_CONFIG_FILE: &str = "/etc/mgmt-engine/engine.yaml";

    /// Default log level when neither MGMT_LOG_LEVEL nor RUST_LOG is set
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}
