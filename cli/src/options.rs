//! Command-line options

use clap::Parser;
use std::collections::HashMap;

/// Execute one management API command against an in-process engine
#[derive(Parser, Debug, Clone)]
#[command(name = "mgmtctl", version)]
#[command(about = "Run management API commands against an in-memory engine")]
pub struct Args {
    /// API command name, e.g. deleteCluster
    #[arg(required_unless_present = "list_commands")]
    pub command: Option<String>,

    /// Request parameter as KEY=VALUE (repeatable)
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Engine configuration file
    #[arg(short, long, env = "MGMT_CONFIG_FILE")]
    pub config: Option<String>,

    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(long, env = "MGMT_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Account id of the caller; omitted means no user context
    #[arg(long)]
    pub caller: Option<i64>,

    /// Wait for async jobs and print the job result
    #[arg(short, long, default_value = "false")]
    pub wait: bool,

    /// Seconds to wait for an async job (defaults to jobs.wait_timeout_sec)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// List available API commands and their parameters
    #[arg(long, default_value = "false")]
    pub list_commands: bool,
}

impl Args {
    /// Request parameters; a repeated key keeps its last value
    pub fn param_map(&self) -> HashMap<String, String> {
        self.params.iter().cloned().collect()
    }
}

/// Parse a `KEY=VALUE` parameter
pub fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("invalid parameter format (use KEY=VALUE): {}", arg)),
    }
}
