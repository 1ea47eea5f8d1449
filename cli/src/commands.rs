//! Command execution against an in-process engine

use crate::formatters::{format_command, format_error, format_job_status, format_json};
use crate::options::Args;
use anyhow::{anyhow, Context};
use mgmt_engine::domain::{AccountId, ApiResponse, CallContext, JobId, JobStatus, ResponsePayload};
use mgmt_engine::infrastructure::{
    build_engine, get_default_config_path, load_config_from_path, Engine, EngineConfig,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Process exit codes
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    /// The command or its async job failed
    pub const API_ERROR: i32 = 1;
}

/// Load the configuration named on the command line, or the default one
pub fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let path = args.config.clone().or_else(get_default_config_path);
    match path {
        Some(path) => {
            debug!(path = %path, "Loading engine configuration");
            load_config_from_path(&path).map_err(|e| anyhow!(e))
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Print every registered command with its parameter schema
pub fn handle_list_commands(engine: &Engine) {
    let registry = engine.dispatcher.registry();
    for api_name in registry.api_names() {
        if let Some(factory) = registry.get(api_name) {
            print!("{}", format_command(api_name, factory.parameters()));
        }
    }
}

/// Dispatch `args.command` and print the wire response; returns the exit code
pub async fn handle_dispatch(
    engine: &Engine,
    config: &EngineConfig,
    args: &Args,
) -> anyhow::Result<i32> {
    let api_name = args.command.as_deref().context("no API command given")?;
    let ctx = match args.caller {
        Some(caller) => CallContext::for_caller(AccountId::new(caller)),
        None => CallContext::system(),
    };

    let response = match engine
        .dispatcher
        .dispatch(api_name, &args.param_map(), ctx)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            eprintln!("{}", format_error(&e));
            println!("{}", format_json(&e.to_wire()));
            return Ok(exit_code::API_ERROR);
        }
    };

    match (job_id(&response), args.wait) {
        (Some(job_id), true) => {
            let timeout = args
                .timeout
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.jobs.wait_timeout());
            wait_and_print_job(engine, job_id, timeout).await
        }
        _ => {
            println!("{}", format_json(&response.to_wire()?));
            Ok(exit_code::SUCCESS)
        }
    }
}

fn job_id(response: &ApiResponse) -> Option<JobId> {
    match response.payload() {
        ResponsePayload::JobCreated(created) => Some(created.job_id),
        _ => None,
    }
}

async fn wait_and_print_job(
    engine: &Engine,
    job_id: JobId,
    timeout: Duration,
) -> anyhow::Result<i32> {
    let job = match engine.jobs.wait_for_completion(job_id, timeout).await {
        Ok(job) => job,
        Err(e) => {
            eprintln!("{}", format_error(&e));
            println!("{}", format_json(&e.to_wire()));
            return Ok(exit_code::API_ERROR);
        }
    };
    eprintln!("job {} {}", job_id, format_job_status(job.status()));

    let mut params = HashMap::new();
    params.insert("jobid".to_string(), job_id.to_string());
    let result = engine
        .dispatcher
        .dispatch("queryAsyncJobResult", &params, CallContext::system())
        .await
        .map_err(|e| anyhow!(e))?;
    println!("{}", format_json(&result.to_wire()?));

    Ok(match job.status() {
        JobStatus::Succeeded => exit_code::SUCCESS,
        _ => exit_code::API_ERROR,
    })
}

/// Build an engine from `args` and run the requested action
pub async fn run(args: &Args) -> anyhow::Result<i32> {
    let config = load_config(args)?;
    let engine = build_engine(&config).map_err(|e| anyhow!(e))?;

    let code = if args.list_commands {
        handle_list_commands(&engine);
        exit_code::SUCCESS
    } else {
        handle_dispatch(&engine, &config, args).await?
    };

    engine.jobs.shutdown().await;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["mgmtctl"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const INVENTORY: &str = r#"
inventory:
  clusters:
    - id: 42
      name: cluster-a
  system_vms:
    - id: 12
      name: v-12-VM
      vm_type: ConsoleProxy
"#;

    #[tokio::test]
    async fn test_sync_command_exit_codes() {
        let file = config_file(INVENTORY);
        let path = file.path().to_str().unwrap();

        let code = run(&args(&["deleteCluster", "-p", "id=42", "-c", path]))
            .await
            .unwrap();
        assert_eq!(code, exit_code::SUCCESS);

        let code = run(&args(&["deleteCluster", "-p", "id=404", "-c", path]))
            .await
            .unwrap();
        assert_eq!(code, exit_code::API_ERROR);

        let code = run(&args(&["noSuchCommand", "-c", path])).await.unwrap();
        assert_eq!(code, exit_code::API_ERROR);
    }

    #[tokio::test]
    async fn test_wait_for_async_job() {
        let file = config_file(INVENTORY);
        let path = file.path().to_str().unwrap();

        let code = run(&args(&["destroySystemVm", "-p", "id=12", "-c", path, "--wait"]))
            .await
            .unwrap();
        assert_eq!(code, exit_code::SUCCESS);

        let code = run(&args(&["destroySystemVm", "-p", "id=99", "-c", path, "--wait"]))
            .await
            .unwrap();
        assert_eq!(code, exit_code::API_ERROR);
    }

    #[tokio::test]
    async fn test_missing_config_file_is_an_error() {
        let result = run(&args(&["listCapabilities", "-c", "/nonexistent/engine.yaml"])).await;
        assert!(result.is_err());
    }
}
