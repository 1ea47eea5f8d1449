//! Output formatting utilities

use colored::*;
use mgmt_engine::domain::{ApiError, JobStatus, ParamSpec};
use serde_json::Value;

/// Pretty-print a wire document
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// One-line error summary for stderr
pub fn format_error(error: &ApiError) -> ColoredString {
    let response = error.to_error_response();
    format!("error {}: {}", response.error_code, response.error_text).red()
}

/// Format job status with appropriate color
pub fn format_job_status(status: JobStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Succeeded => status_str.green(),
        JobStatus::Failed => status_str.red(),
        JobStatus::Running => status_str.yellow(),
        JobStatus::Pending => status_str.cyan(),
    }
}

/// Help text for one API command
pub fn format_command(api_name: &str, parameters: &[ParamSpec]) -> String {
    let mut out = format!("{}\n", api_name.bold());
    for spec in parameters {
        let required = if spec.required { "required" } else { "optional" };
        out.push_str(&format!(
            "    {:<16} {:<8} {:<9} {}\n",
            spec.name,
            spec.param_type.to_string(),
            required,
            spec.description
        ));
    }
    out
}
