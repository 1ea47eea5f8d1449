//! Wire DTOs
//! Field names follow the management API's lowercase wire naming

use crate::domain::{AccountId, JobId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(rename = "displaytext", skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            display_text: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyPairResponse {
    pub name: String,
    pub fingerprint: String,
    #[serde(rename = "privatekey", skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemVmResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "systemvmtype")]
    pub system_vm_type: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordResponse {
    #[serde(rename = "encryptedpassword")]
    pub encrypted_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilitiesResponse {
    #[serde(rename = "cloudstackversion")]
    pub version: String,
    #[serde(rename = "securitygroupsenabled")]
    pub security_groups_enabled: bool,
    #[serde(rename = "userpublictemplateenabled")]
    pub user_public_template_enabled: bool,
    #[serde(rename = "projectinviterequired")]
    pub project_invite_required: bool,
    #[serde(rename = "allowusercreateprojects")]
    pub allow_user_create_projects: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventTypeResponse {
    pub name: String,
}

/// Returned by every async command at dispatch time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobCreatedResponse {
    #[serde(rename = "jobid")]
    pub job_id: JobId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsyncJobResponse {
    #[serde(rename = "jobid")]
    pub job_id: JobId,
    pub cmd: String,
    #[serde(rename = "accountid")]
    pub account_id: AccountId,
    #[serde(rename = "jobstatus")]
    pub job_status: i32,
    #[serde(rename = "jobprocstatus")]
    pub job_proc_status: i32,
    #[serde(rename = "jobresultcode")]
    pub job_result_code: u16,
    #[serde(rename = "jobresulttype")]
    pub job_result_type: String,
    #[serde(rename = "jobresult", skip_serializing_if = "Option::is_none")]
    pub job_result: Option<Value>,
    #[serde(rename = "jobinstancetype")]
    pub job_instance_type: String,
    #[serde(rename = "jobinstanceid", skip_serializing_if = "Option::is_none")]
    pub job_instance_id: Option<i64>,
    pub created: DateTime<Utc>,
}
