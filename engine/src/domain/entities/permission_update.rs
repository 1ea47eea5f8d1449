use crate::domain::{ApiError, EntityKind, Result};
use std::fmt;
use std::str::FromStr;

/// How the account/project lists of a permission update are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOperation {
    Add,
    Remove,
    Reset,
}

impl FromStr for PermissionOperation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "add" => Ok(PermissionOperation::Add),
            "remove" => Ok(PermissionOperation::Remove),
            "reset" => Ok(PermissionOperation::Reset),
            _ => Err(ApiError::Validation(format!(
                "Invalid operation '{}', valid operations are add, remove, reset",
                s
            ))),
        }
    }
}

impl fmt::Display for PermissionOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionOperation::Add => write!(f, "add"),
            PermissionOperation::Remove => write!(f, "remove"),
            PermissionOperation::Reset => write!(f, "reset"),
        }
    }
}

/// Visibility change requested for a template or ISO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionUpdate {
    pub id: i64,
    pub kind: EntityKind,
    pub accounts: Vec<String>,
    pub project_ids: Vec<String>,
    pub is_public: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_extractable: Option<bool>,
    pub operation: Option<PermissionOperation>,
}

impl PermissionUpdate {
    pub fn new(id: i64, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            accounts: Vec::new(),
            project_ids: Vec::new(),
            is_public: None,
            is_featured: None,
            is_extractable: None,
            operation: None,
        }
    }
}
