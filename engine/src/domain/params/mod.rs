//! Parameter declarations
//!
//! Each command publishes a static schema of `ParamSpec`s. `RequestBinder` validates and
//! coerces raw wire values against that schema before any command is built.

mod binder;

pub use binder::RequestBinder;

use crate::domain::{ApiError, Result};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Declared type of a wire parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    String,
    Long,
    Boolean,
    /// Comma-separated values
    List,
    Uuid,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamType::String => "string",
            ParamType::Long => "long",
            ParamType::Boolean => "boolean",
            ParamType::List => "list",
            ParamType::Uuid => "uuid",
        };
        write!(f, "{}", s)
    }
}

/// One declared parameter: wire key, type, required flag, description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub param_type: ParamType,
    pub required: bool,
    pub description: &'static str,
}

impl ParamSpec {
    pub const fn required(
        name: &'static str,
        param_type: ParamType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            param_type,
            required: true,
            description,
        }
    }

    pub const fn optional(
        name: &'static str,
        param_type: ParamType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            param_type,
            required: false,
            description,
        }
    }
}

/// A coerced parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    String(String),
    Long(i64),
    Boolean(bool),
    List(Vec<String>),
    Uuid(Uuid),
}

/// Parameters that passed validation, keyed by declared name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundParams {
    values: HashMap<&'static str, ParamValue>,
}

impl BoundParams {
    pub(crate) fn insert(&mut self, name: &'static str, value: ParamValue) {
        self.values.insert(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn long(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ParamValue::Long(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ParamValue::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.values.get(name) {
            Some(ParamValue::List(values)) => Some(values),
            _ => None,
        }
    }

    pub fn uuid(&self, name: &str) -> Option<Uuid> {
        match self.values.get(name) {
            Some(ParamValue::Uuid(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn require_string(&self, name: &str) -> Result<&str> {
        self.string(name).ok_or_else(|| missing(name))
    }

    pub fn require_long(&self, name: &str) -> Result<i64> {
        self.long(name).ok_or_else(|| missing(name))
    }

    pub fn require_uuid(&self, name: &str) -> Result<Uuid> {
        self.uuid(name).ok_or_else(|| missing(name))
    }
}

pub(crate) fn missing(name: &str) -> ApiError {
    ApiError::Validation(format!("Missing required parameter: {}", name))
}
