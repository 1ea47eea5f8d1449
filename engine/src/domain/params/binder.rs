//! Request binder
//! Validates raw key/value pairs against a command's parameter schema

use super::{missing, BoundParams, ParamSpec, ParamType, ParamValue};
use crate::domain::{ApiError, Result};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Generic binder shared by every command
pub struct RequestBinder;

impl RequestBinder {
    /// Bind `raw` against `schema`
    ///
    /// Missing or blank required parameters and values that fail coercion are rejected with
    /// `ApiError::Validation`. Unknown keys are ignored and blank optional values count as
    /// absent.
    pub fn bind(schema: &[ParamSpec], raw: &HashMap<String, String>) -> Result<BoundParams> {
        let mut params = BoundParams::default();

        for spec in schema {
            let value = raw
                .get(spec.name)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty());

            match value {
                Some(value) => {
                    params.insert(spec.name, Self::coerce(spec, value)?);
                }
                None if spec.required => return Err(missing(spec.name)),
                None => {}
            }
        }

        let ignored = raw
            .keys()
            .filter(|key| !schema.iter().any(|spec| spec.name == key.as_str()))
            .count();
        if ignored > 0 {
            debug!(ignored, "Ignoring undeclared request parameters");
        }

        Ok(params)
    }

    fn coerce(spec: &ParamSpec, value: &str) -> Result<ParamValue> {
        match spec.param_type {
            ParamType::String => Ok(ParamValue::String(value.to_string())),
            ParamType::Long => value
                .parse::<i64>()
                .map(ParamValue::Long)
                .map_err(|_| unparsable(spec, value)),
            ParamType::Boolean => match value.to_ascii_lowercase().as_str() {
                "true" => Ok(ParamValue::Boolean(true)),
                "false" => Ok(ParamValue::Boolean(false)),
                _ => Err(unparsable(spec, value)),
            },
            ParamType::List => Ok(ParamValue::List(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            ParamType::Uuid => Uuid::parse_str(value)
                .map(ParamValue::Uuid)
                .map_err(|_| unparsable(spec, value)),
        }
    }
}

fn unparsable(spec: &ParamSpec, value: &str) -> ApiError {
    ApiError::Validation(format!(
        "Unable to parse parameter '{}' as {}: {}",
        spec.name, spec.param_type, value
    ))
}
