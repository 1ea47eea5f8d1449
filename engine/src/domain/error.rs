//! Domain-level errors
//! Every failure surfaced to an API caller is one of these variants

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    // Request errors
    #[error("Unsupported command: {0}")]
    UnsupportedCommand(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    // Execution errors
    #[error("{0}")]
    OperationFailed(String),

    /// The operation failed but left a side effect behind that needs follow-up
    #[error("{0}")]
    DomainState(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Wire error codes reported to API callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    ParamError,
    UnsupportedActionError,
    InternalError,
}

impl ApiErrorCode {
    pub fn code(&self) -> u16 {
        match self {
            ApiErrorCode::ParamError => 431,
            ApiErrorCode::UnsupportedActionError => 432,
            ApiErrorCode::InternalError => 530,
        }
    }
}

/// Error body as rendered on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "errorcode")]
    pub error_code: u16,
    #[serde(rename = "errortext")]
    pub error_text: String,
}

impl ApiError {
    pub fn error_code(&self) -> ApiErrorCode {
        match self {
            ApiError::Validation(_) | ApiError::NotFound(_) => ApiErrorCode::ParamError,
            ApiError::UnsupportedCommand(_) => ApiErrorCode::UnsupportedActionError,
            ApiError::OperationFailed(_) | ApiError::DomainState(_) | ApiError::Internal(_) => {
                ApiErrorCode::InternalError
            }
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error_code: self.error_code().code(),
            error_text: self.to_string(),
        }
    }

    /// Render as `{"errorresponse": {"errorcode": .., "errortext": ..}}`
    pub fn to_wire(&self) -> serde_json::Value {
        let response = self.to_error_response();
        serde_json::json!({
            "errorresponse": {
                "errorcode": response.error_code,
                "errortext": response.error_text,
            }
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Internal(format!("serializing response: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::Validation("x".into()).error_code().code(), 431);
        assert_eq!(ApiError::NotFound("x".into()).error_code().code(), 431);
        assert_eq!(ApiError::UnsupportedCommand("x".into()).error_code().code(), 432);
        assert_eq!(ApiError::OperationFailed("x".into()).error_code().code(), 530);
        assert_eq!(ApiError::DomainState("x".into()).error_code().code(), 530);
        assert_eq!(ApiError::Internal("x".into()).error_code().code(), 530);
    }

    #[test]
    fn test_operation_failed_message_is_verbatim() {
        let err = ApiError::OperationFailed("Failed to delete cluster".to_string());
        assert_eq!(err.to_string(), "Failed to delete cluster");
    }

    #[test]
    fn test_wire_rendering() {
        let err = ApiError::NotFound("Unable to find async job".to_string());
        let wire = err.to_wire();
        assert_eq!(wire["errorresponse"]["errorcode"], 431);
        assert_eq!(wire["errorresponse"]["errortext"], "Unable to find async job");
    }
}
