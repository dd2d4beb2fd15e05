#![allow(dead_code)]

use thiserror::Error;

/// Status code reported for failures that never produced an HTTP response.
pub const NO_STATUS: u16 = 0;

/// Uniform failure shape for every backend call.
/// All gateway operations return `Result<T, GatewayError>`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Network error: {message}")]
    Transport { message: String },

    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response: {message}")]
    Decode { message: String },

    /// The configured base URL is unusable. Raised before any request is sent.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl GatewayError {
    /// HTTP status of the failure, or `NO_STATUS` when the backend was never reached.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Api { status, .. } => *status,
            GatewayError::Transport { .. }
            | GatewayError::Decode { .. }
            | GatewayError::InvalidBaseUrl { .. } => NO_STATUS,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Decode {
                message: e.to_string(),
            }
        } else {
            GatewayError::Transport {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Decode {
            message: e.to_string(),
        }
    }
}

/// Workflow-level error.
///
/// `Validation` is a local precondition failure and is never sent over the wire.
/// Gateway failures are normally stored on the owning workflow as a message;
/// the variant exists for callers that drive the gateway directly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl WorkflowError {
    pub fn validation(msg: impl Into<String>) -> Self {
        WorkflowError::Validation(msg.into())
    }
}
