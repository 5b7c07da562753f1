//! Gateway error types.
//!
//! `DispatchError` is the closed set of command outcomes that are not a
//! success. Each kind knows its HTTP status and the fixed public message
//! placed in the `{ "error": ... }` body; the detail string is only logged.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Public messages, one per error kind
pub mod messages {
    pub const FILE_NOT_PROVIDED: &str = "File not provided";
    pub const FILE_PROCESSING_FAILED: &str = "Error processing the file";
    pub const METHOD_NOT_SUPPORTED: &str = "Method not supported";
    pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
}

/// Failure while handling a single command
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// `createFileMessage` arrived without an attachment
    #[error("file not provided")]
    MissingFile,

    /// The attachment could not be read back from staging
    #[error("failed to read uploaded file: {0}")]
    FileReadFailure(String),

    /// Command name is not one of the supported operations
    #[error("method not supported: {0:?}")]
    UnknownMethod(String),

    /// Anything else: undecodable body, bad field, timeout, panic
    #[error("internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Create an internal error
    pub fn internal(details: impl Into<String>) -> Self {
        Self::Internal(details.into())
    }

    /// HTTP status for this outcome
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile => StatusCode::BAD_REQUEST,
            Self::FileReadFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnknownMethod(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingFile => messages::FILE_NOT_PROVIDED,
            Self::FileReadFailure(_) => messages::FILE_PROCESSING_FAILED,
            Self::UnknownMethod(_) => messages::METHOD_NOT_SUPPORTED,
            Self::Internal(_) => messages::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-side mistake (logged at warn rather than error)
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&DispatchError> for ErrorBody {
    fn from(e: &DispatchError) -> Self {
        Self {
            error: e.public_message().to_string(),
        }
    }
}

/// Gateway-level errors (startup and serving, not per-command)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server terminated with an I/O error
    #[error("server error: {0}")]
    Serve(String),
}
