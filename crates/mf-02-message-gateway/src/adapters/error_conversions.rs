//! Error conversions from infrastructure types.
//!
//! Anything that goes wrong while decoding a request body is an internal
//! failure from the client's point of view.

use crate::domain::DispatchError;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{BytesRejection, FormRejection};

impl From<std::io::Error> for DispatchError {
    fn from(e: std::io::Error) -> Self {
        DispatchError::internal(e.to_string())
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(e: serde_json::Error) -> Self {
        DispatchError::internal(format!("invalid JSON body: {}", e))
    }
}

impl From<MultipartError> for DispatchError {
    fn from(e: MultipartError) -> Self {
        DispatchError::internal(format!("multipart error: {}", e.body_text()))
    }
}

impl From<MultipartRejection> for DispatchError {
    fn from(e: MultipartRejection) -> Self {
        DispatchError::internal(format!("multipart rejected: {}", e.body_text()))
    }
}

impl From<FormRejection> for DispatchError {
    fn from(e: FormRejection) -> Self {
        DispatchError::internal(format!("form rejected: {}", e.body_text()))
    }
}

impl From<BytesRejection> for DispatchError {
    fn from(e: BytesRejection) -> Self {
        DispatchError::internal(format!("body rejected: {}", e.body_text()))
    }
}
