//! Middleware stack for the Message Gateway.
//!
//! Layer order, outermost first:
//! Tracing → Preflight status → CORS → CatchPanic → Timeout → Body limit → Handler

pub mod cors;
pub mod timeout;
pub mod tracing;

pub use cors::{create_cors_layer, preflight_no_content};
pub use timeout::TimeoutLayer;
pub use tracing::TracingLayer;

use crate::domain::DispatchError;
use axum::response::{IntoResponse, Response};
use std::any::Any;

/// Response for a handler that panicked
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ::tracing::error!(panic = %details, "Handler panicked");
    DispatchError::internal(details).into_response()
}
