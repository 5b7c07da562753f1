//! Ports Layer
//!
//! - Driving port (inbound): `MessageStoreApi`
//! - Driven port (outbound): `TimeSource`

pub mod inbound;
pub mod outbound;

pub use inbound::MessageStoreApi;
pub use outbound::{SystemTimeSource, TimeSource};
