//! HTTP surface: body decoding and route handlers.

pub mod decode;
pub mod handlers;

pub use decode::decode_command;
pub use handlers::{handle_command, handle_feed, handle_preflight, AppState};
