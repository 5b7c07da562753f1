//! Domain Layer
//!
//! Pure message-log logic with no I/O and no locking.

pub mod entities;
pub mod log;
pub mod window;

pub use entities::{FileMessage, GeoMessage, Message, TextMessage, GEO_KIND, TEXT_KIND};
pub use log::MessageLog;
pub use window::{Window, DEFAULT_LIMIT, DEFAULT_OFFSET};
