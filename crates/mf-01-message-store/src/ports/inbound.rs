//! Inbound Ports (Driving Ports)
//!
//! The contract the request dispatcher programs against. Every operation is
//! total: there is no error type.

use crate::domain::{Message, Window};

/// Message store API (Driving Port)
///
/// Implementations must be safe to call from many request tasks at once.
/// Mutations are exclusive; a `query` observes the log either entirely
/// before or entirely after any concurrent `append`/`clear`.
pub trait MessageStoreApi: Send + Sync {
    /// Append a message at the tail of the log.
    fn append(&self, message: Message);

    /// Remove every message. Irreversible.
    fn clear(&self);

    /// Messages selected by `window`, newest first. Never mutates.
    fn query(&self, window: Window) -> Vec<Message>;

    /// Current number of stored messages.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
