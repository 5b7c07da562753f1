//! In-memory message store service.
//!
//! Wraps the domain `MessageLog` in a single reader-writer lock: `append`
//! and `clear` hold it exclusively, `query` and `len` share it.

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{Message, MessageLog, Window};
use crate::ports::MessageStoreApi;

/// Process-wide message store.
///
/// Constructed once at startup and shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    log: RwLock<MessageLog>,
}

impl InMemoryMessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageStoreApi for InMemoryMessageStore {
    fn append(&self, message: Message) {
        let kind = message.kind();
        let mut log = self.log.write();
        log.append(message);
        debug!(kind, len = log.len(), "[mf-01] Message appended");
    }

    fn clear(&self) {
        let mut log = self.log.write();
        let dropped = log.len();
        log.clear();
        debug!(dropped, "[mf-01] Message log cleared");
    }

    fn query(&self, window: Window) -> Vec<Message> {
        self.log.read().window(window)
    }

    fn len(&self) -> usize {
        self.log.read().len()
    }
}
