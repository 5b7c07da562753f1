//! The message log.
//!
//! Pure, single-owner data structure. Synchronisation lives in the service
//! layer (`InMemoryMessageStore`).

use super::entities::Message;
use super::window::Window;

/// Insertion-ordered sequence of messages.
///
/// Insertion order is the only ordering key. Messages are never modified
/// in place; the only removals are whole-log clears.
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the tail; the message becomes the most recent entry.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Messages selected by `window`, newest first.
    pub fn window(&self, window: Window) -> Vec<Message> {
        let range = window.bounds(self.messages.len());
        self.messages[range].iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
