//! Feed windowing arithmetic.
//!
//! A window skips the `offset` most recent messages and then takes up to
//! `limit` older ones. Over a log of length `n`:
//!
//! ```text
//! end   = max(n - offset, 0)
//! start = max(n - offset - limit, 0)
//! ```
//!
//! The slice `[start, end)` is returned newest-first by the log.

use std::ops::Range;

/// Offset used when the caller supplies none.
pub const DEFAULT_OFFSET: usize = 0;

/// Limit used when the caller supplies none.
pub const DEFAULT_LIMIT: usize = 10;

/// Offset/limit pair for a feed query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// Number of most recent messages to skip.
    pub offset: usize,
    /// Maximum number of messages to return.
    pub limit: usize,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Window {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Insertion-index range selected from a log of `len` messages.
    ///
    /// Always satisfies `start <= end <= len`; the range is empty when
    /// `offset >= len` or `limit == 0`.
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let end = len.saturating_sub(self.offset);
        let start = end.saturating_sub(self.limit);
        start..end
    }
}
