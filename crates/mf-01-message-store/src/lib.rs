//! # MF-01 Message Store
//!
//! Append-only message log with windowed, newest-first feed queries.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O, no locks
//!   - `Message`: Text / File / Geo payload variants
//!   - `Window`: offset/limit arithmetic
//!   - `MessageLog`: insertion-ordered sequence
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MessageStoreApi`: Driving port used by the gateway dispatcher
//!   - `TimeSource`: Driven port for wall-clock time
//!
//! - **Service Layer** (`service/`): Synchronisation
//!   - `InMemoryMessageStore`: `RwLock`-guarded `MessageLog`
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Insertion order is the only ordering key | `domain/log.rs` - `append()` pushes to the tail |
//! | Messages are immutable once stored | `MessageLog` exposes no mutable access to entries |
//! | `query` returns at most `limit` messages, newest first | `domain/window.rs` - `bounds()` |
//! | Readers never see a torn mutation | `service/message_store_service.rs` - single `RwLock` |
//!
//! ## Usage Example
//!
//! ```
//! use mf_01_message_store::{InMemoryMessageStore, MessageStoreApi, TextMessage, Window};
//!
//! let store = InMemoryMessageStore::new();
//! store.append(TextMessage::new("hello").into());
//! store.append(TextMessage::new("world").into());
//!
//! let page = store.query(Window::default());
//! assert_eq!(page.len(), 2);
//! ```

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    FileMessage, GeoMessage, Message, MessageLog, TextMessage, Window, DEFAULT_LIMIT,
    DEFAULT_OFFSET, GEO_KIND, TEXT_KIND,
};
pub use ports::{MessageStoreApi, SystemTimeSource, TimeSource};
pub use service::InMemoryMessageStore;
