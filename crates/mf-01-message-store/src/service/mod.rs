//! Service Layer
//!
//! Thread-safe implementation of the `MessageStoreApi` port.

pub mod message_store_service;

pub use message_store_service::InMemoryMessageStore;
