//! Ports for the Message Gateway.
//!
//! The store contract (`MessageStoreApi`) is owned by `mf-01-message-store`;
//! this crate only adds the upload-source port.

pub mod outbound;

pub use outbound::{ByteSource, UploadedFile};
