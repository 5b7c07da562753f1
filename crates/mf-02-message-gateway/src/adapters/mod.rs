//! Adapters layer: upload sources and infrastructure error conversions.

pub mod error_conversions;
pub mod upload;

pub use upload::{BufferedUpload, StagedUpload, STAGING_PREFIX};
