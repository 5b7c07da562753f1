//! Domain layer for the Message Gateway.

pub mod command;
pub mod config;
pub mod correlation;
pub mod error;
pub mod response;

pub use command::{methods, Command, CommandFields, FeedQuery};
pub use config::{
    ConfigError, CorsConfig, FeedConfig, GatewayConfig, HttpConfig, LimitsConfig, TimeoutConfig,
    UploadConfig,
};
pub use correlation::{RequestId, REQUEST_ID_HEADER};
pub use error::{DispatchError, ErrorBody, GatewayError};
pub use response::CommandResponse;
