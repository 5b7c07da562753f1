//! # MF-02 Message Gateway
//!
//! HTTP front door for the message store. Decodes client commands, runs them
//! against the shared `MessageStoreApi` and serves the newest-first feed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    MESSAGE GATEWAY (mf-02)                   │
//! ├──────────────────────────────────────────────────────────────┤
//! │  GET  /*  ──► feed(offset, limit)                            │
//! │  POST /*  ──► decode body ──► Command ──► RequestDispatcher  │
//! │  OPTIONS  ──► 204                                            │
//! │                                                              │
//! │  Middleware: Tracing → CORS → CatchPanic → Timeout → Limit   │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ MessageStoreApi
//!                                ▼
//!                     mf-01-message-store
//! ```
//!
//! # Commands
//!
//! | `method` | Success | Failures |
//! |----------|---------|----------|
//! | `createTextMessage` | 201 `{responseMessage}` | 500 |
//! | `createFileMessage` | 201 `{responseMessage, fileData}` | 400 no file, 500 unreadable file |
//! | `createGeoMessage` | 201 `{responseLatitude, responseLongitude}` | 500 bad coordinates |
//! | `deleteMessages` | 201 `{responseMessage: "success"}` | - |
//! | anything else | - | 404 `Method not supported` |
//!
//! # Usage
//!
//! ```ignore
//! use mf_02_message_gateway::{GatewayConfig, MessageGatewayService};
//! use mf_01_message_store::InMemoryMessageStore;
//!
//! let store = Arc::new(InMemoryMessageStore::new());
//! let service = MessageGatewayService::new(GatewayConfig::default(), store)?;
//! service.run(shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod dispatcher;
pub mod domain;
pub mod http;
pub mod middleware;
pub mod ports;
pub mod service;

pub use dispatcher::RequestDispatcher;
pub use domain::{
    Command, CommandFields, CommandResponse, ConfigError, CorsConfig, DispatchError, ErrorBody,
    FeedConfig, FeedQuery, GatewayConfig, GatewayError, RequestId,
};
pub use ports::{ByteSource, UploadedFile};
pub use service::{build_router, MessageGatewayService};
