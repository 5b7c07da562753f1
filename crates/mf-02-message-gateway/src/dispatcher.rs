//! Request dispatcher.
//!
//! Maps a decoded `Command` onto the message store and shapes the success
//! payload. Every mutation is a single store call, so a command either takes
//! effect completely or not at all.

use std::sync::Arc;

use mf_01_message_store::{
    FileMessage, GeoMessage, Message, MessageStoreApi, SystemTimeSource, TextMessage, TimeSource,
};
use tracing::{debug, warn};

use crate::domain::{Command, CommandResponse, DispatchError, FeedConfig, FeedQuery};
use crate::ports::UploadedFile;

/// Routes commands and feed reads to the shared store
pub struct RequestDispatcher {
    store: Arc<dyn MessageStoreApi>,
    clock: Arc<dyn TimeSource>,
    feed: FeedConfig,
}

impl RequestDispatcher {
    /// Dispatcher over `store` using the system clock and default feed window
    pub fn new(store: Arc<dyn MessageStoreApi>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemTimeSource),
            feed: FeedConfig::default(),
        }
    }

    /// Builder-style method to replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Builder-style method to set feed defaults
    pub fn with_feed_config(mut self, feed: FeedConfig) -> Self {
        self.feed = feed;
        self
    }

    /// Execute one command
    pub async fn dispatch(&self, command: Command) -> Result<CommandResponse, DispatchError> {
        match command {
            Command::CreateTextMessage { value, kind } => {
                self.store
                    .append(TextMessage::with_kind(value.clone(), kind).into());
                Ok(CommandResponse::text(value))
            }
            Command::CreateFileMessage { file, file_type } => {
                let file = file.ok_or(DispatchError::MissingFile)?;
                let message = self.materialize(file, file_type).await?;
                self.store.append(Message::File(message.clone()));
                Ok(CommandResponse::file(message))
            }
            Command::CreateGeoMessage {
                latitude,
                longitude,
                kind,
            } => {
                self.store.append(
                    GeoMessage {
                        latitude,
                        longitude,
                        kind,
                    }
                    .into(),
                );
                Ok(CommandResponse::geo(latitude, longitude))
            }
            Command::DeleteMessages => {
                self.store.clear();
                Ok(CommandResponse::deleted())
            }
            Command::Unknown(name) => Err(DispatchError::UnknownMethod(name)),
        }
    }

    /// Current feed page for raw query parameters
    pub fn feed(&self, query: &FeedQuery) -> Vec<Message> {
        let window = query.window(&self.feed);
        let page = self.store.query(window);
        debug!(
            offset = window.offset,
            limit = window.limit,
            returned = page.len(),
            "Feed served"
        );
        page
    }

    // Read the upload before touching the store so a failed read leaves no trace.
    async fn materialize(
        &self,
        file: UploadedFile,
        declared_type: Option<String>,
    ) -> Result<FileMessage, DispatchError> {
        let bytes = file.read_all().await.map_err(|e| {
            warn!(filename = %file.filename, error = %e, "Failed to read uploaded file");
            DispatchError::FileReadFailure(e.to_string())
        })?;

        let file_type = declared_type
            .filter(|t| !t.is_empty())
            .or_else(|| file.content_type.clone())
            .unwrap_or_default();

        Ok(FileMessage {
            bytes,
            filename: file.filename.clone(),
            file_type,
            size: file.size,
            last_modified: file
                .last_modified
                .unwrap_or_else(|| self.clock.now_millis()),
        })
    }
}
