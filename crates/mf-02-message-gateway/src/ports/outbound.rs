//! Outbound ports for the Message Gateway.

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::io;

/// Readable source of an uploaded file's content.
///
/// The dispatcher does not care how an upload was staged, only that its
/// bytes can be materialised on demand.
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Read the complete content.
    async fn read_all(&self) -> io::Result<Bytes>;
}

/// An attachment plus the metadata the client sent with it.
pub struct UploadedFile {
    /// Original filename
    pub filename: String,
    /// Content type of the multipart part, if any
    pub content_type: Option<String>,
    /// Size in bytes as observed while staging
    pub size: u64,
    /// Last-modified instant (ms since epoch), if the client supplied one
    pub last_modified: Option<u64>,
    source: Box<dyn ByteSource>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, size: u64, source: impl ByteSource + 'static) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            size,
            last_modified: None,
            source: Box::new(source),
        }
    }

    /// Builder-style method to set the part content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Builder-style method to set the last-modified instant
    pub fn with_last_modified(mut self, millis: u64) -> Self {
        self.last_modified = Some(millis);
        self
    }

    /// Read the complete content from the underlying source
    pub async fn read_all(&self) -> io::Result<Bytes> {
        self.source.read_all().await
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.size)
            .field("last_modified", &self.last_modified)
            .finish_non_exhaustive()
    }
}
