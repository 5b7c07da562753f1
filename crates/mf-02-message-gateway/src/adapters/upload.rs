//! Upload sources.
//!
//! Multipart attachments are streamed to a staging file and read back when
//! the dispatcher needs the bytes. The staging file is removed when the
//! `StagedUpload` is dropped, whether or not the command succeeded.

use crate::ports::ByteSource;
use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use std::path::Path;
use tempfile::TempPath;

/// Prefix for staging files, handy when cleaning up after a crash
pub const STAGING_PREFIX: &str = "mf-upload-";

/// Attachment content already in memory
#[derive(Debug, Clone)]
pub struct BufferedUpload(Bytes);

impl BufferedUpload {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }
}

#[async_trait]
impl ByteSource for BufferedUpload {
    async fn read_all(&self) -> io::Result<Bytes> {
        Ok(self.0.clone())
    }
}

/// Attachment staged on disk
#[derive(Debug)]
pub struct StagedUpload {
    path: TempPath,
}

impl StagedUpload {
    pub fn new(path: TempPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteSource for StagedUpload {
    async fn read_all(&self) -> io::Result<Bytes> {
        tokio::fs::read(&self.path).await.map(Bytes::from)
    }
}
