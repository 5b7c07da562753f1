//! Success payloads, one shape per command.

use mf_01_message_store::FileMessage;
use serde::{Deserialize, Serialize};

pub const FILE_UPLOADED: &str = "File uploaded successfully";
pub const DELETE_SUCCESS: &str = "success";

/// Body of a successful command response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandResponse {
    /// Uploaded file echoed back with its bytes
    File {
        #[serde(rename = "responseMessage")]
        message: String,
        #[serde(rename = "fileData")]
        file_data: FileMessage,
    },
    /// Stored coordinates
    Geo {
        #[serde(rename = "responseLatitude")]
        latitude: f64,
        #[serde(rename = "responseLongitude")]
        longitude: f64,
    },
    /// Echo of a stored text value, or the delete acknowledgement
    Message {
        #[serde(rename = "responseMessage")]
        message: String,
    },
}

impl CommandResponse {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Message {
            message: value.into(),
        }
    }

    pub fn file(file_data: FileMessage) -> Self {
        Self::File {
            message: FILE_UPLOADED.to_string(),
            file_data,
        }
    }

    pub fn geo(latitude: f64, longitude: f64) -> Self {
        Self::Geo {
            latitude,
            longitude,
        }
    }

    pub fn deleted() -> Self {
        Self::Message {
            message: DELETE_SUCCESS.to_string(),
        }
    }
}
