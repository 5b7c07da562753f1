//! Message entities.
//!
//! A `Message` is one of three payload shapes. The variant is implied by the
//! JSON shape on the wire, so the enum is serialized untagged:
//!
//! | Variant | Wire object |
//! |---------|-------------|
//! | Text | `{ "value": "...", "type": "text" }` |
//! | File | `{ "value": [u8, ...], "filename", "fileType", "size", "lastModified" }` |
//! | Geo  | `{ "latitude": f64, "longitude": f64, "type": "geo" }` |

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind tag recorded for text messages when the client sends none.
pub const TEXT_KIND: &str = "text";

/// Kind tag recorded for geo messages when the client sends none.
pub const GEO_KIND: &str = "geo";

/// A stored message. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// Binary attachment with file metadata.
    File(FileMessage),
    /// Geolocation point.
    Geo(GeoMessage),
    /// Plain text.
    Text(TextMessage),
}

impl Message {
    /// Short kind name, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Text(_) => "text",
            Message::File(_) => "file",
            Message::Geo(_) => "geo",
        }
    }
}

impl From<TextMessage> for Message {
    fn from(msg: TextMessage) -> Self {
        Message::Text(msg)
    }
}

impl From<FileMessage> for Message {
    fn from(msg: FileMessage) -> Self {
        Message::File(msg)
    }
}

impl From<GeoMessage> for Message {
    fn from(msg: GeoMessage) -> Self {
        Message::Geo(msg)
    }
}

/// Plain text message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMessage {
    /// Message body. May be empty.
    pub value: String,
    /// Client-supplied kind tag.
    #[serde(rename = "type", default = "default_text_kind")]
    pub kind: String,
}

impl TextMessage {
    /// Text message with the default kind tag.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: TEXT_KIND.to_string(),
        }
    }

    /// Text message with an explicit kind tag.
    pub fn with_kind(value: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: kind.into(),
        }
    }
}

/// Uploaded file with its full byte payload.
///
/// `size` is recorded as declared by the upload and is not checked against
/// `bytes.len()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMessage {
    /// Raw file content, serialized as an array of unsigned 8-bit integers.
    #[serde(
        rename = "value",
        serialize_with = "serialize_byte_array",
        deserialize_with = "deserialize_byte_array"
    )]
    pub bytes: Bytes,
    /// Original filename as sent by the client.
    pub filename: String,
    /// Declared MIME type.
    #[serde(rename = "fileType")]
    pub file_type: String,
    /// Size in bytes.
    pub size: u64,
    /// Last-modified instant, milliseconds since the Unix epoch.
    #[serde(rename = "lastModified")]
    pub last_modified: u64,
}

/// Geolocation message. Coordinates are not range-checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoMessage {
    pub latitude: f64,
    pub longitude: f64,
    /// Client-supplied kind tag.
    #[serde(rename = "type", default = "default_geo_kind")]
    pub kind: String,
}

impl GeoMessage {
    /// Geo message with the default kind tag.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            kind: GEO_KIND.to_string(),
        }
    }
}

fn default_text_kind() -> String {
    TEXT_KIND.to_string()
}

fn default_geo_kind() -> String {
    GEO_KIND.to_string()
}

// Always an explicit integer sequence; never delegate to `serialize_bytes`,
// which binary formats encode opaquely.
fn serialize_byte_array<S>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(bytes.iter())
}

fn deserialize_byte_array<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<u8>::deserialize(deserializer).map(Bytes::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_file() -> FileMessage {
        FileMessage {
            bytes: Bytes::from_static(&[0, 1, 127, 255]),
            filename: "pixel.png".to_string(),
            file_type: "image/png".to_string(),
            size: 4,
            last_modified: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_text_wire_shape() {
        let msg = Message::from(TextMessage::new("hello"));
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({ "value": "hello", "type": "text" }));
    }

    #[test]
    fn test_file_payload_is_byte_array() {
        let value = serde_json::to_value(Message::from(sample_file())).unwrap();
        assert_eq!(value["value"], json!([0, 1, 127, 255]));
        assert_eq!(value["fileType"], "image/png");
        assert_eq!(value["lastModified"], 1_700_000_000_000u64);
        assert_eq!(value["size"], 4);
    }

    #[test]
    fn test_geo_wire_shape() {
        let value = serde_json::to_value(Message::from(GeoMessage::new(55.75, 37.61))).unwrap();
        assert_eq!(
            value,
            json!({ "latitude": 55.75, "longitude": 37.61, "type": "geo" })
        );
    }

    #[test]
    fn test_untagged_decode_picks_variant_by_shape() {
        let file: Message = serde_json::from_value(json!({
            "value": [1, 2, 3],
            "filename": "a.bin",
            "fileType": "application/octet-stream",
            "size": 3,
            "lastModified": 0
        }))
        .unwrap();
        assert_eq!(file.kind(), "file");

        let text: Message = serde_json::from_value(json!({ "value": "hi" })).unwrap();
        assert_eq!(text, Message::Text(TextMessage::new("hi")));

        let geo: Message =
            serde_json::from_value(json!({ "latitude": 1.0, "longitude": 2.0 })).unwrap();
        assert_eq!(geo.kind(), "geo");
    }

    #[test]
    fn test_file_bytes_survive_decode() {
        let original = sample_file();
        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: FileMessage = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.bytes, original.bytes);
    }
}
