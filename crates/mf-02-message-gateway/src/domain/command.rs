//! Typed commands decoded from request bodies.
//!
//! Clients name the operation in a `method` body field. The HTTP layer
//! collects the body into `CommandFields` and `Command::decode` turns that
//! into one closed variant, with `Unknown` as the default arm.

use mf_01_message_store::{Window, GEO_KIND, TEXT_KIND};
use serde_json::{Map, Value};

use super::config::FeedConfig;
use super::error::DispatchError;
use crate::ports::UploadedFile;

/// Wire names of the supported commands
pub mod methods {
    pub const CREATE_TEXT_MESSAGE: &str = "createTextMessage";
    pub const CREATE_FILE_MESSAGE: &str = "createFileMessage";
    pub const CREATE_GEO_MESSAGE: &str = "createGeoMessage";
    pub const DELETE_MESSAGES: &str = "deleteMessages";
}

/// Body field names
pub mod fields {
    pub const METHOD: &str = "method";
    pub const VALUE: &str = "value";
    pub const TYPE: &str = "type";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const FILE_TYPE: &str = "fileType";
    pub const LAST_MODIFIED: &str = "lastModified";
    /// Multipart part carrying the attachment
    pub const FILE: &str = "file";
}

/// A decoded client command
#[derive(Debug)]
pub enum Command {
    CreateTextMessage {
        value: String,
        kind: String,
    },
    CreateFileMessage {
        file: Option<UploadedFile>,
        file_type: Option<String>,
    },
    CreateGeoMessage {
        latitude: f64,
        longitude: f64,
        kind: String,
    },
    DeleteMessages,
    /// Any other command name, kept for logging
    Unknown(String),
}

impl Command {
    /// Build a command from body fields and an optional staged attachment.
    ///
    /// A missing `method` decodes as `Unknown("")`. A missing text `value`
    /// becomes the empty string; a missing or non-numeric coordinate is an
    /// internal failure.
    pub fn decode(body: &CommandFields, file: Option<UploadedFile>) -> Result<Self, DispatchError> {
        let method = body.text(fields::METHOD).unwrap_or_default();

        let command = match method.as_str() {
            methods::CREATE_TEXT_MESSAGE => Command::CreateTextMessage {
                value: body.text(fields::VALUE).unwrap_or_default(),
                kind: body
                    .text(fields::TYPE)
                    .unwrap_or_else(|| TEXT_KIND.to_string()),
            },
            methods::CREATE_FILE_MESSAGE => {
                let declared_mtime = body.integer(fields::LAST_MODIFIED);
                let file = file.map(|f| match (f.last_modified, declared_mtime) {
                    (None, Some(millis)) => f.with_last_modified(millis),
                    _ => f,
                });
                Command::CreateFileMessage {
                    file,
                    file_type: body.text(fields::FILE_TYPE),
                }
            }
            methods::CREATE_GEO_MESSAGE => Command::CreateGeoMessage {
                latitude: body.coordinate(fields::LATITUDE)?,
                longitude: body.coordinate(fields::LONGITUDE)?,
                kind: body
                    .text(fields::TYPE)
                    .unwrap_or_else(|| GEO_KIND.to_string()),
            },
            methods::DELETE_MESSAGES => Command::DeleteMessages,
            _ => Command::Unknown(method),
        };

        Ok(command)
    }

    /// Wire name of the command
    pub fn name(&self) -> &str {
        match self {
            Command::CreateTextMessage { .. } => methods::CREATE_TEXT_MESSAGE,
            Command::CreateFileMessage { .. } => methods::CREATE_FILE_MESSAGE,
            Command::CreateGeoMessage { .. } => methods::CREATE_GEO_MESSAGE,
            Command::DeleteMessages => methods::DELETE_MESSAGES,
            Command::Unknown(name) => name,
        }
    }
}

/// Untyped body fields, whatever the body encoding.
///
/// JSON bodies keep their value types; form and multipart text fields are
/// all strings. Accessors accept either.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandFields(Map<String, Value>);

impl CommandFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields from a JSON body, which must be an object
    pub fn from_json(value: Value) -> Result<Self, DispatchError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DispatchError::internal(format!(
                "request body must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Fields from decoded name/value pairs (form bodies). Later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = Self::new();
        for (name, value) in pairs {
            fields.insert_text(name, value);
        }
        fields
    }

    /// Record a text field
    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), Value::String(value.into()));
    }

    /// Field as a string. Numbers and booleans are rendered; null is absent.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Field as a float, from a JSON number or a numeric string
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.0.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Field as a non-negative integer, from a JSON number or a numeric string
    pub fn integer(&self, name: &str) -> Option<u64> {
        match self.0.get(name)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }
    }

    fn coordinate(&self, name: &str) -> Result<f64, DispatchError> {
        self.number(name).ok_or_else(|| {
            DispatchError::internal(format!("{} is missing or not a number", name))
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Raw `offset`/`limit` query parameters of a feed read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl FeedQuery {
    pub fn new(offset: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            offset: offset.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    /// Collect the parameters from decoded query pairs. The first occurrence
    /// of a repeated key wins; unrelated keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_ref() {
                "offset" => &mut query.offset,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// Resolve to a window. Absent, unparsable and negative values fall back
    /// to the configured defaults independently of each other.
    pub fn window(&self, defaults: &FeedConfig) -> Window {
        let mut window = defaults.default_window();
        if let Some(offset) = parse_count(self.offset.as_deref()) {
            window.offset = offset;
        }
        if let Some(limit) = parse_count(self.limit.as_deref()) {
            window.limit = limit;
        }
        window
    }
}

/// Leading-integer parse: surrounding whitespace and an optional sign, then
/// the leading decimal digits. Anything after them is ignored, so `"3abc"`
/// and `"2.0"` read as 3 and 2. No digits or a negative value gives `None`;
/// values too large for `usize` saturate.
fn parse_count(raw: Option<&str>) -> Option<usize> {
    let raw = raw?.trim();
    let (negative, unsigned) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<usize>().unwrap_or(usize::MAX);
    if negative && value > 0 {
        return None;
    }
    Some(value)
}
