//! Request body decoding.
//!
//! The body encoding is chosen from `Content-Type`:
//!
//! | Content-Type | Handling |
//! |--------------|----------|
//! | `multipart/form-data` | text parts become fields, the `file` part is staged to disk |
//! | `application/x-www-form-urlencoded` | name/value pairs |
//! | anything else | JSON object, or no fields when the body is empty |

use std::path::Path;

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{body::Bytes, Form};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::adapters::{StagedUpload, STAGING_PREFIX};
use crate::domain::command::fields;
use crate::domain::{Command, CommandFields, DispatchError};
use crate::ports::UploadedFile;

const MULTIPART: &str = "multipart/form-data";
const URLENCODED: &str = "application/x-www-form-urlencoded";

/// Decode a POST request into a command, staging any attachment under
/// `staging_dir`.
pub async fn decode_command(req: Request, staging_dir: &Path) -> Result<Command, DispatchError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase())
        .unwrap_or_default();

    let (fields, file) = if content_type.starts_with(MULTIPART) {
        let multipart = Multipart::from_request(req, &()).await?;
        read_multipart(multipart, staging_dir).await?
    } else if content_type.starts_with(URLENCODED) {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, &()).await?;
        (CommandFields::from_pairs(pairs), None)
    } else {
        let body = Bytes::from_request(req, &()).await?;
        (read_json(&body)?, None)
    };

    Command::decode(&fields, file)
}

fn read_json(body: &[u8]) -> Result<CommandFields, DispatchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CommandFields::new());
    }
    CommandFields::from_json(serde_json::from_slice(body)?)
}

async fn read_multipart(
    mut multipart: Multipart,
    staging_dir: &Path,
) -> Result<(CommandFields, Option<UploadedFile>), DispatchError> {
    let mut command_fields = CommandFields::new();
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let filename = field
            .file_name()
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        match filename {
            Some(filename) if name == fields::FILE => {
                if file.is_some() {
                    debug!(%filename, "Ignoring extra file part");
                    continue;
                }
                file = Some(stage_file(field, filename, staging_dir).await?);
            }
            _ => {
                let value = field.text().await?;
                command_fields.insert_text(name, value);
            }
        }
    }

    Ok((command_fields, file))
}

async fn stage_file(
    mut field: axum::extract::multipart::Field<'_>,
    filename: String,
    staging_dir: &Path,
) -> Result<UploadedFile, DispatchError> {
    let content_type = field.content_type().map(str::to_string);

    tokio::fs::create_dir_all(staging_dir).await?;
    let (std_file, path) = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempfile_in(staging_dir)?
        .into_parts();

    // `path` deletes the staging file if anything below fails
    let mut out = tokio::fs::File::from_std(std_file);
    let mut size = 0u64;
    while let Some(chunk) = field.chunk().await? {
        out.write_all(&chunk).await?;
        size += chunk.len() as u64;
    }
    out.flush().await?;
    drop(out);

    debug!(%filename, size, path = %path.display(), "Upload staged");

    let mut upload = UploadedFile::new(filename, size, StagedUpload::new(path));
    if let Some(content_type) = content_type {
        upload = upload.with_content_type(content_type);
    }
    Ok(upload)
}
