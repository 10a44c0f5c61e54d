//! Document model and upload payloads.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

/// A stored document belonging to exactly one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub filename: String,
    #[serde(default, alias = "s3_key")]
    pub storage_key: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
    pub project_id: i64,
    #[serde(default)]
    pub uploaded_by: Option<i64>,
    pub uploaded_at: String,
}

/// A file to send in an upload or replace call.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a local file into memory, keeping its file name.
    ///
    /// The content type is guessed from the extension.
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ClientError::Io(format!("{} has no file name", path.display())))?;
        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or("application/octet-stream", ext_to_content_type);
        Ok(Self::new(filename, content_type, bytes))
    }

    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part, ClientError> {
        reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.filename)
            .mime_str(&self.content_type)
            .map_err(|e| ClientError::Payload(format!("Invalid content type: {}", e)))
    }
}

/// Map a file extension to the MIME type sent with its upload.
fn ext_to_content_type(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}
