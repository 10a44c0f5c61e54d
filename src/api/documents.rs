//! Documents resource: `/project/{id}/documents`, `/document/{id}`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use reqwest::multipart::Form;
use tokio::io::AsyncWriteExt;

use crate::auth::AuthGateway;
use crate::errors::ClientError;
use crate::models::{Document, UploadFile};

#[derive(Clone)]
pub struct DocumentsApi {
    gateway: Arc<AuthGateway>,
}

impl DocumentsApi {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    /// GET /project/{id}/documents - Documents of one project.
    pub async fn list_by_project(&self, project_id: i64) -> Result<Vec<Document>, ClientError> {
        let request = self
            .gateway
            .transport()
            .get(&format!("/project/{}/documents", project_id))?;
        self.gateway.send_json(request).await
    }

    /// POST /project/{id}/documents - Upload one or more files in a single call.
    pub async fn upload(&self, project_id: i64, files: Vec<UploadFile>) -> Result<Vec<Document>, ClientError> {
        if files.is_empty() {
            return Err(ClientError::Payload("No files to upload".to_string()));
        }

        let mut form = Form::new();
        for file in files {
            form = form.part("files", file.into_part()?);
        }

        let request = self
            .gateway
            .transport()
            .post(&format!("/project/{}/documents", project_id))?
            .multipart(form);
        self.gateway
            .send_json(request)
            .await
            .map_err(|e| e.refine_validation(ClientError::Payload))
    }

    /// PUT /document/{id} - Replace a document's content.
    pub async fn replace(&self, document_id: i64, file: UploadFile) -> Result<Document, ClientError> {
        let form = Form::new().part("file", file.into_part()?);
        let request = self
            .gateway
            .transport()
            .put(&format!("/document/{}", document_id))?
            .multipart(form);
        self.gateway
            .send_json(request)
            .await
            .map_err(|e| e.refine_validation(ClientError::Payload))
    }

    /// GET /document/{id} - Stream a document to `dest_dir` and return the saved path.
    ///
    /// The file is named after `filename` when given, else after the server's
    /// `Content-Disposition`, else `document-{id}`.
    pub async fn download(
        &self,
        document_id: i64,
        filename: Option<&str>,
        dest_dir: &Path,
    ) -> Result<PathBuf, ClientError> {
        let request = self.gateway.transport().get(&format!("/document/{}", document_id))?;
        let mut response = self.gateway.send(request).await?;

        let name = filename
            .map(str::to_string)
            .or_else(|| disposition_filename(response.headers()))
            .and_then(|name| sanitize_filename(&name))
            .unwrap_or_else(|| format!("document-{}", document_id));

        tokio::fs::create_dir_all(dest_dir).await?;
        let path = dest_dir.join(name);
        let mut file = tokio::fs::File::create(&path).await?;
        let mut written = 0usize;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len();
        }
        file.flush().await?;

        tracing::debug!("Saved document {} to {:?} ({} bytes)", document_id, path, written);
        Ok(path)
    }

    /// DELETE /document/{id} - Delete one document.
    pub async fn delete(&self, document_id: i64) -> Result<(), ClientError> {
        let request = self
            .gateway
            .transport()
            .delete(&format!("/document/{}", document_id))?;
        self.gateway.send_empty(request).await
    }
}

/// Filename from `Content-Disposition: attachment; filename=...`.
fn disposition_filename(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
}

/// Keep only the final path component; reject names that would escape the target dir.
fn sanitize_filename(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    match last {
        "" | "." | ".." => None,
        other => Some(other.to_string()),
    }
}
