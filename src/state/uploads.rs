//! Knowledge-base file uploads
//!
//! Each file goes through three steps: request a signed url, PUT the bytes to
//! it, then register the stored object to get an attachment id. A file only
//! counts as attached once all three succeed. Failures are recorded on that
//! file's entry and never retried.

use crate::api::{ApiError, AttachmentRegistration, CallboardApi, UploadTarget};
use futures::future::join_all;
use std::path::Path;
use thiserror::Error;

const UPLOAD_FAILED_MESSAGE: &str = "File upload failed";

/// File extensions accepted for the knowledge base
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "csv", "xlsx", "xls"];

/// Why a local file could not be picked for upload
#[derive(Debug, Error)]
pub enum FileSelectError {
    #[error("Unsupported file type: {0} (accepted: .pdf, .doc, .docx, .txt, .csv, .xlsx, .xls)")]
    UnsupportedType(String),
    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A file read from disk, ready to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    /// Build a file from an in-memory buffer, inferring the MIME type from the name
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, FileSelectError> {
        let name = name.into();
        let mime_type = mime_type_for(&name)
            .ok_or_else(|| FileSelectError::UnsupportedType(name.clone()))?
            .to_string();
        Ok(Self {
            size: bytes.len() as u64,
            name,
            mime_type,
            bytes,
        })
    }

    /// Read a file from disk. The extension is checked before reading.
    pub async fn read(path: &Path) -> Result<Self, FileSelectError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if mime_type_for(&name).is_none() {
            return Err(FileSelectError::UnsupportedType(name));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| FileSelectError::Read {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_bytes(name, bytes)
    }
}

/// MIME type for an accepted file name, `None` if the extension is not accepted
pub fn mime_type_for(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        _ => return None,
    };
    Some(mime)
}

/// Human readable size: bytes, KB or MB with one decimal
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Uploading,
    Success { attachment_id: String },
    Error { message: String },
}

/// One file in the upload list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    /// Local handle, stable for the life of the list
    pub entry_id: u64,
    pub file_name: String,
    pub file_size: u64,
    pub status: UploadStatus,
}

impl UploadItem {
    pub fn attachment_id(&self) -> Option<&str> {
        match &self.status {
            UploadStatus::Success { attachment_id } => Some(attachment_id),
            _ => None,
        }
    }
}

/// Upload list backing the "Reference Data" section
#[derive(Debug, Clone, Default)]
pub struct FileUploads {
    items: Vec<UploadItem>,
    next_entry_id: u64,
}

impl FileUploads {
    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True while any file is mid-upload
    pub fn is_uploading(&self) -> bool {
        self.items
            .iter()
            .any(|u| matches!(u.status, UploadStatus::Uploading))
    }

    /// Attachment ids of successful uploads, in list order
    pub fn attachment_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|u| u.attachment_id().map(str::to_string))
            .collect()
    }

    /// Upload one file, returning its attachment id
    pub async fn upload_file(
        &mut self,
        api: &dyn CallboardApi,
        file: LocalFile,
    ) -> Result<String, ApiError> {
        let entry_id = self.begin(&file);
        let result = run_upload(api, file).await;
        self.finish(entry_id, &result);
        result
    }

    /// Upload several files concurrently; one failing does not stop the others
    pub async fn upload_files(
        &mut self,
        api: &dyn CallboardApi,
        files: Vec<LocalFile>,
    ) -> Vec<Result<String, ApiError>> {
        let entry_ids: Vec<u64> = files.iter().map(|f| self.begin(f)).collect();
        let results = join_all(files.into_iter().map(|f| run_upload(api, f))).await;

        for (entry_id, result) in entry_ids.iter().zip(&results) {
            self.finish(*entry_id, result);
        }
        results
    }

    /// Drop a file from the list. Returns false if no such entry.
    pub fn remove_file(&mut self, entry_id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|u| u.entry_id != entry_id);
        self.items.len() != before
    }

    fn begin(&mut self, file: &LocalFile) -> u64 {
        let entry_id = self.next_entry_id;
        self.next_entry_id += 1;
        self.items.push(UploadItem {
            entry_id,
            file_name: file.name.clone(),
            file_size: file.size,
            status: UploadStatus::Uploading,
        });
        entry_id
    }

    fn finish(&mut self, entry_id: u64, result: &Result<String, ApiError>) {
        let Some(item) = self.items.iter_mut().find(|u| u.entry_id == entry_id) else {
            // Removed while in flight
            return;
        };

        item.status = match result {
            Ok(attachment_id) => {
                tracing::info!(file = %item.file_name, %attachment_id, "Attachment uploaded");
                UploadStatus::Success {
                    attachment_id: attachment_id.clone(),
                }
            }
            Err(err) => {
                tracing::warn!(file = %item.file_name, error = %err, "Attachment upload failed");
                let message = if err.message().is_empty() {
                    UPLOAD_FAILED_MESSAGE.to_string()
                } else {
                    err.message().to_string()
                };
                UploadStatus::Error { message }
            }
        };
    }
}

async fn run_upload(api: &dyn CallboardApi, file: LocalFile) -> Result<String, ApiError> {
    let LocalFile {
        name,
        size,
        mime_type,
        bytes,
    } = file;

    let target: UploadTarget = api.request_upload_url().await?;
    api.upload_to_signed_url(&target.signed_url, bytes).await?;

    // TODO: delete the stored object when registration fails; needs a backend endpoint
    api.register_attachment(&AttachmentRegistration {
        key: target.key,
        file_name: name,
        file_size: size,
        mime_type,
    })
    .await
}
