//! Request and response bodies that only exist on the wire

use serde::{Deserialize, Serialize};

/// Response of `POST /agents` and `POST /attachments`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedId {
    pub id: String,
}

/// Response of `POST /attachments/upload-url`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub key: String,
    pub signed_url: String,
}

/// Body of `POST /attachments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRegistration {
    pub key: String,
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: String,
}

/// Body of `POST /agents/:id/test-call`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCallRequest {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
}
