//! Trait abstraction for the API client to enable mocking in tests

use super::error::ApiError;
use super::types::{AttachmentRegistration, TestCallRequest, UploadTarget};
use crate::state::{AgentPayload, Language, Model, Prompt, Voice};
use async_trait::async_trait;

/// Remote operations the dashboard depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallboardApi: Send + Sync {
    /// Create an agent, returning its new id
    async fn create_agent(&self, payload: &AgentPayload) -> Result<String, ApiError>;

    /// Replace an existing agent's configuration
    async fn update_agent(&self, agent_id: &str, payload: &AgentPayload) -> Result<(), ApiError>;

    /// Ask the backend to place a test call with the given agent
    async fn start_test_call(
        &self,
        agent_id: &str,
        request: &TestCallRequest,
    ) -> Result<(), ApiError>;

    /// Step 1 of an upload: obtain an object key and a signed PUT url
    async fn request_upload_url(&self) -> Result<UploadTarget, ApiError>;

    /// Step 2 of an upload: PUT the raw bytes to the signed url
    async fn upload_to_signed_url(&self, signed_url: &str, bytes: Vec<u8>) -> Result<(), ApiError>;

    /// Step 3 of an upload: register the stored object, returning the attachment id
    async fn register_attachment(
        &self,
        registration: &AttachmentRegistration,
    ) -> Result<String, ApiError>;

    async fn list_languages(&self) -> Result<Vec<Language>, ApiError>;

    async fn list_voices(&self) -> Result<Vec<Voice>, ApiError>;

    async fn list_prompts(&self) -> Result<Vec<Prompt>, ApiError>;

    async fn list_models(&self) -> Result<Vec<Model>, ApiError>;
}
