//! REST client for the campaigns/agents backend

mod client;
mod error;
mod traits;
mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use traits::CallboardApi;
pub use types::{AttachmentRegistration, TestCallRequest, UploadTarget};

#[cfg(test)]
pub use traits::MockCallboardApi;
