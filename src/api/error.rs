//! Error type shared by every API call

use thiserror::Error;

/// Fallback message when a failed response carries no body
pub const DEFAULT_FAILURE_MESSAGE: &str = "API request failed";

/// A failed API request.
///
/// `status` is present only when the server answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{message}")]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },
}

impl ApiError {
    /// Build a failure without an HTTP status (transport or decode errors)
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status: None,
            message: message.into(),
        }
    }

    /// Build a failure from a non-2xx response body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            DEFAULT_FAILURE_MESSAGE.to_string()
        } else {
            body.to_string()
        };
        Self::RequestFailed {
            status: Some(status),
            message,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::RequestFailed { message, .. } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailed {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::request_failed(format!("Invalid response body: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_body_text() {
        let err = ApiError::from_status(422, "name is required");
        assert_eq!(err.message(), "name is required");
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_from_status_empty_body_falls_back() {
        let err = ApiError::from_status(500, "");
        assert_eq!(err.message(), DEFAULT_FAILURE_MESSAGE);

        let err = ApiError::from_status(502, "   \n");
        assert_eq!(err.message(), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn test_request_failed_has_no_status() {
        let err = ApiError::request_failed("connection refused");
        assert!(err.status().is_none());
        assert_eq!(err.message(), "connection refused");
    }
}
