//! Transient notifications shown in the status bar

use std::time::{Duration, Instant};

/// How long a toast stays visible
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub created_at: Instant,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_toast_is_not_expired() {
        let toast = Toast::success("Agent saved successfully!");
        assert_eq!(toast.kind, ToastKind::Success);
        assert!(!toast.is_expired());
    }

    #[test]
    fn test_old_toast_is_expired() {
        let mut toast = Toast::error("boom");
        let Some(past) = Instant::now().checked_sub(TOAST_DURATION + Duration::from_millis(1))
        else {
            // Monotonic clock too close to its origin to backdate
            return;
        };
        toast.created_at = past;
        assert!(toast.is_expired());
    }
}
