//! Toast notifications for action results.
//!
//! Failed mutations and blocked actions end in a toast; failed list loads
//! do not, they show a retry affordance in the list itself.

use std::time::{Duration, Instant};

use crate::error::AgoraError;

/// How long a toast stays up unless dismissed.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub timestamp: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl Toast {
    pub fn new(message: String, level: ToastLevel) -> Self {
        Self {
            message,
            level,
            timestamp: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Error)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Success)
    }

    /// Toast for a failed action.
    ///
    /// Validation and membership problems are warnings: the user can fix
    /// them without retrying anything.
    pub fn from_error(error: &AgoraError) -> Self {
        match error {
            AgoraError::Validation(_) | AgoraError::NotMember(_) => {
                Self::warning(error.user_message())
            }
            _ => Self::error(error.user_message()),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.timestamp) >= TOAST_TTL
    }
}
