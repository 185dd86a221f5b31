//! Mapping failed HTTP responses onto [`AgoraError`].
//!
//! The platform returns JSON bodies such as `{"message": "..."}` or
//! `{"detail": "..."}` on failure. The message is kept so it can be shown to
//! the user; anything unreadable falls back to the status text.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::AgoraError;

/// Default wait reported for a 429 without a usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    /// Retry-After header value in seconds, if available
    pub retry_after: Option<u64>,
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Build from a non-success status and the raw response body.
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.detail).or(b.error))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                format!(
                    "request failed ({} {})",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )
            });
        Self {
            status,
            retry_after: None,
            message,
        }
    }

    pub fn with_retry_after(mut self, seconds: Option<u64>) -> Self {
        self.retry_after = seconds;
        self
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED || self.status == StatusCode::FORBIDDEN
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status.as_u16())
    }
}

impl From<ApiError> for AgoraError {
    fn from(error: ApiError) -> Self {
        if error.is_rate_limited() {
            return AgoraError::RateLimited(error.retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS));
        }
        if error.is_unauthorized() {
            return AgoraError::Auth(error.message);
        }
        AgoraError::Api(error.message)
    }
}
