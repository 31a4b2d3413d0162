//! Fetch errors surfaced by content sources.

use std::time::Duration;

/// Why a resource could not be populated from the remote content API.
///
/// Cloneable so a single outcome can be handed to every caller waiting on the
/// same in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("invalid API response format: {message}")]
    Malformed { message: String },

    #[error("request timed out after {}ms", .after.as_millis())]
    Timeout { after: Duration },

    #[error("fetch task aborted: {message}")]
    Aborted { message: String },
}

/// Result alias for content source calls.
pub type FetchResult<T> = Result<T, FetchError>;

impl FetchError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport { message: msg.into() }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed { message: msg.into() }
    }

    pub fn aborted(msg: impl Into<String>) -> Self {
        Self::Aborted { message: msg.into() }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return Self::Status { status: status.as_u16() };
        }
        if e.is_decode() {
            return Self::malformed(e.to_string());
        }
        Self::transport(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self { Self::malformed(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_read_like_the_site_logs() {
        assert_eq!(FetchError::Status { status: 503 }.to_string(), "HTTP error! status: 503");
        assert_eq!(
            FetchError::Timeout { after: Duration::from_millis(1500) }.to_string(),
            "request timed out after 1500ms"
        );
    }

    #[test]
    fn json_errors_are_malformed() {
        let err: FetchError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, FetchError::Malformed { .. }));
    }
}
