//! Error types for the web front end.
//!
//! Browsing failures themselves are [`ndnfs_core::BrowseError`]. These cover
//! the browser plumbing around them:
//!
//! - [`FetchError`] - HTTP requests to the gateway
//! - [`StorageError`] - localStorage persistence of settings

use std::fmt;

/// Errors raised while talking to the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Browser window not available
    NoWindow,
    /// Failed to create HTTP request
    RequestCreationFailed,
    /// Network request failed (CORS, connection refused, etc.)
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    HttpError(u16),
    /// Failed to read response body
    ResponseReadFailed,
    /// Interest lifetime elapsed before the gateway answered
    Timeout,
}

impl FetchError {
    /// Check if the gateway had nothing to return for the name.
    ///
    /// The gateway answers 404 when no data came back from the network, which
    /// the browser reports the same way as a lifetime expiry.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::Timeout | Self::HttpError(404 | 504))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "Browser window not available"),
            Self::RequestCreationFailed => write!(f, "Failed to create request"),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::HttpError(status) => write!(f, "HTTP error: {}", status),
            Self::ResponseReadFailed => write!(f, "Failed to read response"),
            Self::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Settings persistence errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// localStorage not available.
    StorageUnavailable,
    /// Failed to serialize settings to JSON.
    SerializationFailed,
    /// Failed to write to localStorage.
    SaveFailed,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageUnavailable => write!(f, "localStorage not available"),
            Self::SerializationFailed => write!(f, "failed to serialize settings"),
            Self::SaveFailed => write!(f, "failed to save to localStorage"),
        }
    }
}

impl std::error::Error for StorageError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_statuses() {
        assert!(FetchError::Timeout.is_no_data());
        assert!(FetchError::HttpError(404).is_no_data());
        assert!(FetchError::HttpError(504).is_no_data());
        assert!(!FetchError::HttpError(500).is_no_data());
        assert!(!FetchError::NetworkError("refused".into()).is_no_data());
    }

    #[test]
    fn test_display() {
        assert_eq!(FetchError::HttpError(502).to_string(), "HTTP error: 502");
        assert_eq!(
            StorageError::StorageUnavailable.to_string(),
            "localStorage not available"
        );
    }
}
