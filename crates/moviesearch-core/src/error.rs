//! Error types for the movie search library
//!
//! This module defines all error types used throughout the library.
//! MovieSearchError implements Serialize for Tauri compatibility.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::config::PaginationMode;

/// Error type for movie search operations
#[derive(Error, Debug)]
pub enum MovieSearchError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Remote service answered with a non-success status
    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Response body is not a valid search response
    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    /// Requested page is outside the navigable range
    #[error("Invalid page number: {0}")]
    InvalidPage(u32),

    /// Operation belongs to the other pagination mode
    #[error("`{operation}` is not available in {mode} mode")]
    ModeMismatch {
        operation: &'static str,
        mode: PaginationMode,
    },
}

impl MovieSearchError {
    /// Whether the remote service rejected the credential (HTTP 401).
    ///
    /// A missing or invalid `TMDB_TOKEN` surfaces this way on the first fetch.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, MovieSearchError::ServerError { status: 401, .. })
    }
}

/// Serialize MovieSearchError as a string for Tauri compatibility
impl Serialize for MovieSearchError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for movie search operations
pub type Result<T> = std::result::Result<T, MovieSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let error = MovieSearchError::ServerError {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(error.to_string(), "Server returned 503: Service Unavailable");
    }

    #[test]
    fn test_decode_error_display() {
        let error = MovieSearchError::DecodeError("missing field `results`".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to decode response: missing field `results`"
        );
    }

    #[test]
    fn test_invalid_page_display() {
        let error = MovieSearchError::InvalidPage(0);
        assert_eq!(error.to_string(), "Invalid page number: 0");
    }

    #[test]
    fn test_mode_mismatch_display() {
        let error = MovieSearchError::ModeMismatch {
            operation: "load_more",
            mode: PaginationMode::Paged,
        };
        assert_eq!(error.to_string(), "`load_more` is not available in paged mode");
    }

    #[test]
    fn test_is_unauthorized() {
        let unauthorized = MovieSearchError::ServerError {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert!(unauthorized.is_unauthorized());

        let server = MovieSearchError::ServerError {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!server.is_unauthorized());
        assert!(!MovieSearchError::InvalidPage(3).is_unauthorized());
    }

    #[test]
    fn test_error_serialize() {
        let error = MovieSearchError::InvalidPage(501);
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"Invalid page number: 501\"");
    }
}
