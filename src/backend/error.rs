//! Error types for backend requests.

use thiserror::Error;

/// Errors that can occur when talking to the monitoring backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The backend rejected the session or CSRF token.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_connect() {
            BackendError::Connection(err.to_string())
        } else if err.is_decode() {
            BackendError::Parse(err.to_string())
        } else {
            BackendError::Http(err.to_string())
        }
    }
}
