//! HTTP client error types

use thiserror::Error;
use vitrine_search::CatalogError;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP client errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network request failed
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid proxy configuration
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// HTTP error status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// Token endpoint refused the credentials or returned no token
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Retry limit exceeded
    #[error("Retry limit exceeded after {attempts} attempts: {last}")]
    RetryLimitExceeded { attempts: u32, last: String },

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),
}

impl HttpError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::RequestFailed(e) => e.is_timeout() || e.is_connect(),
            HttpError::HttpStatus { status, .. } => {
                // Retry on 5xx server errors and 429 rate limit
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            HttpError::HttpStatus { status, .. } if *status == reqwest::StatusCode::UNAUTHORIZED
        )
    }
}

impl From<HttpError> for CatalogError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::HttpStatus { status, message } if status == reqwest::StatusCode::UNAUTHORIZED => {
                CatalogError::Unauthorized(message)
            }
            HttpError::HttpStatus { status, message } => CatalogError::Status {
                status: status.as_u16(),
                message,
            },
            HttpError::Auth(message) => CatalogError::Unauthorized(message),
            HttpError::Decode(message) => CatalogError::Decode(message),
            other => CatalogError::Transport(other.to_string()),
        }
    }
}
