//! Error types for the assistant

use thiserror::Error;
use vitrine_http::HttpError;
use vitrine_search::SearchError;

pub type Result<T> = std::result::Result<T, AssistantError>;

#[derive(Debug, Error)]
pub enum AssistantError {
    /// The shopper gave nothing to search for
    #[error("A product description is required")]
    EmptyDescription,

    #[error("A product name is required")]
    MissingProductName,

    /// Authentication failed (never includes key details)
    #[error("Authentication with the language model failed")]
    AuthError,

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Network error: {0}")]
    NetworkError(String),

    /// Generic chat-completion failure
    #[error("Language model error: {0}")]
    ModelError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl AssistantError {
    /// Whether the failure came from the catalog rather than the model
    pub fn is_service_failure(&self) -> bool {
        matches!(self, AssistantError::Search(e) if e.is_service_failure())
    }
}

impl From<HttpError> for AssistantError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::HttpStatus { status, .. } if status.as_u16() == 401 => {
                AssistantError::AuthError
            }
            HttpError::HttpStatus { status, .. } if status.as_u16() == 429 => {
                AssistantError::RateLimited(60)
            }
            HttpError::HttpStatus { status, message } => {
                AssistantError::ModelError(format!("HTTP {status}: {message}"))
            }
            HttpError::RequestFailed(e) if e.is_timeout() => {
                AssistantError::ModelError("Request timeout".to_string())
            }
            HttpError::RequestFailed(e) => AssistantError::NetworkError(e.to_string()),
            HttpError::InvalidUrl(e) | HttpError::InvalidProxy(e) | HttpError::BuildError(e) => {
                AssistantError::ConfigError(e)
            }
            other => AssistantError::ModelError(other.to_string()),
        }
    }
}
