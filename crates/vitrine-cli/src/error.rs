// CLI error types and user-facing messages

use thiserror::Error;
use vitrine_assistant::AssistantError;
use vitrine_config::ConfigError;
use vitrine_http::{HttpError, StatusCode};
use vitrine_search::SearchError;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Catalog or model could not be reached
    #[error("Service error: {0}")]
    Service(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'vitrine --help' for usage information.", message)
            }
            CliError::Io(e) => format!("File operation failed: {}", e),
            CliError::Config(msg) => {
                format!("Configuration error: {}\n\nRun 'vitrine config' to check your configuration.", msg)
            }
            CliError::NotFound(what) => format!("{} was not found.", what),
            CliError::Auth(_) => {
                "Authentication failed.\n\nCheck catalog.username / catalog.password and llm.api_key.".to_string()
            }
            CliError::Service(_) => {
                "The product service is unavailable right now. Please try again later.".to_string()
            }
            CliError::Internal(msg) => format!("Internal error: {}\n\nPlease report this issue.", msg),
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other.to_string()),
        }
    }
}

impl From<HttpError> for CliError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::HttpStatus { status, message } if status == StatusCode::NOT_FOUND => {
                CliError::NotFound(if message.is_empty() { "Resource".to_string() } else { message })
            }
            HttpError::HttpStatus { status, message } if status == StatusCode::UNAUTHORIZED => {
                CliError::Auth(message)
            }
            HttpError::Auth(message) => CliError::Auth(message),
            HttpError::InvalidUrl(e) | HttpError::InvalidProxy(e) | HttpError::BuildError(e) => {
                CliError::Config(e)
            }
            other => CliError::Service(other.to_string()),
        }
    }
}

impl From<SearchError> for CliError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidConfig(msg) => CliError::Config(msg),
            SearchError::CatalogUnavailable(e) => CliError::Service(e.to_string()),
        }
    }
}

impl From<AssistantError> for CliError {
    fn from(err: AssistantError) -> Self {
        let message = err.to_string();
        match err {
            AssistantError::EmptyDescription | AssistantError::MissingProductName => {
                CliError::InvalidArgument { message }
            }
            AssistantError::Search(e) => e.into(),
            AssistantError::ConfigError(msg) => CliError::Config(msg),
            AssistantError::AuthError => CliError::Auth(message),
            _ => CliError::Service(message),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
