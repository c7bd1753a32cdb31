//! Search error types

use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors surfaced by the relaxation engine.
///
/// Invalid interpreted filters and an unreachable values service are
/// recovered inside the engine and never show up here.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A catalog query failed; the whole search is abandoned
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),

    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),
}

impl SearchError {
    /// Whether the caller should report a generic service failure
    pub fn is_service_failure(&self) -> bool {
        matches!(self, SearchError::CatalogUnavailable(_))
    }
}
