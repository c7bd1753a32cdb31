//! Collaborator seams: the remote catalog and its values service

use async_trait::async_trait;
use thiserror::Error;

use crate::attribute::Attribute;
use crate::filters::FilterSet;
use crate::item::CatalogItem;
use crate::values::DomainValues;

/// Failure of a remote catalog call.
///
/// An empty result is never an error; this type only describes calls that did
/// not complete.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog transport error: {0}")]
    Transport(String),

    #[error("Catalog returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Could not decode catalog response: {0}")]
    Decode(String),

    #[error("Catalog rejected credentials: {0}")]
    Unauthorized(String),
}

/// Executes one attribute-filtered catalog query.
///
/// Implementations must be idempotent and free of side effects from the
/// engine's point of view. Any retrying happens in here, not in the engine.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn query(
        &self,
        filters: &FilterSet,
        limit: usize,
    ) -> Result<Vec<CatalogItem>, CatalogError>;
}

/// Lists the legal values of each filterable attribute.
#[async_trait]
pub trait ValuesService: Send + Sync {
    /// Fetch every requested attribute in one batch
    async fn list_values(&self, attributes: &[Attribute]) -> Result<DomainValues, CatalogError>;
}
