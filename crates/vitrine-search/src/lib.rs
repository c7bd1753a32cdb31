//! # Vitrine Search
//!
//! Progressive constraint-relaxation product search. Given an interpreted
//! (and untrusted) filter mapping, the engine returns a target-sized,
//! deduplicated set of catalog items plus an audit trail of every filter
//! combination it queried.
//!
//! ## Components
//!
//! - **Domain value cache**: legal values per attribute, refreshed on a TTL
//! - **Filter validator**: drops any value that is not legal for its attribute
//! - **Similarity suggester**: lexical near-match alternates with a seeded random fallback
//! - **Relaxation engine**: query, substitute, relax, and finally fall back to an unfiltered query
//!
//! The catalog and the values service are collaborators behind the
//! [`CatalogClient`] and [`ValuesService`] traits.

pub mod attribute;
pub mod audit;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod filters;
pub mod item;
pub mod suggest;
pub mod validator;
pub mod values;

pub use attribute::Attribute;
pub use audit::{AuditEntry, AuditTrail};
pub use catalog::{CatalogClient, CatalogError, ValuesService};
pub use engine::{DefaultFilter, RelaxationEngine, SearchConfig, SearchOutcome};
pub use error::{Result, SearchError};
pub use filters::{CandidateFilters, FilterSet};
pub use item::CatalogItem;
pub use suggest::SimilaritySuggester;
pub use validator::validate;
pub use values::{
    DomainValueCache, DomainValues, SnapshotSource, DEFAULT_RETRY_INTERVAL, DEFAULT_VALUES_TTL,
};
