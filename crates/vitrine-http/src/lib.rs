//! HTTP plumbing for Vitrine
//!
//! Talks to the remote product catalog: filtered product queries, per-attribute
//! value lists, single products, similar-product neighbours and customers.
//!
//! ## Features
//!
//! - **Configurable client**: timeouts, retries, proxy, user-agent
//! - **Retry middleware**: exponential backoff on transient failures
//! - **Bearer auth**: token fetched once and refreshed after a 401
//! - **Collaborator impls**: [`HttpCatalogClient`] implements the search
//!   crate's `CatalogClient` and `ValuesService`

pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;

pub use auth::{Credentials, TokenProvider};
pub use catalog::{
    Customer, HttpCatalogClient, ProductNeighbor, ProductSummary, SimilarProducts,
};
pub use client::{parse_base_url, HttpClient};
pub use config::HttpConfig;
pub use error::{HttpError, Result};
pub use middleware::{RetryConfig, RetryMiddleware};

pub use reqwest::StatusCode;
