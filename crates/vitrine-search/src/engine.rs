//! Relaxation search engine
//!
//! One search is a short-lived session that moves through
//! `Accumulating -> Done` or `Accumulating -> Exhausted -> Fallback -> Done`.
//! Every catalog query is awaited before the next decision because which
//! attribute to substitute or drop depends on the exact count so far.
//!
//! Each outer attempt:
//!
//! 1. queries the working filters;
//! 2. tries up to `max_alternates` near-match values for each substitutable
//!    attribute (colour first, then subcategory);
//! 3. drops the least important attribute still present.
//!
//! When the attempts run out, or dropping would leave no constraint at all,
//! a single unfiltered query tops the results up.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::attribute::Attribute;
use crate::audit::AuditTrail;
use crate::catalog::CatalogClient;
use crate::error::{Result, SearchError};
use crate::filters::{CandidateFilters, FilterSet};
use crate::item::CatalogItem;
use crate::suggest::SimilaritySuggester;
use crate::validator::validate;
use crate::values::{DomainValueCache, DomainValues};

/// Filter used when nothing the interpreter produced survives validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultFilter {
    pub attribute: Attribute,
    pub value: String,
}

impl Default for DefaultFilter {
    fn default() -> Self {
        Self {
            attribute: Attribute::SubCategory,
            value: "Accessories".to_string(),
        }
    }
}

/// Engine limits. The stopping threshold and the return cap are separate knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Stop searching once this many unique items are accumulated
    pub target_count: usize,
    /// Upper bound on outer attempts
    pub max_attempts: usize,
    /// Page size of every filtered query
    pub page_size: usize,
    /// Page size of the final unfiltered query
    pub fallback_page_size: usize,
    /// Maximum number of items returned
    pub result_cap: usize,
    /// Alternates tried per substitutable attribute per attempt
    pub max_alternates: usize,
    pub default_filter: DefaultFilter,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target_count: 5,
            max_attempts: 6,
            page_size: 15,
            fallback_page_size: 10,
            result_cap: 10,
            max_alternates: 3,
            default_filter: DefaultFilter::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_target_count(mut self, target_count: usize) -> Self {
        self.target_count = target_count;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_result_cap(mut self, result_cap: usize) -> Self {
        self.result_cap = result_cap;
        self
    }

    /// Reject limits that would make a search meaningless
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.target_count, "target_count"),
            (self.max_attempts, "max_attempts"),
            (self.page_size, "page_size"),
            (self.fallback_page_size, "fallback_page_size"),
            (self.result_cap, "result_cap"),
        ];
        for (value, name) in checks {
            if value == 0 {
                return Err(SearchError::InvalidConfig(format!(
                    "{name} must be greater than 0"
                )));
            }
        }
        if self.default_filter.value.is_empty() {
            return Err(SearchError::InvalidConfig(
                "default_filter.value must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of one search
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Earliest-discovered items first, at most `result_cap`
    pub items: Vec<CatalogItem>,
    /// One entry per catalog query, in issue order
    pub audit_trail: AuditTrail,
    /// Unique items accumulated before the cap was applied
    pub total_found: usize,
    pub fallback_used: bool,
    /// Outer attempts run
    pub attempts: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionState {
    Accumulating,
    Done,
    Exhausted,
    Fallback,
}

/// Request-scoped search state; owns its own copy of the filters
struct SearchSession {
    filters: FilterSet,
    items: Vec<CatalogItem>,
    seen: HashSet<i64>,
    attempt: usize,
    audit: AuditTrail,
    state: SessionState,
    target_count: usize,
}

impl SearchSession {
    fn new(filters: FilterSet, target_count: usize) -> Self {
        Self {
            filters,
            items: Vec::new(),
            seen: HashSet::new(),
            attempt: 0,
            audit: AuditTrail::new(),
            state: SessionState::Accumulating,
            target_count,
        }
    }

    /// Append items not seen before; returns how many were new
    fn merge(&mut self, batch: Vec<CatalogItem>) -> usize {
        let before = self.items.len();
        for item in batch {
            if self.seen.insert(item.product_id) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    fn satisfied(&self) -> bool {
        self.items.len() >= self.target_count
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Search session {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Drives repeated catalog queries until the target count is met.
///
/// Shared across requests; per-search state lives in a session that is
/// created and dropped inside [`RelaxationEngine::search`].
pub struct RelaxationEngine {
    catalog: Arc<dyn CatalogClient>,
    values: Arc<DomainValueCache>,
    suggester: SimilaritySuggester,
    config: SearchConfig,
}

impl RelaxationEngine {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        values: Arc<DomainValueCache>,
        config: SearchConfig,
    ) -> Self {
        Self {
            catalog,
            values,
            suggester: SimilaritySuggester::new(),
            config,
        }
    }

    /// Replace the suggester, e.g. with a seeded one
    pub fn with_suggester(mut self, suggester: SimilaritySuggester) -> Self {
        self.suggester = suggester;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn values(&self) -> &Arc<DomainValueCache> {
        &self.values
    }

    /// Search with the configured target count and attempt bound
    pub async fn search(&self, candidates: &CandidateFilters) -> Result<SearchOutcome> {
        self.search_with(
            candidates,
            self.config.target_count,
            self.config.max_attempts,
        )
        .await
    }

    /// Search with explicit limits
    pub async fn search_with(
        &self,
        candidates: &CandidateFilters,
        target_count: usize,
        max_attempts: usize,
    ) -> Result<SearchOutcome> {
        self.config.validate()?;
        if target_count == 0 || max_attempts == 0 {
            return Err(SearchError::InvalidConfig(
                "target count and attempt bound must be greater than 0".to_string(),
            ));
        }

        let values = self.values.snapshot().await;
        let mut filters = validate(candidates, &values);
        if filters.is_empty() {
            let default = &self.config.default_filter;
            warn!(
                "No interpreted filter survived validation, using {}={}",
                default.attribute, default.value
            );
            filters.insert(default.attribute, default.value.clone());
        }
        info!("Starting relaxation search with filters {:?}", filters);

        let mut session = SearchSession::new(filters, target_count);

        while !session.satisfied() && session.attempt < max_attempts {
            session.attempt += 1;
            let label = format!("attempt {}", session.attempt);
            let base = session.filters.clone();
            self.run_query(&mut session, label, &base, self.config.page_size)
                .await?;
            if session.satisfied() {
                break;
            }

            for attribute in Attribute::substitution_order() {
                if session.satisfied() {
                    break;
                }
                self.substitute(&mut session, attribute, &values).await?;
            }
            if session.satisfied() {
                break;
            }

            // Dropping the last attribute would make this an unfiltered
            // query, which is the fallback's job.
            match session.filters.lowest_priority() {
                Some(attribute) if session.filters.len() > 1 => {
                    session.filters.remove(attribute);
                    info!(
                        "Relaxed {attribute}; continuing with {:?}",
                        session.filters
                    );
                }
                _ => {
                    debug!("Nothing left to relax after attempt {}", session.attempt);
                    break;
                }
            }
        }

        if session.satisfied() {
            session.transition(SessionState::Done);
        } else {
            session.transition(SessionState::Exhausted);
            warn!(
                "Target of {} not reached ({} found), running unfiltered fallback",
                target_count,
                session.items.len()
            );
            session.transition(SessionState::Fallback);
            self.run_query(
                &mut session,
                "fallback".to_string(),
                &FilterSet::new(),
                self.config.fallback_page_size,
            )
            .await?;
            session.transition(SessionState::Done);
        }

        let fallback_used = session.audit.contains("fallback");
        let total_found = session.items.len();
        let mut items = session.items;
        items.truncate(self.config.result_cap);

        info!(
            "Search finished: {} found, {} returned, {} queries",
            total_found,
            items.len(),
            session.audit.len()
        );

        Ok(SearchOutcome {
            items,
            audit_trail: session.audit,
            total_found,
            fallback_used,
            attempts: session.attempt,
        })
    }

    /// Try near-match values for one attribute, stopping once satisfied
    async fn substitute(
        &self,
        session: &mut SearchSession,
        attribute: Attribute,
        values: &DomainValues,
    ) -> Result<()> {
        let Some(current) = session.filters.get(attribute) else {
            return Ok(());
        };
        let alternates =
            self.suggester
                .suggest(values.get(attribute), current, self.config.max_alternates);

        for alternate in alternates {
            let variant = session.filters.with_value(attribute, alternate.as_str());
            let label = format!(
                "attempt {} ({} {})",
                session.attempt,
                attribute.label(),
                alternate
            );
            self.run_query(session, label, &variant, self.config.page_size)
                .await?;
            if session.satisfied() {
                break;
            }
        }
        Ok(())
    }

    /// Record, issue, and merge one catalog query
    async fn run_query(
        &self,
        session: &mut SearchSession,
        label: String,
        filters: &FilterSet,
        limit: usize,
    ) -> Result<()> {
        session.audit.record(label.as_str(), filters);
        let batch = self.catalog.query(filters, limit).await?;
        let hits = batch.len();
        let added = session.merge(batch);
        info!(
            "{label}: {:?} -> {hits} results, {added} new, {} total",
            filters,
            session.items.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns one page per call, in order; empty once exhausted
    struct QueuedCatalog {
        pages: Mutex<Vec<Vec<CatalogItem>>>,
    }

    #[async_trait]
    impl CatalogClient for QueuedCatalog {
        async fn query(
            &self,
            _filters: &FilterSet,
            _limit: usize,
        ) -> std::result::Result<Vec<CatalogItem>, CatalogError> {
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(pages.remove(0))
            }
        }
    }

    fn items(ids: &[i64]) -> Vec<CatalogItem> {
        ids.iter()
            .map(|id| CatalogItem::new(*id, format!("item {id}")))
            .collect()
    }

    fn engine(pages: Vec<Vec<CatalogItem>>, config: SearchConfig) -> RelaxationEngine {
        let values = DomainValues::new().with(Attribute::Gender, ["Men"]);
        RelaxationEngine::new(
            Arc::new(QueuedCatalog {
                pages: Mutex::new(pages),
            }),
            Arc::new(DomainValueCache::fixed(values)),
            config,
        )
        .with_suggester(SimilaritySuggester::seeded(1))
    }

    fn men() -> CandidateFilters {
        [("gender".to_string(), "Men".to_string())].into_iter().collect()
    }

    #[tokio::test]
    async fn test_duplicates_across_pages_are_merged_once() {
        let engine = engine(
            vec![items(&[1, 2, 2, 3]), items(&[3, 4, 5])],
            SearchConfig::default(),
        );
        let outcome = engine.search(&men()).await.unwrap();

        let ids: Vec<i64> = outcome.items.iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_result_cap_is_independent_of_target() {
        let config = SearchConfig::default().with_result_cap(3);
        let engine = engine(vec![items(&[1, 2, 3, 4, 5, 6, 7])], config);
        let outcome = engine.search(&men()).await.unwrap();

        assert_eq!(outcome.total_found, 7);
        assert_eq!(outcome.items.len(), 3);
        assert_eq!(outcome.items[0].product_id, 1);
    }

    #[tokio::test]
    async fn test_default_filter_replaces_invalid_input() {
        let engine = engine(vec![items(&[1, 2, 3, 4, 5])], SearchConfig::default());
        let candidates: CandidateFilters =
            [("basecolour".to_string(), "Purple".to_string())].into_iter().collect();
        let outcome = engine.search(&candidates).await.unwrap();

        let first = outcome.audit_trail.get("attempt 1").unwrap();
        assert_eq!(first.get(Attribute::SubCategory), Some("Accessories"));
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn test_single_attribute_goes_straight_to_fallback() {
        let engine = engine(vec![items(&[1]), items(&[2, 3])], SearchConfig::default());
        let outcome = engine.search(&men()).await.unwrap();

        let labels: Vec<_> = outcome.audit_trail.labels().collect();
        assert_eq!(labels, vec!["attempt 1", "fallback"]);
        assert!(outcome.fallback_used);
        assert_eq!(outcome.total_found, 3);
    }

    #[tokio::test]
    async fn test_zero_limits_are_rejected() {
        let engine = engine(Vec::new(), SearchConfig::default());
        let result = engine.search_with(&men(), 0, 6).await;
        assert!(matches!(result, Err(SearchError::InvalidConfig(_))));

        let engine = engine_with_config(SearchConfig {
            page_size: 0,
            ..SearchConfig::default()
        });
        assert!(matches!(
            engine.search(&men()).await,
            Err(SearchError::InvalidConfig(_))
        ));
    }

    fn engine_with_config(config: SearchConfig) -> RelaxationEngine {
        engine(Vec::new(), config)
    }
}
