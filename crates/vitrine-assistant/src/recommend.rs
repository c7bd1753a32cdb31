//! Description in, explained recommendation out

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use vitrine_search::{AuditTrail, CandidateFilters, CatalogItem, RelaxationEngine};

use crate::error::{AssistantError, Result};
use crate::explain::Explainer;
use crate::interpret::FilterInterpreter;

/// Response shape for one recommendation request
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Items found before the result cap
    pub count: usize,
    pub filters_used: AuditTrail,
    pub results: Vec<CatalogItem>,
    pub explanation: String,
    #[serde(skip)]
    pub fallback_used: bool,
}

/// Per-request overrides
#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    /// Skip interpretation and search with these filters
    pub filters: Option<CandidateFilters>,
    pub target_count: Option<usize>,
    pub max_attempts: Option<usize>,
}

pub struct Recommender {
    engine: Arc<RelaxationEngine>,
    interpreter: Arc<dyn FilterInterpreter>,
    explainer: Arc<dyn Explainer>,
}

impl Recommender {
    pub fn new(
        engine: Arc<RelaxationEngine>,
        interpreter: Arc<dyn FilterInterpreter>,
        explainer: Arc<dyn Explainer>,
    ) -> Self {
        Self {
            engine,
            interpreter,
            explainer,
        }
    }

    pub fn engine(&self) -> &RelaxationEngine {
        &self.engine
    }

    pub async fn recommend(&self, description: &str) -> Result<Recommendation> {
        self.recommend_with(description, &RecommendOptions::default())
            .await
    }

    pub async fn recommend_with(
        &self,
        description: &str,
        options: &RecommendOptions,
    ) -> Result<Recommendation> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AssistantError::EmptyDescription);
        }
        info!("New recommendation search for {:?}", description);

        let candidates = match &options.filters {
            Some(filters) => filters.clone(),
            None => self.interpret(description).await,
        };

        let config = self.engine.config();
        let outcome = self
            .engine
            .search_with(
                &candidates,
                options.target_count.unwrap_or(config.target_count),
                options.max_attempts.unwrap_or(config.max_attempts),
            )
            .await?;

        let explanation = self
            .explainer
            .explain(description, &outcome.items, outcome.total_found)
            .await;

        Ok(Recommendation {
            count: outcome.total_found,
            filters_used: outcome.audit_trail,
            results: outcome.items,
            explanation,
            fallback_used: outcome.fallback_used,
        })
    }

    async fn interpret(&self, description: &str) -> CandidateFilters {
        let values = self.engine.values().snapshot().await;
        match self.interpreter.interpret(description, &values).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Interpretation failed, searching with the default filter: {}", e);
                CandidateFilters::new()
            }
        }
    }
}
