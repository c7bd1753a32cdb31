// Recommendation search

use vitrine_assistant::{RecommendOptions, Recommendation};
use vitrine_search::CandidateFilters;

use super::{print_json, Command};
use crate::app::AppContext;
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;

pub struct SearchCommand<'a> {
    context: &'a AppContext,
    description: String,
    filters: Vec<(String, String)>,
    target: Option<usize>,
    max_attempts: Option<usize>,
    json: bool,
}

impl<'a> SearchCommand<'a> {
    pub fn new(context: &'a AppContext, description: String) -> Self {
        Self {
            context,
            description,
            filters: Vec::new(),
            target: None,
            max_attempts: None,
            json: false,
        }
    }

    pub fn with_filters(mut self, filters: Vec<(String, String)>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_target(mut self, target: Option<usize>) -> Self {
        self.target = target;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    fn options(&self) -> RecommendOptions {
        let filters = (!self.filters.is_empty())
            .then(|| self.filters.iter().cloned().collect::<CandidateFilters>());
        RecommendOptions {
            filters,
            target_count: self.target,
            max_attempts: self.max_attempts,
        }
    }

    /// Human-readable report
    pub fn render(style: &OutputStyle, recommendation: &Recommendation) -> String {
        let mut lines = Vec::new();

        if recommendation.results.is_empty() {
            lines.push(style.warning("No results found"));
        } else {
            lines.push(style.success(&format!(
                "Found {} products (showing {})",
                recommendation.count,
                recommendation.results.len()
            )));
            for (index, item) in recommendation.results.iter().enumerate() {
                lines.push(style.item(index + 1, item));
            }
        }

        lines.push(String::new());
        lines.push(style.header("Filters tried:"));
        lines.push(style.audit_trail(&recommendation.filters_used));
        if recommendation.fallback_used {
            lines.push(style.dim("  (not enough matches; unfiltered products added)"));
        }

        lines.push(String::new());
        lines.push(recommendation.explanation.clone());
        lines.join("\n")
    }
}

#[async_trait::async_trait]
impl Command for SearchCommand<'_> {
    async fn execute(&self) -> CliResult<()> {
        if self.filters.is_empty() && !self.context.has_model() {
            return Err(CliError::Config(
                "no language model API key configured; set llm.api_key (or OPENAI_API_KEY) or pass --filter"
                    .to_string(),
            ));
        }

        let recommender = self.context.recommender();
        let recommendation = recommender
            .recommend_with(&self.description, &self.options())
            .await?;

        if self.json {
            print_json(&recommendation)
        } else {
            println!(
                "{}",
                Self::render(&OutputStyle::default(), &recommendation)
            );
            Ok(())
        }
    }
}
