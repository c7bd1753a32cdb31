//! One-sentence explanation of a result set

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use vitrine_search::CatalogItem;

use crate::models::ChatRequest;
use crate::prompts::explanation_prompt;
use crate::provider::ChatModel;

/// Produces a short human explanation. Never fails; implementations fall
/// back to [`fallback_explanation`].
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, description: &str, results: &[CatalogItem], count: usize) -> String;
}

pub fn fallback_explanation(count: usize, description: &str) -> String {
    format!("I found {count} products related to \"{description}\".")
}

pub struct LlmExplainer {
    model: Arc<dyn ChatModel>,
    model_name: String,
    temperature: f32,
    max_tokens: usize,
}

impl LlmExplainer {
    pub fn new(
        model: Arc<dyn ChatModel>,
        model_name: impl Into<String>,
        temperature: f32,
        max_tokens: usize,
    ) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            temperature,
            max_tokens,
        }
    }
}

#[async_trait]
impl Explainer for LlmExplainer {
    async fn explain(&self, description: &str, _results: &[CatalogItem], count: usize) -> String {
        let request = ChatRequest::system(&self.model_name, explanation_prompt(description))
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        match self.model.complete(request).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => fallback_explanation(count, description),
            Err(e) => {
                warn!("Explanation failed, using fallback: {}", e);
                fallback_explanation(count, description)
            }
        }
    }
}

/// Explainer that always uses the fallback sentence
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateExplainer;

#[async_trait]
impl Explainer for TemplateExplainer {
    async fn explain(&self, description: &str, _results: &[CatalogItem], count: usize) -> String {
        fallback_explanation(count, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_sentence() {
        assert_eq!(
            fallback_explanation(3, "green gloves"),
            "I found 3 products related to \"green gloves\"."
        );
    }

    #[tokio::test]
    async fn test_template_explainer() {
        let text = TemplateExplainer.explain("caps", &[], 0).await;
        assert_eq!(text, "I found 0 products related to \"caps\".");
    }
}
