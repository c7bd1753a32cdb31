//! Marketing copy for a single product

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AssistantError, Result};
use crate::models::ChatRequest;
use crate::prompts::description_prompt;
use crate::provider::ChatModel;

/// Sampling settings for description generation. Defaults favour variety.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: usize,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl Default for DescriptionSettings {
    fn default() -> Self {
        Self {
            temperature: 1.1,
            top_p: 1.0,
            max_tokens: 100,
            presence_penalty: 0.6,
            frequency_penalty: 0.5,
        }
    }
}

#[async_trait]
pub trait Describer: Send + Sync {
    async fn describe(&self, name: &str, category: Option<&str>) -> Result<String>;
}

pub struct LlmDescriber {
    model: Arc<dyn ChatModel>,
    model_name: String,
    settings: DescriptionSettings,
}

impl LlmDescriber {
    pub fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            settings: DescriptionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: DescriptionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &DescriptionSettings {
        &self.settings
    }
}

#[async_trait]
impl Describer for LlmDescriber {
    async fn describe(&self, name: &str, category: Option<&str>) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AssistantError::MissingProductName);
        }

        let seed = rand::thread_rng().gen_range(0..10_000);
        let settings = &self.settings;
        let request =
            ChatRequest::system(&self.model_name, description_prompt(name, category, seed))
                .with_temperature(settings.temperature)
                .with_top_p(settings.top_p)
                .with_max_tokens(settings.max_tokens)
                .with_penalties(settings.presence_penalty, settings.frequency_penalty);

        let text = self.model.complete(request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AssistantError::ModelError(
                "Empty product description".to_string(),
            ));
        }
        debug!("Described {:?} in {} chars", name, text.len());
        Ok(text.to_string())
    }
}
