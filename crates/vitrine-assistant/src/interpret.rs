//! Free-text description to candidate filters

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use vitrine_search::{CandidateFilters, DomainValues};

use crate::error::Result;
use crate::models::ChatRequest;
use crate::prompts::interpretation_prompt;
use crate::provider::ChatModel;

/// Turns a shopper's description into an untrusted attribute mapping.
///
/// The result is validated by the search engine, so implementations may
/// return anything.
#[async_trait]
pub trait FilterInterpreter: Send + Sync {
    async fn interpret(&self, description: &str, values: &DomainValues)
        -> Result<CandidateFilters>;
}

pub struct LlmFilterInterpreter {
    model: Arc<dyn ChatModel>,
    model_name: String,
    temperature: f32,
}

impl LlmFilterInterpreter {
    pub fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>, temperature: f32) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            temperature,
        }
    }
}

#[async_trait]
impl FilterInterpreter for LlmFilterInterpreter {
    async fn interpret(
        &self,
        description: &str,
        values: &DomainValues,
    ) -> Result<CandidateFilters> {
        let request = ChatRequest::system(&self.model_name, interpretation_prompt(description, values))
            .with_temperature(self.temperature);
        let completion = self.model.complete(request).await?;
        let candidates = parse_candidates(&completion);
        debug!("Interpreted {:?} as {:?}", description, candidates);
        Ok(candidates)
    }
}

/// Lenient parse of a completion into a flat string map.
///
/// Markdown fences and surrounding prose are ignored; only the first `{...}`
/// object counts. Anything unparseable yields an empty map.
pub fn parse_candidates(completion: &str) -> CandidateFilters {
    let Some(object) = json_object(completion) else {
        if !completion.trim().is_empty() {
            warn!("Model reply contained no JSON object");
        }
        return CandidateFilters::new();
    };

    let map = match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(object) {
        Ok(map) => map,
        Err(e) => {
            warn!("Could not parse model reply as filters: {}", e);
            return CandidateFilters::new();
        }
    };

    map.into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s.trim().to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                _ => return None,
            };
            (!value.is_empty()).then(|| (key.trim().to_lowercase(), value))
        })
        .collect()
}

/// First `{...}` object in a completion, ignoring fences and prose
pub(crate) fn json_object(completion: &str) -> Option<&str> {
    first_object(strip_code_fence(completion.trim()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (`json`) on the opening fence line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn first_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
