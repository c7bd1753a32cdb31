//! Chat message intent classification

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use crate::interpret::json_object;
use crate::models::ChatRequest;
use crate::prompts::intent_prompt;
use crate::provider::ChatModel;

/// What a shopper's chat message is asking for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// A customer number was given
    IdentifyUser,
    ProductDetails,
    SimilarProducts,
    SearchByDescription,
    Greeting,
    #[default]
    Unknown,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::IdentifyUser,
        Intent::ProductDetails,
        Intent::SimilarProducts,
        Intent::SearchByDescription,
        Intent::Greeting,
        Intent::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::IdentifyUser => "identify_user",
            Intent::ProductDetails => "product_details",
            Intent::SimilarProducts => "similar_products",
            Intent::SearchByDescription => "search_by_description",
            Intent::Greeting => "greeting",
            Intent::Unknown => "unknown",
        }
    }

    /// Wire name to intent; anything unrecognised is `Unknown`
    pub fn from_wire(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(Intent::Unknown)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified intent plus the scalar entities the model extracted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,
    #[serde(default)]
    pub entities: BTreeMap<String, Value>,
}

impl IntentResult {
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Entity rendered as text, e.g. a `customer_id` given as a number
    pub fn entity(&self, key: &str) -> Option<String> {
        match self.entities.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, message: &str) -> Result<IntentResult>;
}

pub struct LlmIntentClassifier {
    model: Arc<dyn ChatModel>,
    model_name: String,
}

impl LlmIntentClassifier {
    pub fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn classify(&self, message: &str) -> Result<IntentResult> {
        let request =
            ChatRequest::user(&self.model_name, intent_prompt(message)).with_temperature(0.0);
        let completion = self.model.complete(request).await?;
        let result = parse_intent(&completion);
        debug!("Classified {:?} as {}", message, result.intent);
        Ok(result)
    }
}

/// Lenient parse of a classifier reply; unparseable replies are `Unknown`.
///
/// Only string, number and boolean entities are kept.
pub fn parse_intent(completion: &str) -> IntentResult {
    let parsed = json_object(completion)
        .and_then(|object| serde_json::from_str::<serde_json::Map<String, Value>>(object).ok());
    let Some(mut map) = parsed else {
        warn!("Could not parse intent reply: {:?}", completion);
        return IntentResult::unknown();
    };

    let intent = map
        .get("intent")
        .and_then(Value::as_str)
        .map_or(Intent::Unknown, Intent::from_wire);
    let entities = match map.remove("entities") {
        Some(Value::Object(entities)) => entities
            .into_iter()
            .filter(|(_, v)| matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_)))
            .collect(),
        _ => BTreeMap::new(),
    };

    IntentResult { intent, entities }
}
