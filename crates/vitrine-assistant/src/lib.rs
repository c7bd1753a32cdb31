//! # Vitrine Assistant
//!
//! Wraps the relaxation search with a language model on both ends: the
//! shopper's description is interpreted into candidate filters, and the
//! results come back with a one-sentence explanation. The same model also
//! writes product descriptions and classifies chat messages by intent.

pub mod describe;
pub mod error;
pub mod explain;
pub mod intent;
pub mod interpret;
pub mod models;
pub mod prompts;
pub mod provider;
pub mod recommend;

pub use describe::{Describer, DescriptionSettings, LlmDescriber};
pub use error::{AssistantError, Result};
pub use explain::{fallback_explanation, Explainer, LlmExplainer, TemplateExplainer};
pub use intent::{parse_intent, Intent, IntentClassifier, IntentResult, LlmIntentClassifier};
pub use interpret::{parse_candidates, FilterInterpreter, LlmFilterInterpreter};
pub use models::{ChatRequest, Message};
pub use provider::{ChatModel, OpenAiChatModel, DEFAULT_OPENAI_BASE_URL};
pub use recommend::{RecommendOptions, Recommendation, Recommender};
