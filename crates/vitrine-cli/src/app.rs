// Wiring from configuration to live components

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use vitrine_assistant::{
    AssistantError, ChatModel, ChatRequest, LlmDescriber, LlmExplainer, LlmFilterInterpreter,
    LlmIntentClassifier, OpenAiChatModel, Recommender,
};
use vitrine_config::AppConfig;
use vitrine_http::{Credentials, HttpCatalogClient, HttpConfig};
use vitrine_search::{DomainValueCache, RelaxationEngine, ValuesService};

use crate::error::{CliError, CliResult};

/// Stand-in when no API key is configured; every completion fails, so
/// interpretation degrades and explanations use the fallback sentence.
struct UnconfiguredModel;

#[async_trait]
impl ChatModel for UnconfiguredModel {
    async fn complete(&self, _request: ChatRequest) -> Result<String, AssistantError> {
        Err(AssistantError::ConfigError(
            "no language model API key configured".to_string(),
        ))
    }
}

/// Everything a command needs, built once per invocation
pub struct AppContext {
    pub config: AppConfig,
    pub catalog: Arc<HttpCatalogClient>,
    model: Option<Arc<dyn ChatModel>>,
}

impl AppContext {
    pub fn from_config(config: AppConfig) -> CliResult<Self> {
        let catalog = Arc::new(HttpCatalogClient::new(
            &config.catalog.base_url,
            credentials(&config),
            HttpConfig::catalog()
                .with_timeout(config.catalog.timeout())
                .with_retry_count(config.catalog.retry_count),
        )?);

        let model = match config.llm.api_key.as_deref() {
            Some(key) => {
                let model = OpenAiChatModel::with_config(
                    key,
                    &config.llm.base_url,
                    HttpConfig::llm().with_timeout(config.llm.timeout()),
                )?;
                Some(Arc::new(model) as Arc<dyn ChatModel>)
            }
            None => {
                debug!("No language model configured");
                None
            }
        };

        Ok(Self {
            config,
            catalog,
            model,
        })
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn engine(&self) -> RelaxationEngine {
        let values = DomainValueCache::with_ttl(
            self.catalog.clone() as Arc<dyn ValuesService>,
            self.config.values.ttl(),
        )
        .with_retry_interval(self.config.values.retry_interval());
        RelaxationEngine::new(
            self.catalog.clone(),
            Arc::new(values),
            self.config.search.clone(),
        )
    }

    /// The configured model, or a configuration error naming `purpose`
    fn require_model(&self, purpose: &str) -> CliResult<Arc<dyn ChatModel>> {
        self.model.clone().ok_or_else(|| {
            CliError::Config(format!(
                "{purpose} needs a language model; set llm.api_key (or OPENAI_API_KEY)"
            ))
        })
    }

    pub fn describer(&self) -> CliResult<LlmDescriber> {
        let model = self.require_model("describe")?;
        Ok(LlmDescriber::new(model, self.config.llm.model.clone()))
    }

    pub fn intent_classifier(&self) -> CliResult<LlmIntentClassifier> {
        let model = self.require_model("classify")?;
        Ok(LlmIntentClassifier::new(model, self.config.llm.model.clone()))
    }

    pub fn recommender(&self) -> Recommender {
        let model = self
            .model
            .clone()
            .unwrap_or_else(|| Arc::new(UnconfiguredModel) as Arc<dyn ChatModel>);
        let llm = &self.config.llm;

        Recommender::new(
            Arc::new(self.engine()),
            Arc::new(LlmFilterInterpreter::new(
                model.clone(),
                llm.model.clone(),
                llm.interpret_temperature,
            )),
            Arc::new(LlmExplainer::new(
                model,
                llm.model.clone(),
                llm.explain_temperature,
                llm.explain_max_tokens,
            )),
        )
    }
}

fn credentials(config: &AppConfig) -> Option<Credentials> {
    match (&config.catalog.username, &config.catalog.password) {
        (Some(username), Some(password)) => Some(Credentials {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => None,
    }
}
