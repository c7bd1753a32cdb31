//! Core configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vitrine_search::{SearchConfig, DEFAULT_RETRY_INTERVAL, DEFAULT_VALUES_TTL};

const REDACTED: &str = "********";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Remote product catalog
    pub catalog: CatalogSettings,
    /// Chat model used for interpretation and explanation
    pub llm: LlmSettings,
    /// Relaxation engine limits
    pub search: SearchConfig,
    /// Domain value cache
    pub values: ValuesSettings,
}

impl AppConfig {
    /// Copy with secrets masked, for display
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.catalog.password.is_some() {
            config.catalog.password = Some(REDACTED.to_string());
        }
        if config.llm.api_key.is_some() {
            config.llm.api_key = Some(REDACTED.to_string());
        }
        config
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogSettings {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retries for transient failures
    pub retry_count: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            username: None,
            password: None,
            timeout_secs: 10,
            retry_count: 2,
        }
    }
}

impl CatalogSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmSettings {
    /// Falls back to `OPENAI_API_KEY` when unset
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub interpret_temperature: f32,
    pub explain_temperature: f32,
    pub explain_max_tokens: usize,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            interpret_temperature: 0.5,
            explain_temperature: 0.6,
            explain_max_tokens: 60,
            timeout_secs: 60,
        }
    }
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValuesSettings {
    /// Seconds before the legal-value snapshot is refreshed
    pub ttl_secs: u64,
    /// Seconds to wait after a failed refresh before trying again
    pub retry_secs: u64,
}

impl Default for ValuesSettings {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_VALUES_TTL.as_secs(),
            retry_secs: DEFAULT_RETRY_INTERVAL.as_secs(),
        }
    }
}

impl ValuesSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_secs)
    }
}

/// Configuration manager trait
pub trait ConfigManager {
    /// Load configuration
    fn load_config(&mut self) -> Result<AppConfig, crate::error::ConfigError>;
    /// Save configuration
    fn save_config(&self, config: &AppConfig) -> Result<(), crate::error::ConfigError>;
    /// Validate configuration
    fn validate_config(&self, config: &AppConfig) -> Result<(), crate::error::ConfigError>;
}
