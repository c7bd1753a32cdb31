//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{AppConfig, ConfigManager as ConfigManagerTrait},
};

pub const ENV_PREFIX: &str = "VITRINE";
/// Conventional variable for the chat model key
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Loads `config.toml`, then environment overrides such as
/// `VITRINE_CATALOG__BASE_URL`.
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Whether a missing file is an error
    explicit: bool,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            explicit: false,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create with custom config path; the file must exist
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            explicit: true,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get default config path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vitrine")
            .join("config.toml")
    }
}

impl ConfigManagerTrait for ConfigManager {
    fn load_config(&mut self) -> Result<AppConfig> {
        if self.explicit && !self.config_path.exists() {
            return Err(ConfigError::NotFound(
                self.config_path.display().to_string(),
            ));
        }
        debug!("Loading configuration from {}", self.config_path.display());

        let builder = Config::builder()
            .add_source(File::from(self.config_path.clone()).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        if app_config.llm.api_key.is_none() {
            app_config.llm.api_key = std::env::var(OPENAI_API_KEY_VAR)
                .ok()
                .filter(|key| !key.is_empty());
        }
        Ok(app_config)
    }

    fn save_config(&self, config: &AppConfig) -> Result<()> {
        let toml = toml::to_string(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }

    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        url::Url::parse(&config.catalog.base_url).map_err(|e| {
            ConfigError::Validation(format!("catalog.base_url is not a valid URL: {e}"))
        })?;
        url::Url::parse(&config.llm.base_url).map_err(|e| {
            ConfigError::Validation(format!("llm.base_url is not a valid URL: {e}"))
        })?;

        if config.catalog.username.is_some() != config.catalog.password.is_some() {
            return Err(ConfigError::Validation(
                "catalog.username and catalog.password must be set together".to_string(),
            ));
        }
        if config.catalog.timeout_secs == 0 || config.llm.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Timeouts must be greater than 0".to_string(),
            ));
        }
        for (name, value) in [
            ("interpret_temperature", config.llm.interpret_temperature),
            ("explain_temperature", config.llm.explain_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "llm.{name} must be between 0 and 2"
                )));
            }
        }
        if config.values.ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "values.ttl_secs must be greater than 0".to_string(),
            ));
        }

        config
            .search
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
