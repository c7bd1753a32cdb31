//! Vitrine configuration
//!
//! Layered settings for the catalog client, the chat model, the relaxation
//! engine and the value cache: defaults, then `config.toml`, then
//! `VITRINE_*` environment variables.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::{ConfigManager, ENV_PREFIX, OPENAI_API_KEY_VAR};
pub use types::{
    AppConfig, CatalogSettings, ConfigManager as ConfigManagerTrait, LlmSettings, ValuesSettings,
};
