// Print the effective configuration

use std::path::PathBuf;

use vitrine_config::AppConfig;

use super::Command;
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;

pub struct ConfigCommand {
    config: AppConfig,
    path: PathBuf,
}

impl ConfigCommand {
    pub fn new(config: AppConfig, path: PathBuf) -> Self {
        Self { config, path }
    }

    /// Effective settings as TOML, secrets masked
    pub fn render(&self) -> CliResult<String> {
        toml::to_string_pretty(&self.config.redacted())
            .map_err(|e| CliError::Internal(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        let source = if self.path.exists() {
            format!("Loaded from {}", self.path.display())
        } else {
            format!("No file at {}; using defaults and environment", self.path.display())
        };
        println!("{}", style.info(&source));
        println!();
        println!("{}", self.render()?);
        Ok(())
    }
}
