// Command handlers for the vitrine CLI

pub mod classify;
pub mod config;
pub mod customer;
pub mod describe;
pub mod product;
pub mod search;
pub mod similar;
pub mod values;

pub use classify::ClassifyCommand;
pub use config::ConfigCommand;
pub use customer::CustomerCommand;
pub use describe::DescribeCommand;
pub use product::ProductCommand;
pub use search::SearchCommand;
pub use similar::SimilarCommand;
pub use values::ValuesCommand;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}

/// Pretty JSON on stdout
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| crate::error::CliError::Internal(e.to_string()))?;
    println!("{text}");
    Ok(())
}
