// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vitrine_config::{AppConfig, ConfigManager, ConfigManagerTrait};
use vitrine_search::Attribute;

use crate::app::AppContext;
use crate::commands::*;
use crate::error::CliResult;

/// Vitrine - describe what you want, get matching products
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(bin_name = "vitrine")]
#[command(about = "Shopping assistant: describe what you want, get matching products")]
#[command(
    long_about = "Vitrine turns a free-text product description into catalog filters and keeps\nrelaxing them until enough products turn up.\n\nExamples:\n  vitrine search \"green gloves for hiking\"\n  vitrine search \"gloves\" --filter basecolour=Olive --json\n  vitrine values subcategory\n  vitrine similar 15970\n  vitrine customer 12345\n  vitrine describe \"Trail Gloves\" --category Accessories"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: <config dir>/vitrine/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Find products matching a description
    Search {
        /// What the shopper is looking for
        #[arg(value_name = "DESCRIPTION")]
        description: String,

        /// Use these filters instead of asking the language model
        #[arg(short, long = "filter", value_name = "ATTR=VALUE", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        /// Stop once this many products are found
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
        target: Option<u16>,

        /// Upper bound on relaxation attempts
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
        max_attempts: Option<u16>,

        /// Print the recommendation as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the legal values of an attribute
    Values {
        #[arg(value_name = "ATTRIBUTE", value_parser = parse_attribute)]
        attribute: Attribute,
    },

    /// Show a single product
    Product {
        #[arg(value_name = "ID")]
        id: i64,

        #[arg(long)]
        json: bool,
    },

    /// Show products similar to a given one
    Similar {
        #[arg(value_name = "ID")]
        id: i64,

        #[arg(long)]
        json: bool,
    },

    /// Show a customer and the products on their account
    Customer {
        #[arg(value_name = "ID")]
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Write a short marketing description for a product
    Describe {
        /// Product name
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(long, value_name = "CATEGORY")]
        category: Option<String>,
    },

    /// Classify a chat message by intent
    Classify {
        #[arg(value_name = "MESSAGE")]
        message: String,

        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration (secrets masked)
    Config,
}

fn parse_attribute(raw: &str) -> Result<Attribute, String> {
    raw.trim().to_lowercase().parse().map_err(|_| {
        let known: Vec<&str> = Attribute::ALL.iter().map(|a| a.as_str()).collect();
        format!("unknown attribute '{raw}' (expected one of: {})", known.join(", "))
    })
}

/// Parse `attr=value`; the attribute must be known, the value is checked later
pub fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ATTR=VALUE, got '{raw}'"))?;
    let attribute = parse_attribute(key)?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("empty value for '{attribute}'"));
    }
    Ok((attribute.as_str().to_string(), value.to_string()))
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();

        // Initialize logging based on CLI flags
        crate::logging::init_logging(cli.verbose, cli.quiet);

        Self::execute(&cli).await
    }

    /// Load configuration honouring `--config`
    pub fn load_config(cli: &Cli) -> CliResult<(AppConfig, PathBuf)> {
        let mut manager = match &cli.config {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new(),
        };
        let config = manager.load_config()?;
        manager.validate_config(&config)?;
        Ok((config, manager.config_path().to_path_buf()))
    }

    /// Execute a command
    pub async fn execute(cli: &Cli) -> CliResult<()> {
        let (config, path) = Self::load_config(cli)?;

        if let Commands::Config = cli.command {
            return ConfigCommand::new(config, path).execute().await;
        }

        let context = AppContext::from_config(config)?;
        match &cli.command {
            Commands::Search {
                description,
                filters,
                target,
                max_attempts,
                json,
            } => {
                let cmd = SearchCommand::new(&context, description.clone())
                    .with_filters(filters.clone())
                    .with_target(target.map(usize::from))
                    .with_max_attempts(max_attempts.map(usize::from))
                    .with_json(*json);
                cmd.execute().await
            }
            Commands::Values { attribute } => {
                ValuesCommand::new(&context, *attribute).execute().await
            }
            Commands::Product { id, json } => {
                ProductCommand::new(&context, *id, *json).execute().await
            }
            Commands::Similar { id, json } => {
                SimilarCommand::new(&context, *id, *json).execute().await
            }
            Commands::Customer { id, json } => {
                CustomerCommand::new(&context, id.clone(), *json)
                    .execute()
                    .await
            }
            Commands::Describe { name, category } => {
                DescribeCommand::new(&context, name.clone(), category.clone())
                    .execute()
                    .await
            }
            Commands::Classify { message, json } => {
                ClassifyCommand::new(&context, message.clone(), *json)
                    .execute()
                    .await
            }
            Commands::Config => Ok(()),
        }
    }
}
