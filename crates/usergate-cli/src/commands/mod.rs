//! CLI command definitions and dispatch.

pub mod account;
pub mod migrate;
pub mod seed;
pub mod serve;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use usergate_core::config::AppConfig;
use usergate_core::error::AppError;
use usergate_database::{CredentialStore, open_store};

use crate::output::OutputFormat;

/// Usergate: session authentication and account administration
#[derive(Debug, Parser)]
#[command(name = "usergate", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (`config/<env>.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Fixture data
    Seed(seed::SeedArgs),
    /// Account inspection
    Account(account::AccountArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.env).await,
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::Seed(args) => seed::execute(args, &self.env).await,
            Commands::Account(args) => account::execute(args, &self.env, self.format).await,
        }
    }
}

/// Helper: load layered configuration for `env`
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Helper: open the configured credential store
pub async fn open_configured_store(config: &AppConfig) -> Result<Arc<dyn CredentialStore>, AppError> {
    open_store(&config.database).await
}
