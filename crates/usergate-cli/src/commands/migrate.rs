//! Database migration management commands.

use clap::{Args, Subcommand};

use usergate_core::config::DatabaseBackend;
use usergate_core::error::AppError;
use usergate_database::DatabasePool;
use usergate_database::migration::run_migrations;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;

    if config.database.backend != DatabaseBackend::Postgres {
        return Err(AppError::configuration(
            "Migrations require database.backend = \"postgres\"",
        ));
    }

    match &args.command {
        MigrateCommand::Run => {
            let pool = DatabasePool::connect(&config.database).await?;
            println!("Running database migrations...");
            run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
