//! Fixture data commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use usergate_auth::PasswordHasher;
use usergate_core::error::AppError;
use usergate_service::Seeder;
use usergate_service::seed::FIXTURE_PASSWORD;

use crate::output;

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Seed subcommand
    #[command(subcommand)]
    pub command: SeedCommand,
}

/// Seed subcommands
#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Wipe all accounts and insert the fixture accounts
    Import,
    /// Wipe all accounts
    Destroy {
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Execute seed commands
pub async fn execute(args: &SeedArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let store = super::open_configured_store(&config).await?;
    let seeder = Seeder::new(store, Arc::new(PasswordHasher::new()));

    match &args.command {
        SeedCommand::Import => {
            let accounts = seeder.import().await?;
            for account in &accounts {
                output::print_kv(&account.email, account.role.as_str());
            }
            output::print_success(&format!(
                "Imported {} accounts (password: {FIXTURE_PASSWORD})",
                accounts.len()
            ));
        }
        SeedCommand::Destroy { yes } => {
            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("This will DELETE every account. Continue?")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let removed = seeder.destroy().await?;
            output::print_success(&format!("Destroyed {removed} accounts."));
        }
    }

    Ok(())
}
