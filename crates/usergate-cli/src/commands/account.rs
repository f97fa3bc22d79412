//! Account inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use usergate_core::error::AppError;
use usergate_entity::Account;

use crate::output::{self, OutputFormat};

/// Arguments for account commands
#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account subcommand
    #[command(subcommand)]
    pub command: AccountCommand,
}

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// List all accounts, oldest first
    List,
}

/// Account display row for table output
#[derive(Debug, Serialize, Tabled)]
struct AccountRow {
    id: String,
    name: String,
    email: String,
    role: String,
    status: String,
    last_authenticated_at: String,
    created_at: String,
}

impl From<&Account> for AccountRow {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id.to_string(),
            name: a.name.clone(),
            email: a.email.clone(),
            role: a.role.as_str().to_string(),
            status: a.status.to_string(),
            last_authenticated_at: a
                .last_authenticated_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            created_at: a.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute account commands
pub async fn execute(
    args: &AccountArgs,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let store = super::open_configured_store(&config).await?;

    match &args.command {
        AccountCommand::List => {
            let accounts = store.list().await?;
            let rows: Vec<AccountRow> = accounts.iter().map(AccountRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
