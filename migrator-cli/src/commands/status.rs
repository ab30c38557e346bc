//! Status command handler

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use migrator_client::MigrationApi;
use migrator_core::{MigrationId, MigrationState, StateClass};

use crate::config::Config;

#[derive(Args)]
pub struct StatusArgs {
    /// Organization that owns the migration
    #[arg(short, long)]
    pub org: String,

    /// Migration id
    pub id: MigrationId,
}

pub async fn handle_status_command(args: StatusArgs, config: &Config) -> Result<()> {
    let client = config.client(&args.org)?;

    let migration = client
        .get_migration(args.id)
        .await
        .with_context(|| format!("Failed to fetch migration {}", args.id))?;

    println!("{}", "Migration Details:".bold());
    println!("  ID:      {}", migration.id.to_string().cyan());
    println!("  State:   {}", colorize_state(&migration.state));
    if let Some(guid) = &migration.guid {
        println!("  GUID:    {}", guid.dimmed());
    }
    if let Some(created) = migration.created_at {
        println!("  Created: {}", created.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(updated) = migration.updated_at {
        println!("  Updated: {}", updated.format("%Y-%m-%d %H:%M:%S"));
    }

    Ok(())
}

/// Colorize migration state for display
pub fn colorize_state(state: &MigrationState) -> ColoredString {
    match state.class() {
        StateClass::Waiting => state.as_str().yellow(),
        StateClass::Succeeded => state.as_str().green(),
        StateClass::Unsuccessful => state.as_str().red(),
    }
}
