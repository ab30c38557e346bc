//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod export;
mod status;

pub use export::ExportArgs;
pub use status::StatusArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start migrations, wait for them and download their archives
    Export(ExportArgs),
    /// Show the current state of one migration
    Status(StatusArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Export(args) => export::handle_export_command(args, config).await,
        Commands::Status(args) => status::handle_status_command(args, config).await,
    }
}
