//! Migrator CLI
//!
//! Exports an organization's repositories through the provider's migrations
//! API and downloads the resulting archives.

mod commands;
mod config;
mod repos;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "migrator=info,migrator_engine=info,migrator_client=info";
const DEBUG_LOG_FILTER: &str =
    "migrator=debug,migrator_engine=debug,migrator_client=debug,reqwest=debug";

#[derive(Parser)]
#[command(name = "migrator", version)]
#[command(about = "Export organization repositories as migration archives", long_about = None)]
struct Cli {
    /// Host of the GitHub instance (github.com or an Enterprise Server host)
    #[arg(long, global = true, env = "GH_HOST", default_value = migrator_client::GITHUB_HOST)]
    hostname: String,

    /// API token; falls back to GITHUB_TOKEN
    #[arg(long, global = true, env = "GH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Enable debug tracing of requests and state changes
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    let config = Config::resolve(
        &cli.hostname,
        cli.token,
        std::env::var("GITHUB_TOKEN").ok(),
    )?;

    handle_command(cli.command, &config).await
}

/// Initializes logging to stderr; `RUST_LOG` takes precedence over `--debug`
fn init_tracing(debug: bool) {
    let default_filter = if debug {
        DEBUG_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
