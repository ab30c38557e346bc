//! Export command handler
//!
//! Collects the repository list, runs the export and prints the report.
//! Unsuccessful migrations and failed downloads are reported but only fail
//! the command with `--fail-on-anomaly`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::*;
use migrator_core::{BatchMode, MigrationOptions};
use migrator_engine::{Anomaly, ExportConfig, ExportReport, run_export};
use tracing::debug;

use crate::config::Config;
use crate::repos::collect_repositories;

#[derive(Args)]
pub struct ExportArgs {
    /// Organization that owns the repositories
    #[arg(short, long)]
    pub org: String,

    /// Repositories to export
    pub repositories: Vec<String>,

    /// File with one repository per line
    #[arg(long, value_name = "FILE")]
    pub repos_file: Option<PathBuf>,

    /// Lock the repositories while they are exported
    #[arg(long)]
    pub lock_repositories: bool,

    /// Leave out issue and pull request attachments
    #[arg(long)]
    pub exclude_attachments: bool,

    /// Leave out git data
    #[arg(long)]
    pub exclude_git_data: bool,

    /// Leave out metadata, keeping only git source
    #[arg(long)]
    pub exclude_metadata: bool,

    /// Leave out projects owned by the organization or its users
    #[arg(long)]
    pub exclude_owner_projects: bool,

    /// Leave out release assets
    #[arg(long)]
    pub exclude_releases: bool,

    /// Archive base name [default: migration-archive-<id>]
    #[arg(long, value_name = "NAME")]
    pub archive_name: Option<String>,

    /// Start one migration, and write one archive, per repository
    #[arg(long)]
    pub archive_per_repo: bool,

    /// Directory archives are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Seconds between polling rounds
    #[arg(long, value_name = "SECONDS", env = "MIGRATOR_POLL_INTERVAL", default_value_t = 15)]
    pub poll_interval: u64,

    /// Give up after this many polling rounds
    #[arg(long, value_name = "ROUNDS", env = "MIGRATOR_MAX_POLL_ROUNDS")]
    pub max_poll_rounds: Option<u32>,

    /// Give up after polling for this many seconds
    #[arg(long, value_name = "SECONDS", env = "MIGRATOR_POLL_TIMEOUT")]
    pub poll_timeout: Option<u64>,

    /// Retries for a status query that failed transiently
    #[arg(long, value_name = "COUNT", env = "MIGRATOR_STATUS_RETRIES", default_value_t = 0)]
    pub status_retries: u32,

    /// Exit non-zero if any migration failed or its archive could not be saved
    #[arg(long)]
    pub fail_on_anomaly: bool,
}

impl ExportArgs {
    pub fn options(&self) -> MigrationOptions {
        MigrationOptions {
            lock_repositories: self.lock_repositories,
            exclude_attachments: self.exclude_attachments,
            exclude_git_data: self.exclude_git_data,
            exclude_metadata: self.exclude_metadata,
            exclude_owner_projects: self.exclude_owner_projects,
            exclude_releases: self.exclude_releases,
        }
    }

    pub fn export_config(&self) -> ExportConfig {
        let mut config = ExportConfig::new(
            BatchMode::from_per_repository(self.archive_per_repo),
            self.options(),
        )
        .with_output_dir(&self.output_dir)
        .with_poll_interval(Duration::from_secs(self.poll_interval));

        config.archive_name = self.archive_name.clone();
        config.max_poll_rounds = self.max_poll_rounds;
        config.poll_timeout = self.poll_timeout.map(Duration::from_secs);
        config.status_retries = self.status_retries;
        config
    }
}

pub async fn handle_export_command(args: ExportArgs, config: &Config) -> Result<()> {
    let repositories = collect_repositories(&args.repositories, args.repos_file.as_deref()).await?;

    let export_config = args.export_config();
    export_config.validate()?;

    let client = config.client(&args.org)?;
    debug!("Using API at {} for {}", client.base_url(), client.org());

    println!(
        "{}",
        format!(
            "Exporting {} repositories from {}...",
            repositories.len(),
            args.org
        )
        .bold()
    );

    let report = run_export(&client, &repositories, &export_config)
        .await
        .context("Export aborted")?;

    print_report(&report);

    if args.fail_on_anomaly && !report.is_clean() {
        bail!(
            "{} migration(s) did not produce an archive",
            report.anomalies.len()
        );
    }

    Ok(())
}

fn print_report(report: &ExportReport) {
    println!();
    println!(
        "{}",
        format!(
            "{} migration(s) finished after {} polling round(s):",
            report.migrations, report.rounds
        )
        .bold()
    );

    for archive in &report.archives {
        println!(
            "  {} {} {}",
            "✓".green(),
            archive.path.display(),
            format!("({} bytes, migration {})", archive.bytes, archive.id).dimmed()
        );
    }

    for anomaly in &report.anomalies {
        let marker = match anomaly {
            Anomaly::Unsuccessful { .. } => "✗".red(),
            Anomaly::DownloadFailed { .. } => "!".yellow(),
        };
        println!("  {} {}", marker, anomaly);
    }
}
