//! End-to-end export run
//!
//! Batch → launch → poll → download. Launch and poll failures abort with an
//! [`ExportError`]; unsuccessful migrations and failed downloads end up as
//! anomalies in the returned [`ExportReport`].

use migrator_client::MigrationApi;
use migrator_core::Tracker;
use migrator_core::batch::make_batches;
use tracing::info;

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::report::ExportReport;
use crate::scheduler::{MigrationPoller, PollSettings};
use crate::service::{ArchiveDownloader, Launcher};

/// Exports `repositories` and downloads the resulting archives
pub async fn run_export(
    api: &dyn MigrationApi,
    repositories: &[String],
    config: &ExportConfig,
) -> Result<ExportReport> {
    config.validate()?;

    if repositories.is_empty() {
        return Err(ExportError::InvalidConfig(
            "at least one repository is required".into(),
        ));
    }

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|source| ExportError::OutputDir {
            path: config.output_dir.clone(),
            source,
        })?;

    let batches = make_batches(repositories, config.mode);
    info!(
        "Exporting {} repositories in {} migration(s)",
        repositories.len(),
        batches.len()
    );

    let mut tracker = Tracker::new();

    let launched = Launcher::new(api, config.options)
        .launch_all(batches, &mut tracker)
        .await?;

    let poll = MigrationPoller::new(api, PollSettings::from(config))
        .run(&mut tracker)
        .await?;

    let downloader = ArchiveDownloader::new(
        api,
        &config.output_dir,
        config.archive_name.as_deref(),
        config.mode,
    );
    let (archives, anomalies) = downloader.download_all(&tracker).await;

    info!(
        "Export finished: {} archive(s) written, {} anomaly(ies)",
        archives.len(),
        anomalies.len()
    );

    Ok(ExportReport {
        migrations: launched.len(),
        rounds: poll.rounds,
        archives,
        anomalies,
    })
}
