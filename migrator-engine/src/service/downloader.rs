//! Archive downloader
//!
//! Fetches the archive of every exported migration once polling is done.
//! Failures are per migration: a missing archive never stops the others.

use std::path::{Path, PathBuf};

use migrator_client::MigrationApi;
use migrator_core::archive::archive_file_name;
use migrator_core::{BatchMode, MigrationJob, StateClass, Tracker};
use tracing::{error, info, warn};

use crate::report::{Anomaly, Archive};

pub struct ArchiveDownloader<'a> {
    api: &'a dyn MigrationApi,
    output_dir: &'a Path,
    archive_name: Option<&'a str>,
    mode: BatchMode,
}

impl<'a> ArchiveDownloader<'a> {
    pub fn new(
        api: &'a dyn MigrationApi,
        output_dir: &'a Path,
        archive_name: Option<&'a str>,
        mode: BatchMode,
    ) -> Self {
        Self {
            api,
            output_dir,
            archive_name,
            mode,
        }
    }

    /// Path the archive of `job` is written to
    pub fn archive_path(&self, job: &MigrationJob) -> PathBuf {
        self.output_dir
            .join(archive_file_name(self.archive_name, self.mode, job.id))
    }

    /// Downloads every exported migration in the tracker
    ///
    /// Returns the archives written and the anomalies met, both ordered by
    /// migration id. Migrations still waiting are skipped; callers only
    /// invoke this after polling has finished.
    pub async fn download_all(&self, tracker: &Tracker) -> (Vec<Archive>, Vec<Anomaly>) {
        let mut jobs: Vec<&MigrationJob> = tracker.jobs().collect();
        jobs.sort_by_key(|job| job.id);

        let mut archives = Vec::new();
        let mut anomalies = Vec::new();

        for job in jobs {
            match job.state.class() {
                StateClass::Succeeded => match self.download(job).await {
                    Ok(archive) => archives.push(archive),
                    Err(anomaly) => anomalies.push(anomaly),
                },
                StateClass::Unsuccessful => {
                    warn!(
                        "Skipping download of migration {}: state '{}' (repositories {})",
                        job.id, job.state, job.repositories
                    );
                    anomalies.push(Anomaly::Unsuccessful {
                        id: job.id,
                        state: job.state.clone(),
                        repositories: job.repositories.clone(),
                    });
                }
                StateClass::Waiting => {
                    warn!("Migration {} is still '{}', not downloading", job.id, job.state);
                }
            }
        }

        (archives, anomalies)
    }

    async fn download(&self, job: &MigrationJob) -> Result<Archive, Anomaly> {
        let path = self.archive_path(job);
        info!("Downloading archive of migration {} to {}", job.id, path.display());

        match self.api.download_archive(job.id, &path).await {
            Ok(bytes) => {
                info!("Saved {} ({} bytes)", path.display(), bytes);
                Ok(Archive {
                    id: job.id,
                    path,
                    bytes,
                })
            }
            Err(e) => {
                error!("Failed to download archive of migration {}: {}", job.id, e);
                Err(Anomaly::DownloadFailed {
                    id: job.id,
                    repositories: job.repositories.clone(),
                    path,
                    error: e.to_string(),
                })
            }
        }
    }
}
