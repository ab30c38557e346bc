//! Export report
//!
//! Outcome of a run that completed without a fatal error. Per-migration
//! problems are collected here rather than aborting the run.

use std::path::PathBuf;

use migrator_core::{Batch, MigrationId, MigrationState};

/// An archive written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    pub id: MigrationId,
    pub path: PathBuf,
    pub bytes: u64,
}

/// A non-fatal problem with one migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// The migration finished in a state other than `exported`
    Unsuccessful {
        id: MigrationId,
        state: MigrationState,
        repositories: Batch,
    },
    /// The migration exported but its archive could not be fetched
    DownloadFailed {
        id: MigrationId,
        repositories: Batch,
        path: PathBuf,
        error: String,
    },
}

impl Anomaly {
    pub fn id(&self) -> MigrationId {
        match self {
            Anomaly::Unsuccessful { id, .. } | Anomaly::DownloadFailed { id, .. } => *id,
        }
    }

    pub fn repositories(&self) -> &Batch {
        match self {
            Anomaly::Unsuccessful { repositories, .. }
            | Anomaly::DownloadFailed { repositories, .. } => repositories,
        }
    }
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Anomaly::Unsuccessful {
                id,
                state,
                repositories,
            } => write!(
                f,
                "migration {} ended in state '{}' for repositories {}",
                id, state, repositories
            ),
            Anomaly::DownloadFailed {
                id,
                repositories,
                path,
                error,
            } => write!(
                f,
                "archive of migration {} (repositories {}) could not be saved to {}: {}",
                id,
                repositories,
                path.display(),
                error
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Number of migrations launched
    pub migrations: usize,
    /// Polling rounds performed
    pub rounds: u32,
    /// Archives written, ordered by migration id
    pub archives: Vec<Archive>,
    /// Per-migration problems, ordered by migration id
    pub anomalies: Vec<Anomaly>,
}

impl ExportReport {
    /// True when every migration produced an archive
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}
