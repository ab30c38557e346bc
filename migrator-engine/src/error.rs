//! Fatal export errors
//!
//! Anything in [`ExportError`] aborts the whole run. Problems confined to a
//! single migration are reported as [`crate::report::Anomaly`] instead.

use std::path::PathBuf;
use std::time::Duration;

use migrator_client::ClientError;
use migrator_core::{Batch, MigrationId};
use thiserror::Error;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Rejected before any request was sent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The output directory could not be created
    #[error("Failed to prepare output directory {}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating a migration failed; migrations launched earlier keep running
    #[error("Failed to launch migration for {batch}")]
    Launch {
        batch: Batch,
        #[source]
        source: ClientError,
    },

    /// A status query failed and retries, if any, were exhausted
    #[error("Failed to poll migration {id}")]
    Poll {
        id: MigrationId,
        #[source]
        source: ClientError,
    },

    /// The round cap or the polling timeout was reached
    #[error(
        "Polling gave up after {rounds} round(s) ({elapsed:?}); still waiting on migration(s) {}",
        join_ids(.waiting)
    )]
    PollLimit {
        rounds: u32,
        elapsed: Duration,
        waiting: Vec<MigrationId>,
    },
}

fn join_ids(ids: &[MigrationId]) -> String {
    ids.iter()
        .map(MigrationId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_limit_message_lists_waiting_ids() {
        let err = ExportError::PollLimit {
            rounds: 3,
            elapsed: Duration::from_secs(45),
            waiting: vec![MigrationId(7), MigrationId(9)],
        };

        let message = err.to_string();
        assert!(message.contains("3 round(s)"));
        assert!(message.contains("7, 9"));
    }

    #[test]
    fn test_launch_error_names_batch_and_keeps_source() {
        let err = ExportError::Launch {
            batch: Batch::new(vec!["a".to_string(), "b".to_string()]).unwrap(),
            source: ClientError::api_error(403, "Forbidden"),
        };

        assert_eq!(err.to_string(), "Failed to launch migration for [a, b]");
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("403"));
    }
}
