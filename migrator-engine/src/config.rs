//! Export configuration
//!
//! Defines every tunable of one export run: how repositories are batched,
//! which export options are sent, where archives land and how polling is
//! paced.

use std::path::PathBuf;
use std::time::Duration;

use migrator_core::{BatchMode, MigrationOptions};

use crate::error::{ExportError, Result};

/// Pause between polling rounds
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// First delay before retrying a failed status query
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Export configuration
///
/// Polling is unbounded unless `max_poll_rounds` or `poll_timeout` is set.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// One migration for everything, or one per repository
    pub mode: BatchMode,

    /// Options sent with every migration of this run
    pub options: MigrationOptions,

    /// Archive base name; `migration-archive-<id>` when unset
    pub archive_name: Option<String>,

    /// Directory archives are written to
    pub output_dir: PathBuf,

    /// How long to sleep between polling rounds
    pub poll_interval: Duration,

    /// Give up after this many polling rounds
    pub max_poll_rounds: Option<u32>,

    /// Give up when the next polling round would start after this long
    pub poll_timeout: Option<Duration>,

    /// Extra attempts for a status query that failed transiently
    pub status_retries: u32,

    /// Delay before the first retry, doubled per attempt
    pub retry_base_delay: Duration,
}

impl ExportConfig {
    /// Creates a configuration with defaults
    pub fn new(mode: BatchMode, options: MigrationOptions) -> Self {
        Self {
            mode,
            options,
            archive_name: None,
            output_dir: PathBuf::from("."),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_rounds: None,
            poll_timeout: None,
            status_retries: 0,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }

    pub fn with_archive_name(mut self, name: impl Into<String>) -> Self {
        self.archive_name = Some(name.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_poll_rounds(mut self, rounds: u32) -> Self {
        self.max_poll_rounds = Some(rounds);
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = Some(timeout);
        self
    }

    pub fn with_status_retries(mut self, retries: u32, base_delay: Duration) -> Self {
        self.status_retries = retries;
        self.retry_base_delay = base_delay;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(ExportError::InvalidConfig(
                "poll_interval must be greater than 0".into(),
            ));
        }

        if self.max_poll_rounds == Some(0) {
            return Err(ExportError::InvalidConfig(
                "max_poll_rounds must be greater than 0".into(),
            ));
        }

        if self.poll_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ExportError::InvalidConfig(
                "poll_timeout must be greater than 0".into(),
            ));
        }

        if self.status_retries > 0 && self.retry_base_delay.is_zero() {
            return Err(ExportError::InvalidConfig(
                "retry_base_delay must be greater than 0 when retries are enabled".into(),
            ));
        }

        if let Some(name) = &self.archive_name {
            if name.trim().is_empty() {
                return Err(ExportError::InvalidConfig(
                    "archive_name cannot be empty".into(),
                ));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(ExportError::InvalidConfig(
                    "archive_name must be a file name, not a path; use the output directory instead"
                        .into(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(BatchMode::Combined, MigrationOptions::default())
    }
}
