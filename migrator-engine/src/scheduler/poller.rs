//! Migration poller
//!
//! Queries the provider for every waiting migration, one request at a time,
//! and sleeps a fixed interval between rounds. Terminal migrations are never
//! queried again, so the waiting set only shrinks.

use std::time::{Duration, Instant};

use migrator_client::MigrationApi;
use migrator_core::{MigrationId, MigrationState, Tracker, Update};
use tracing::{debug, info, warn};

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};

/// Upper bound for the delay between status retries
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Polling knobs, see [`ExportConfig`]
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_rounds: Option<u32>,
    pub timeout: Option<Duration>,
    pub status_retries: u32,
    pub retry_base_delay: Duration,
}

impl From<&ExportConfig> for PollSettings {
    fn from(config: &ExportConfig) -> Self {
        Self {
            interval: config.poll_interval,
            max_rounds: config.max_poll_rounds,
            timeout: config.poll_timeout,
            status_retries: config.status_retries,
            retry_base_delay: config.retry_base_delay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSummary {
    /// Rounds performed, zero when nothing was waiting
    pub rounds: u32,
    /// Status queries issued, retries included
    pub queries: u32,
}

pub struct MigrationPoller<'a> {
    api: &'a dyn MigrationApi,
    settings: PollSettings,
}

impl<'a> MigrationPoller<'a> {
    pub fn new(api: &'a dyn MigrationApi, settings: PollSettings) -> Self {
        Self { api, settings }
    }

    /// Polls until no tracked migration is waiting
    ///
    /// Any status query that still fails after its retries aborts the run,
    /// as does reaching the round cap or the timeout.
    pub async fn run(&self, tracker: &mut Tracker) -> Result<PollSummary> {
        info!(
            "Polling {} migration(s) (interval: {:?})",
            tracker.len(),
            self.settings.interval
        );

        let started = Instant::now();
        let mut summary = PollSummary {
            rounds: 0,
            queries: 0,
        };

        while tracker.has_waiting() {
            summary.rounds += 1;
            summary.queries += self.poll_once(tracker).await?;

            let waiting = tracker.waiting();
            if waiting.is_empty() {
                break;
            }

            debug!(
                "Round {} done, {} migration(s) still waiting",
                summary.rounds,
                waiting.len()
            );

            let elapsed = started.elapsed();
            let rounds_exhausted = self
                .settings
                .max_rounds
                .is_some_and(|max| summary.rounds >= max);
            let timed_out = self
                .settings
                .timeout
                .is_some_and(|timeout| elapsed + self.settings.interval > timeout);

            if rounds_exhausted || timed_out {
                let mut waiting = waiting;
                waiting.sort();
                return Err(ExportError::PollLimit {
                    rounds: summary.rounds,
                    elapsed,
                    waiting,
                });
            }

            tokio::time::sleep(self.settings.interval).await;
        }

        info!(
            "All migrations finished after {} round(s) ({:?})",
            summary.rounds,
            started.elapsed()
        );

        Ok(summary)
    }

    /// Performs a single polling round over the waiting migrations
    ///
    /// Returns the number of status queries issued.
    pub async fn poll_once(&self, tracker: &mut Tracker) -> Result<u32> {
        let mut queries = 0;

        for id in tracker.waiting() {
            let (state, attempts) = self.fetch_state(id).await?;
            queries += attempts;

            match tracker.update(id, state.clone()) {
                Update::Applied { previous } if previous != state => {
                    info!("Migration {}: {} -> {}", id, previous, state);
                }
                Update::Applied { .. } => {
                    debug!("Migration {} still {}", id, state);
                }
                Update::Frozen { current } => {
                    warn!(
                        "Ignoring state '{}' for migration {} already terminal as '{}'",
                        state, id, current
                    );
                }
                Update::Unknown => {
                    warn!("Ignoring state for untracked migration {}", id);
                }
            }
        }

        Ok(queries)
    }

    /// Queries the state of one migration with bounded retry on transient errors
    ///
    /// Returns the state and the number of attempts made.
    async fn fetch_state(&self, id: MigrationId) -> Result<(MigrationState, u32)> {
        let max_attempts = self.settings.status_retries.saturating_add(1);
        let mut attempt = 0;
        let mut delay = self.settings.retry_base_delay.min(MAX_RETRY_DELAY);

        loop {
            attempt += 1;

            match self.api.get_migration(id).await {
                Ok(migration) => return Ok((migration.state, attempt)),
                Err(source) => {
                    if attempt >= max_attempts || !source.is_transient() {
                        return Err(ExportError::Poll { id, source });
                    }

                    warn!(
                        "Status query for migration {} failed (attempt {}/{}): {}",
                        id, attempt, max_attempts, source
                    );
                    warn!("Retrying in {:?}...", delay);

                    tokio::time::sleep(delay).await;

                    // Exponential backoff with cap
                    delay = delay.saturating_mul(2).min(MAX_RETRY_DELAY);
                }
            }
        }
    }
}
