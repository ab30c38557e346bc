//! Migration tracker
//!
//! In-memory registry of launched migrations keyed by provider id. It is the
//! single source of truth for which migrations still need polling and which
//! archives can be downloaded.
//!
//! A migration that reached a terminal state is frozen: later updates are
//! refused. Iteration order is unspecified.

use std::collections::HashMap;

use crate::domain::migration::{MigrationId, MigrationJob, MigrationState};

/// Result of applying a state update to the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// The state was recorded; carries the state it replaced
    Applied { previous: MigrationState },
    /// The migration is already terminal and was left untouched
    Frozen { current: MigrationState },
    /// No migration with this id is tracked
    Unknown,
}

#[derive(Debug, Default)]
pub struct Tracker {
    jobs: HashMap<MigrationId, MigrationJob>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a launched migration
    ///
    /// Returns `false` and keeps the existing entry if the id is already
    /// tracked.
    pub fn register(&mut self, job: MigrationJob) -> bool {
        if self.jobs.contains_key(&job.id) {
            return false;
        }
        self.jobs.insert(job.id, job);
        true
    }

    pub fn get(&self, id: MigrationId) -> Option<&MigrationJob> {
        self.jobs.get(&id)
    }

    pub fn state(&self, id: MigrationId) -> Option<&MigrationState> {
        self.jobs.get(&id).map(|job| &job.state)
    }

    /// Records a new state for `id` unless the migration is already terminal
    pub fn update(&mut self, id: MigrationId, state: MigrationState) -> Update {
        let Some(job) = self.jobs.get_mut(&id) else {
            return Update::Unknown;
        };

        if job.state.is_terminal() {
            return Update::Frozen {
                current: job.state.clone(),
            };
        }

        let previous = std::mem::replace(&mut job.state, state);
        Update::Applied { previous }
    }

    pub fn jobs(&self) -> impl Iterator<Item = &MigrationJob> {
        self.jobs.values()
    }

    /// Ids of every migration still in the waiting class
    pub fn waiting(&self) -> Vec<MigrationId> {
        self.jobs
            .values()
            .filter(|job| job.state.is_waiting())
            .map(|job| job.id)
            .collect()
    }

    pub fn has_waiting(&self) -> bool {
        self.jobs.values().any(|job| job.state.is_waiting())
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
