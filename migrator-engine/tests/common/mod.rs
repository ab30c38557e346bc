//! In-memory provider used by the engine tests
//!
//! Each launched migration consumes the next scripted sequence of poll
//! responses. The last step of a script repeats forever.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use migrator_client::{ClientError, Migration, MigrationApi, Result, StartMigration};
use migrator_core::{BatchMode, MigrationId, MigrationState};
use migrator_engine::ExportConfig;

#[derive(Debug, Clone)]
pub enum Step {
    State(&'static str),
    Error(u16),
}

use Step::{Error, State};

pub fn states(names: &[&'static str]) -> Vec<Step> {
    names.iter().copied().map(State).collect()
}

#[derive(Default)]
struct Inner {
    scripts: VecDeque<Vec<Step>>,
    polls_left: HashMap<MigrationId, VecDeque<Step>>,
    failing_launches: HashSet<usize>,
    failing_downloads: HashSet<MigrationId>,
    launches: Vec<StartMigration>,
    polls: Vec<MigrationId>,
    downloads: Vec<MigrationId>,
}

#[derive(Default)]
pub struct FakeApi {
    inner: Mutex<Inner>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the poll script for the next launched migration
    ///
    /// Migrations get ids 1, 2, 3... in launch order.
    pub fn with_job(self, script: Vec<Step>) -> Self {
        assert!(!script.is_empty(), "script needs at least one step");
        self.inner.lock().unwrap().scripts.push_back(script);
        self
    }

    /// Makes the launch with the given zero-based index fail
    pub fn fail_launch(self, index: usize) -> Self {
        self.inner.lock().unwrap().failing_launches.insert(index);
        self
    }

    pub fn fail_download(self, id: u64) -> Self {
        self.inner
            .lock()
            .unwrap()
            .failing_downloads
            .insert(MigrationId(id));
        self
    }

    pub fn launches(&self) -> Vec<Vec<String>> {
        self.inner
            .lock()
            .unwrap()
            .launches
            .iter()
            .map(|req| req.repositories.clone())
            .collect()
    }

    pub fn launch_requests(&self) -> Vec<StartMigration> {
        self.inner.lock().unwrap().launches.clone()
    }

    pub fn polls(&self) -> Vec<MigrationId> {
        self.inner.lock().unwrap().polls.clone()
    }

    pub fn polls_of(&self, id: u64) -> usize {
        self.polls()
            .into_iter()
            .filter(|polled| *polled == MigrationId(id))
            .count()
    }

    pub fn downloads(&self) -> Vec<MigrationId> {
        self.inner.lock().unwrap().downloads.clone()
    }
}

#[async_trait]
impl MigrationApi for FakeApi {
    async fn start_migration(&self, req: &StartMigration) -> Result<Migration> {
        let mut inner = self.inner.lock().unwrap();
        let index = inner.launches.len();
        inner.launches.push(req.clone());

        if inner.failing_launches.contains(&index) {
            return Err(ClientError::api_error(403, "Resource not accessible"));
        }

        let id = MigrationId(index as u64 + 1);
        let script = inner.scripts.pop_front().unwrap_or_else(|| vec![State("exported")]);
        inner.polls_left.insert(id, script.into());

        Ok(Migration {
            id,
            state: MigrationState::Pending,
            guid: None,
            created_at: None,
            updated_at: None,
        })
    }

    async fn get_migration(&self, id: MigrationId) -> Result<Migration> {
        let mut inner = self.inner.lock().unwrap();
        inner.polls.push(id);

        let script = inner
            .polls_left
            .get_mut(&id)
            .ok_or_else(|| ClientError::api_error(404, "Not Found"))?;
        let step = if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap()
        };

        match step {
            State(state) => Ok(Migration {
                id,
                state: MigrationState::from(state),
                guid: None,
                created_at: None,
                updated_at: None,
            }),
            Error(status) => Err(ClientError::api_error(status, "scripted failure")),
        }
    }

    async fn download_archive(&self, id: MigrationId, dest: &Path) -> Result<u64> {
        let mut inner = self.inner.lock().unwrap();
        inner.downloads.push(id);

        if inner.failing_downloads.contains(&id) {
            return Err(ClientError::api_error(500, "storage unavailable"));
        }

        let body = format!("archive-{}", id);
        std::fs::write(dest, &body)?;
        Ok(body.len() as u64)
    }
}

/// Fast-polling configuration writing into `dir`
pub fn test_config(mode: BatchMode, dir: &Path) -> ExportConfig {
    ExportConfig::new(mode, Default::default())
        .with_output_dir(dir)
        .with_poll_interval(Duration::from_millis(1))
}

pub fn repos(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
