//! Migration domain types

use serde::{Deserialize, Serialize};

use crate::batch::Batch;

/// Provider-assigned migration identifier
///
/// Immutable once assigned. GitHub hands out integer identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MigrationId(pub u64);

impl std::fmt::Display for MigrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MigrationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(MigrationId)
    }
}

impl From<u64> for MigrationId {
    fn from(id: u64) -> Self {
        MigrationId(id)
    }
}

/// Migration lifecycle state as reported by the provider
///
/// The vocabulary is provider-defined. Values outside the known set are kept
/// verbatim in [`MigrationState::Other`] and count as unsuccessful terminal
/// states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MigrationState {
    Pending,
    Exporting,
    Exported,
    Failed,
    Other(String),
}

/// Orchestration class of a [`MigrationState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateClass {
    /// Not finished yet; keep polling
    Waiting,
    /// Finished with an archive ready for download
    Succeeded,
    /// Finished without an archive
    Unsuccessful,
}

impl MigrationState {
    /// Returns the provider string for this state
    pub fn as_str(&self) -> &str {
        match self {
            MigrationState::Pending => "pending",
            MigrationState::Exporting => "exporting",
            MigrationState::Exported => "exported",
            MigrationState::Failed => "failed",
            MigrationState::Other(raw) => raw,
        }
    }

    pub fn class(&self) -> StateClass {
        match self {
            MigrationState::Pending | MigrationState::Exporting => StateClass::Waiting,
            MigrationState::Exported => StateClass::Succeeded,
            MigrationState::Failed | MigrationState::Other(_) => StateClass::Unsuccessful,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.class() == StateClass::Waiting
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_waiting()
    }
}

impl From<String> for MigrationState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => MigrationState::Pending,
            "exporting" => MigrationState::Exporting,
            "exported" => MigrationState::Exported,
            "failed" => MigrationState::Failed,
            _ => MigrationState::Other(raw),
        }
    }
}

impl From<&str> for MigrationState {
    fn from(raw: &str) -> Self {
        MigrationState::from(raw.to_string())
    }
}

impl From<MigrationState> for String {
    fn from(state: MigrationState) -> Self {
        match state {
            MigrationState::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for MigrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Export options applied to every migration of one invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationOptions {
    /// Lock the repositories for the duration of the export
    pub lock_repositories: bool,
    pub exclude_attachments: bool,
    pub exclude_git_data: bool,
    pub exclude_metadata: bool,
    pub exclude_owner_projects: bool,
    pub exclude_releases: bool,
}

/// A launched migration and everything needed to report on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationJob {
    pub id: MigrationId,
    pub state: MigrationState,
    /// The batch that produced this migration
    pub repositories: Batch,
    pub options: MigrationOptions,
}

impl MigrationJob {
    /// Creates a freshly launched job in the `pending` state
    ///
    /// The provider may already report a more specific state; the first poll
    /// round picks it up.
    pub fn launched(id: MigrationId, repositories: Batch, options: MigrationOptions) -> Self {
        Self {
            id,
            state: MigrationState::Pending,
            repositories,
            options,
        }
    }
}
