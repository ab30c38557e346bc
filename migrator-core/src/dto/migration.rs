//! Migration DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::batch::Batch;
use crate::domain::migration::{MigrationId, MigrationOptions, MigrationState};

/// Request body for starting an organization migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartMigration {
    #[serde(flatten)]
    pub options: MigrationOptions,
    pub repositories: Vec<String>,
}

impl StartMigration {
    pub fn new(batch: &Batch, options: MigrationOptions) -> Self {
        Self {
            options,
            repositories: batch.repositories().to_vec(),
        }
    }
}

/// Migration object returned by the provider
///
/// Only the fields the orchestrator reads are modelled; the rest of the
/// payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Migration {
    pub id: MigrationId,
    pub state: MigrationState,
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
