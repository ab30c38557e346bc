//! Migration launcher
//!
//! Submits one migration per batch and registers it with the tracker.

use migrator_client::{MigrationApi, StartMigration};
use migrator_core::{Batch, MigrationId, MigrationJob, MigrationOptions, Tracker};
use tracing::{info, warn};

use crate::error::{ExportError, Result};

pub struct Launcher<'a> {
    api: &'a dyn MigrationApi,
    options: MigrationOptions,
}

impl<'a> Launcher<'a> {
    pub fn new(api: &'a dyn MigrationApi, options: MigrationOptions) -> Self {
        Self { api, options }
    }

    /// Launches every batch in order
    ///
    /// Stops at the first failure. Migrations created before it are left
    /// running on the provider.
    pub async fn launch_all(
        &self,
        batches: Vec<Batch>,
        tracker: &mut Tracker,
    ) -> Result<Vec<MigrationId>> {
        let mut launched = Vec::with_capacity(batches.len());

        for batch in batches {
            match self.launch(batch, tracker).await {
                Ok(id) => launched.push(id),
                Err(e) => {
                    if !launched.is_empty() {
                        warn!(
                            "Aborting launch; {} migration(s) already started will keep running: {:?}",
                            launched.len(),
                            launched
                        );
                    }
                    return Err(e);
                }
            }
        }

        Ok(launched)
    }

    /// Launches a single batch and tracks it as `pending`
    pub async fn launch(&self, batch: Batch, tracker: &mut Tracker) -> Result<MigrationId> {
        let req = StartMigration::new(&batch, self.options);

        let migration = match self.api.start_migration(&req).await {
            Ok(migration) => migration,
            Err(source) => return Err(ExportError::Launch { batch, source }),
        };

        info!(
            "Started migration {} for {} repositories {}",
            migration.id,
            batch.len(),
            batch
        );

        let id = migration.id;
        if !tracker.register(MigrationJob::launched(id, batch, self.options)) {
            warn!("Provider returned already tracked migration id {}", id);
        }

        Ok(id)
    }
}
