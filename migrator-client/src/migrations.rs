//! Organization migration endpoints

use std::path::Path;

use async_trait::async_trait;
use migrator_core::MigrationId;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::Result;
use crate::{GitHubClient, Migration, MigrationApi, StartMigration};

#[async_trait]
impl MigrationApi for GitHubClient {
    /// `POST /orgs/{org}/migrations`
    async fn start_migration(&self, req: &StartMigration) -> Result<Migration> {
        let url = self.migrations_url();
        debug!(
            "Starting migration for {} repositories via {}",
            req.repositories.len(),
            url
        );

        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// `GET /orgs/{org}/migrations/{id}`
    async fn get_migration(&self, id: MigrationId) -> Result<Migration> {
        let url = format!("{}/{}", self.migrations_url(), id);
        debug!("Fetching migration {}", id);

        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// `GET /orgs/{org}/migrations/{id}/archive`
    ///
    /// The provider redirects to short-lived storage; the redirect is followed
    /// and the authorization header is not forwarded to the other host. A
    /// partially written file is removed on failure.
    async fn download_archive(&self, id: MigrationId, dest: &Path) -> Result<u64> {
        let url = format!("{}/{}/archive", self.migrations_url(), id);
        debug!("Downloading archive of migration {} to {}", id, dest.display());

        let response = self.client.get(&url).send().await?;
        let response = self.check_status(response).await?;

        let result = write_body(response, dest).await;
        if result.is_err() {
            if let Err(e) = tokio::fs::remove_file(dest).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to remove partial archive {}: {}", dest.display(), e);
                }
            }
        }
        result
    }
}

async fn write_body(mut response: reqwest::Response, dest: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(dest).await?;
    let mut written = 0u64;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}
