//! Migrator HTTP Client
//!
//! A small, type-safe client for the organization migrations API of GitHub
//! and GitHub Enterprise Server.
//!
//! The [`MigrationApi`] trait is the seam the engine drives; [`GitHubClient`]
//! is its HTTP implementation.
//!
//! # Example
//!
//! ```no_run
//! use migrator_client::{GitHubClient, MigrationApi, api_base_for_host};
//! use migrator_core::dto::migration::StartMigration;
//! use migrator_core::{Batch, MigrationOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GitHubClient::new(api_base_for_host("github.com"), "octo-org", "ghp_token")?;
//!
//!     let batch = Batch::new(vec!["hello-world".to_string()]).unwrap();
//!     let migration = client
//!         .start_migration(&StartMigration::new(&batch, MigrationOptions::default()))
//!         .await?;
//!
//!     println!("Started migration: {}", migration.id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod migrations;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use migrator_core::dto::migration::{Migration, StartMigration};

use std::path::Path;

use async_trait::async_trait;
use migrator_core::MigrationId;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

/// Public GitHub host name
pub const GITHUB_HOST: &str = "github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("migrator/", env!("CARGO_PKG_VERSION"));

/// Provider operations needed to drive a migration to completion
#[async_trait]
pub trait MigrationApi: Send + Sync {
    /// Starts a migration and returns the provider's migration object
    async fn start_migration(&self, req: &StartMigration) -> Result<Migration>;

    /// Fetches the current migration object, including its state
    async fn get_migration(&self, id: MigrationId) -> Result<Migration>;

    /// Streams the archive of an exported migration into `dest`
    ///
    /// Returns the number of bytes written.
    async fn download_archive(&self, id: MigrationId, dest: &Path) -> Result<u64>;
}

/// Returns the REST API base URL for a host name
///
/// `github.com` maps to `https://api.github.com`, any other host to its
/// Enterprise Server endpoint. Values that already carry a scheme are used
/// as-is.
pub fn api_base_for_host(hostname: &str) -> String {
    let hostname = hostname.trim().trim_end_matches('/');

    if hostname.starts_with("http://") || hostname.starts_with("https://") {
        hostname.to_string()
    } else if hostname.eq_ignore_ascii_case(GITHUB_HOST) {
        "https://api.github.com".to_string()
    } else {
        format!("https://{}/api/v3", hostname)
    }
}

/// HTTP client for one organization's migrations
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// Base URL of the REST API (e.g., "https://api.github.com")
    base_url: String,
    /// Organization login
    org: String,
    /// HTTP client instance carrying auth and API headers
    client: Client,
}

impl GitHubClient {
    /// Create a new client authenticated with `token`
    ///
    /// # Arguments
    /// * `base_url` - REST API base URL, see [`api_base_for_host`]
    /// * `org` - Organization whose repositories are migrated
    /// * `token` - Personal access or app token with the `admin:org` scope
    pub fn new(
        base_url: impl Into<String>,
        org: impl Into<String>,
        token: &str,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ClientError::InvalidConfig("token is not a valid header value".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(base_url, org, client))
    }

    /// Create a new client with a preconfigured HTTP client
    ///
    /// The caller is responsible for auth headers.
    pub fn with_client(base_url: impl Into<String>, org: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            org: org.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the organization this client migrates
    pub fn org(&self) -> &str {
        &self.org
    }

    fn migrations_url(&self) -> String {
        format!("{}/orgs/{}/migrations", self.base_url, self.org)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code, returning the error body as an [`ClientError::ApiError`]
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        self.check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
