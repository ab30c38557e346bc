//! Configuration module
//!
//! Resolves where the API lives and how to authenticate against it. Failures
//! here are reported before any request is sent.

use anyhow::{Result, bail};
use migrator_client::{GitHubClient, api_base_for_host};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// REST API base URL derived from the host name
    pub api_base: String,
    /// Token used for every request
    pub token: String,
}

impl Config {
    /// Builds the configuration from the host name and the token sources
    ///
    /// `token` (flag or `GH_TOKEN`) wins over `fallback_token` (`GITHUB_TOKEN`).
    pub fn resolve(
        hostname: &str,
        token: Option<String>,
        fallback_token: Option<String>,
    ) -> Result<Self> {
        if hostname.trim().is_empty() {
            bail!("hostname cannot be empty");
        }

        let token = token
            .into_iter()
            .chain(fallback_token)
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty());

        let Some(token) = token else {
            bail!("no API token found; pass --token or set GH_TOKEN or GITHUB_TOKEN");
        };

        Ok(Self {
            api_base: api_base_for_host(hostname),
            token,
        })
    }

    /// Creates an API client for `org`
    pub fn client(&self, org: &str) -> Result<GitHubClient> {
        Ok(GitHubClient::new(&self.api_base, org, &self.token)?)
    }
}
