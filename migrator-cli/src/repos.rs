//! Repository list handling
//!
//! Repositories come from positional arguments, a line-delimited file, or
//! both (file entries follow the inline ones).

use std::path::Path;

use anyhow::{Context, Result, bail};

/// Parses a line-delimited repository list
///
/// Entries are trimmed; blank lines and `#` comments are skipped.
pub fn parse_repo_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Collects the repositories to export
///
/// Fails when the file cannot be read or the result is empty.
pub async fn collect_repositories(inline: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut repositories: Vec<String> = inline
        .iter()
        .map(|repo| repo.trim().to_string())
        .filter(|repo| !repo.is_empty())
        .collect();

    if let Some(path) = file {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read repository list {}", path.display()))?;
        repositories.extend(parse_repo_list(&contents));
    }

    if repositories.is_empty() {
        bail!("no repositories given; pass them as arguments or with --repos-file");
    }

    Ok(repositories)
}
