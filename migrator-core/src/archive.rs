//! Archive file naming
//!
//! Output names are part of the tool's compatibility contract:
//! - combined mode with a base name: `<base>.tar.gz`
//! - per-repository mode with a base name: `<base>-<id>.tar.gz`
//! - no base name, either mode: `migration-archive-<id>.tar.gz`

use crate::batch::BatchMode;
use crate::domain::migration::MigrationId;

/// Base name used when the caller does not supply one
pub const DEFAULT_ARCHIVE_BASE: &str = "migration-archive";

pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// Returns the archive file name for migration `id`
pub fn archive_file_name(base: Option<&str>, mode: BatchMode, id: MigrationId) -> String {
    match (base, mode) {
        (Some(base), BatchMode::Combined) => format!("{base}.{ARCHIVE_EXTENSION}"),
        (Some(base), BatchMode::PerRepository) => format!("{base}-{id}.{ARCHIVE_EXTENSION}"),
        (None, _) => format!("{DEFAULT_ARCHIVE_BASE}-{id}.{ARCHIVE_EXTENSION}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_mode_with_base_name() {
        assert_eq!(
            archive_file_name(Some("foo"), BatchMode::Combined, MigrationId(12)),
            "foo.tar.gz"
        );
    }

    #[test]
    fn test_per_repository_mode_with_base_name() {
        assert_eq!(
            archive_file_name(Some("foo"), BatchMode::PerRepository, MigrationId(12)),
            "foo-12.tar.gz"
        );
    }

    #[test]
    fn test_default_base_name_includes_id() {
        assert_eq!(
            archive_file_name(None, BatchMode::PerRepository, MigrationId(1)),
            "migration-archive-1.tar.gz"
        );
        assert_eq!(
            archive_file_name(None, BatchMode::PerRepository, MigrationId(2)),
            "migration-archive-2.tar.gz"
        );
        assert_eq!(
            archive_file_name(None, BatchMode::Combined, MigrationId(3)),
            "migration-archive-3.tar.gz"
        );
    }
}
