//! Service layer
//!
//! Services hold the per-migration business logic of an export: launching a
//! migration for each batch and downloading finished archives. They talk to
//! the provider only through [`migrator_client::MigrationApi`], so tests can
//! substitute an in-memory provider.

mod downloader;
mod launcher;

pub use downloader::ArchiveDownloader;
pub use launcher::Launcher;
