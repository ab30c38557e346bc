//! Migrator Engine
//!
//! Drives organization migrations from a repository list to archives on disk.
//!
//! Architecture:
//! - Configuration: Batching, naming and polling settings for one export
//! - Services: Launching migrations and downloading their archives
//! - Scheduler: Polling launched migrations until they are terminal
//! - Export: The end-to-end run tying the layers together
//!
//! Everything runs sequentially on the caller's task. The provider's own
//! export time dominates, so requests are paced rather than parallelised.

pub mod config;
pub mod error;
pub mod export;
pub mod report;
pub mod scheduler;
pub mod service;

pub use config::ExportConfig;
pub use error::{ExportError, Result};
pub use export::run_export;
pub use report::{Anomaly, Archive, ExportReport};
