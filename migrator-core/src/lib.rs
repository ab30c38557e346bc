//! Migrator Core
//!
//! Core types and orchestration state for the Migrator organization exporter.
//!
//! This crate contains:
//! - Domain types: Migration jobs, their lifecycle states and export options
//! - DTOs: Payloads exchanged with the hosting provider's migration API
//! - Batching: How a repository list is split into migration jobs
//! - Tracking: The in-memory registry of launched migrations
//! - Archive naming: Deterministic output file names

pub mod archive;
pub mod batch;
pub mod domain;
pub mod dto;
pub mod tracker;

pub use batch::{Batch, BatchMode};
pub use domain::migration::{MigrationId, MigrationJob, MigrationOptions, MigrationState, StateClass};
pub use tracker::{Tracker, Update};
