//! Scheduler layer
//!
//! Polls launched migrations until each one reaches a terminal state. This
//! is the only place migration states change after launch.

pub mod poller;

pub use poller::{MigrationPoller, PollSettings, PollSummary};
