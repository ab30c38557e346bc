//! Data Transfer Objects for the provider's migration API
//!
//! These types mirror the JSON bodies sent to and returned by the
//! organization migrations endpoints.

pub mod migration;
