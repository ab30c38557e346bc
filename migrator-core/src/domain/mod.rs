//! Core domain types
//!
//! This module contains the domain structures shared by the client (which
//! talks to the provider) and the engine (which drives migrations to
//! completion).

pub mod migration;
