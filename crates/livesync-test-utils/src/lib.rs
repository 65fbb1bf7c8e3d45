//! Shared test utilities for the livesync workspace.
//!
//! This crate provides in-memory stand-ins for every collaborator the sync
//! engine talks to, plus an on-disk workspace builder. It is a dev-dependency
//! only and never published.
//!
//! # Modules
//!
//! - [`fakes`]: working-dir resolvers, a fake cluster and a recording
//!   command generator
//! - [`workspace`]: [`workspace::TestWorkspace`] for config and builds files

pub mod fakes;
pub mod workspace;
