//! Configuration and build metadata for livesync.
//!
//! This crate provides the user-facing configuration schema (artifacts and
//! their sync rules), the build records that map image names to freshly
//! built tags, and the glob semantics shared by validation and matching.

pub mod builds;
pub mod config;
pub mod error;
pub mod pattern;
pub mod validation;

pub use builds::{BuildArtifact, BuildsFile, merge_with_previous_builds};
pub use config::{ArtifactConfig, LivesyncConfig, SyncRule};
pub use error::{Error, Result};
pub use pattern::compile_pattern;
