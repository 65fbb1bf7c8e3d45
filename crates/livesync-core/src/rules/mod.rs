//! Sync rule matching
//!
//! Maps a single workspace-relative path onto the container paths declared
//! by an artifact's sync rules.

mod matcher;

pub use matcher::match_sync_rules;
