//! Filesystem helpers for livesync
//!
//! Provides slash-normalized path handling shared by host paths and
//! container paths, plus format-agnostic configuration loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, clean, join_segments};
