//! [`TestWorkspace`] builder for on-disk livesync scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding a livesync config, builds file and
/// workspace sources.
///
/// # Example
///
/// ```rust,no_run
/// use livesync_test_utils::workspace::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_file("app/src/main.js", "console.log(1)");
/// let config = ws.write_config("[[artifacts]]\nimage = \"app\"\n");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write `livesync.toml` at the root.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        self.write_file("livesync.toml", toml)
    }

    /// Write `builds.json` with the given `(image, tag)` pairs.
    pub fn write_builds(&self, builds: &[(&str, &str)]) -> PathBuf {
        let entries: Vec<String> = builds
            .iter()
            .map(|(image, tag)| format!(r#"{{"image_name": "{image}", "tag": "{tag}"}}"#))
            .collect();
        self.write_file(
            "builds.json",
            &format!(r#"{{"builds": [{}]}}"#, entries.join(", ")),
        )
    }
}
