//! Working directory lookup through `docker image inspect`

use std::collections::BTreeSet;

use livesync_core::{BoxError, WorkingDirResolver};

use crate::subprocess;

/// Reads `Config.WorkingDir` of a locally available image.
#[derive(Debug, Clone)]
pub struct DockerWorkingDir {
    docker: String,
}

impl Default for DockerWorkingDir {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerWorkingDir {
    pub fn new() -> Self {
        Self {
            docker: "docker".to_string(),
        }
    }
}

/// An image without a configured working directory runs in `/`.
pub fn working_dir_or_root(inspected: &str) -> String {
    let trimmed = inspected.trim();
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

impl WorkingDirResolver for DockerWorkingDir {
    fn working_dir(
        &self,
        tag: &str,
        insecure_registries: &BTreeSet<String>,
    ) -> std::result::Result<String, BoxError> {
        if !insecure_registries.is_empty() {
            tracing::debug!(
                ?insecure_registries,
                "Insecure registries are resolved by the docker daemon"
            );
        }

        let args: Vec<String> = [
            "image",
            "inspect",
            "--format",
            "{{.Config.WorkingDir}}",
            tag,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let stdout = subprocess::run(&self.docker, &args)?;
        Ok(working_dir_or_root(&stdout))
    }
}
