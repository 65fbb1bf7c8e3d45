//! Configuration types and loading for livesync
//!
//! This module provides types for loading and working with the
//! `livesync.toml` configuration file.

use std::collections::BTreeSet;

use livesync_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::validation;

/// A user-declared mapping from workspace files to container paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRule {
    /// Glob matched against the path relative to the artifact workspace
    pub src: String,
    /// Absolute container path, or one relative to the container working dir
    pub dest: String,
    /// Literal prefix removed from the relative path before joining onto `dest`
    #[serde(default)]
    pub strip: String,
}

impl SyncRule {
    pub fn new(src: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
            strip: String::new(),
        }
    }

    /// Set the prefix stripped from matched paths.
    pub fn with_strip(mut self, strip: impl Into<String>) -> Self {
        self.strip = strip.into();
        self
    }
}

/// One image built from a workspace, with its sync rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Logical image name, matched against build records
    #[serde(alias = "image_name")]
    pub image: String,
    /// Directory the image is built from
    #[serde(default = "default_workspace")]
    pub workspace: String,
    /// Sync rules in declaration order
    #[serde(default)]
    pub sync: Vec<SyncRule>,
}

fn default_workspace() -> String {
    ".".to_string()
}

impl ArtifactConfig {
    pub fn new(image: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            workspace: workspace.into(),
            sync: Vec::new(),
        }
    }

    /// Append a sync rule.
    pub fn with_rule(mut self, rule: SyncRule) -> Self {
        self.sync.push(rule);
        self
    }

    /// Workspace root as a normalized path.
    pub fn workspace_path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.workspace)
    }

    pub fn rules(&self) -> &[SyncRule] {
        &self.sync
    }

    pub fn has_sync_rules(&self) -> bool {
        !self.sync.is_empty()
    }
}

/// Top-level livesync configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivesyncConfig {
    /// Namespaces searched for running containers, in order
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<String>,
    /// Registries the working-dir lookup may reach over plain HTTP
    #[serde(default)]
    pub insecure_registries: Vec<String>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactConfig>,
}

fn default_namespaces() -> Vec<String> {
    vec!["default".to_string()]
}

impl Default for LivesyncConfig {
    fn default() -> Self {
        Self {
            namespaces: default_namespaces(),
            insecure_registries: Vec::new(),
            artifacts: Vec::new(),
        }
    }
}

impl LivesyncConfig {
    /// Load, resolve and validate a configuration file.
    ///
    /// Relative artifact workspaces are resolved against the directory the
    /// configuration file lives in.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// artifact or rule fails validation.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let mut config: LivesyncConfig = ConfigStore::new().load(path)?;

        let base = path.parent().unwrap_or_else(|| NormalizedPath::new("."));
        for artifact in &mut config.artifacts {
            let workspace = artifact.workspace_path();
            if !workspace.is_absolute() {
                artifact.workspace = base.join(workspace.as_str()).cleaned().to_string();
            }
        }

        if config.namespaces.is_empty() {
            return Err(Error::InvalidConfig {
                path: path.to_native(),
                message: "at least one namespace is required".into(),
            });
        }

        config.validate()?;
        tracing::debug!(
            %path,
            artifacts = config.artifacts.len(),
            namespaces = ?config.namespaces,
            "Loaded livesync config"
        );
        Ok(config)
    }

    /// Check every artifact and rule.
    pub fn validate(&self) -> Result<()> {
        for (index, artifact) in self.artifacts.iter().enumerate() {
            validation::validate_artifact(index, artifact)?;
        }
        Ok(())
    }

    /// Look up an artifact by image name.
    pub fn artifact(&self, image: &str) -> Result<&ArtifactConfig> {
        self.artifacts
            .iter()
            .find(|a| a.image == image)
            .ok_or_else(|| Error::ArtifactNotFound {
                image: image.to_string(),
            })
    }

    pub fn insecure_registry_set(&self) -> BTreeSet<String> {
        self.insecure_registries.iter().cloned().collect()
    }
}
