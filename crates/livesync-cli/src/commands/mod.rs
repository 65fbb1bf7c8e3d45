//! Command implementations for the livesync CLI

mod check;
mod plan;
mod sync;

pub use check::run_check;
pub use plan::run_plan;
pub use sync::run_sync;

use std::collections::BTreeSet;
use std::path::Path;

use livesync_core::{BoxError, ChangeEventBatch, PlanBuilder, PlanOutcome, WorkingDirResolver};
use livesync_fs::NormalizedPath;
use livesync_kube::DockerWorkingDir;
use livesync_meta::{
    ArtifactConfig, BuildArtifact, BuildsFile, LivesyncConfig, merge_with_previous_builds,
};

use crate::cli::BatchArgs;
use crate::error::{CliError, Result};

/// Load the configuration, resolving relative workspaces against the
/// canonical location of the config file.
pub fn load_config(path: &Path) -> Result<LivesyncConfig> {
    let canonical = livesync_fs::io::canonicalize(&NormalizedPath::new(path))?;
    Ok(LivesyncConfig::load(&canonical)?)
}

fn absolutize(cwd: &NormalizedPath, path: &Path) -> NormalizedPath {
    let path = NormalizedPath::new(path);
    if path.is_absolute() {
        path.cleaned()
    } else {
        cwd.join(path.as_str()).cleaned()
    }
}

/// Make a changed path absolute and resolve symlinks in its directory, so
/// it lines up with the canonical workspaces.
///
/// The file itself is not resolved; deleted files no longer exist and a
/// symlinked file still belongs to the workspace it sits in. If the
/// directory is gone too the lexical path is kept.
fn resolve_changed(cwd: &NormalizedPath, path: &Path) -> NormalizedPath {
    let abs = absolutize(cwd, path);
    match (abs.parent(), abs.file_name()) {
        (Some(parent), Some(name)) => match livesync_fs::io::canonicalize(&parent) {
            Ok(dir) => dir.join(name),
            Err(_) => abs,
        },
        _ => abs,
    }
}

/// Everything a `plan` or `sync` run works from.
pub struct Prepared {
    pub config: LivesyncConfig,
    pub builds: Vec<BuildArtifact>,
    pub batch: ChangeEventBatch,
}

impl Prepared {
    pub fn load(config_path: &Path, args: &BatchArgs) -> Result<Self> {
        let config = load_config(config_path)?;

        let mut builds = BuildsFile::load(&NormalizedPath::new(&args.builds))?;
        if let Some(previous) = &args.previous_builds {
            let previous = BuildsFile::load(&NormalizedPath::new(previous))?;
            builds = merge_with_previous_builds(&builds, &previous);
        }

        let cwd = livesync_fs::io::canonicalize(&NormalizedPath::new(std::env::current_dir()?))?;
        let to_abs = |paths: &[std::path::PathBuf]| -> Vec<NormalizedPath> {
            paths.iter().map(|p| resolve_changed(&cwd, p)).collect()
        };
        let batch = ChangeEventBatch {
            added: to_abs(&args.added),
            modified: to_abs(&args.modified),
            deleted: to_abs(&args.deleted),
        };

        Ok(Self {
            config,
            builds,
            batch,
        })
    }

    /// Artifacts selected by `--artifact`, or all of them.
    pub fn artifacts(&self, only: Option<&str>) -> Result<Vec<&ArtifactConfig>> {
        match only {
            Some(image) => Ok(vec![self.config.artifact(image)?]),
            None if self.config.artifacts.is_empty() => {
                Err(CliError::user("No artifacts declared in configuration"))
            }
            None => Ok(self.config.artifacts.iter().collect()),
        }
    }

    /// Build the plan outcome for every selected artifact.
    ///
    /// Each artifact only sees the changed files under its own workspace.
    pub fn plan_all(&self, args: &BatchArgs) -> Result<Vec<(&ArtifactConfig, PlanOutcome)>> {
        let docker = DockerWorkingDir::new();
        let fixed_dir = args.working_dir.clone();
        let fixed = move |_: &str, _: &BTreeSet<String>| -> std::result::Result<String, BoxError> {
            Ok(fixed_dir.clone().unwrap_or_default())
        };

        let resolver: &dyn WorkingDirResolver = if args.working_dir.is_some() {
            &fixed
        } else {
            &docker
        };

        let builder =
            PlanBuilder::new(resolver).with_insecure_registries(self.config.insecure_registry_set());

        let mut outcomes = Vec::new();
        for artifact in self.artifacts(args.artifact.as_deref())? {
            let batch = self.batch.within(&artifact.workspace_path());
            let outcome = builder.build(artifact, &batch, &self.builds)?;
            outcomes.push((artifact, outcome));
        }
        Ok(outcomes)
    }
}
