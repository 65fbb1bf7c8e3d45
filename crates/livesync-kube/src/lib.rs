//! kubectl and docker integration for livesync
//!
//! This crate provides the concrete collaborators the sync engine needs in
//! a real dev loop:
//!
//! - [`KubectlPodLister`] lists pods with `kubectl get pods -o json`
//! - [`KubectlCommands`] turns a plan into `kubectl exec` / `kubectl cp`
//!   operations for one container
//! - [`DockerWorkingDir`] reads an image's working directory with
//!   `docker image inspect`
//!
//! Every external program is run as a subprocess; nothing here links
//! against a cluster client library.

pub mod commands;
pub mod docker;
pub mod error;
pub mod pods;
pub mod subprocess;

pub use commands::{CommandOperation, KubectlCommands};
pub use docker::DockerWorkingDir;
pub use error::{KubeError, Result};
pub use pods::KubectlPodLister;
