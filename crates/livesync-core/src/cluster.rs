//! Collaborator interfaces
//!
//! The engine reaches the outside world only through these traits: the
//! image inspector that knows a container's working directory, the cluster
//! that lists pods, and the generator that turns a plan into commands for
//! one container.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::sync::SyncPlan;

/// Error type returned by collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A running container as reported by the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub name: String,
    /// Image reference the container was started from
    pub image: String,
}

impl Container {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// A pod and the containers declared in its spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pod {
    pub name: String,
    pub namespace: String,
    pub containers: Vec<Container>,
}

impl Pod {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        containers: Vec<Container>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            containers,
        }
    }
}

/// Resolves the working directory baked into an image.
pub trait WorkingDirResolver {
    /// Return the absolute working directory of the image `tag`.
    ///
    /// `insecure_registries` lists registries that may be reached over
    /// plain HTTP while inspecting the image.
    fn working_dir(
        &self,
        tag: &str,
        insecure_registries: &BTreeSet<String>,
    ) -> std::result::Result<String, BoxError>;
}

impl<F> WorkingDirResolver for F
where
    F: Fn(&str, &BTreeSet<String>) -> std::result::Result<String, BoxError>,
{
    fn working_dir(
        &self,
        tag: &str,
        insecure_registries: &BTreeSet<String>,
    ) -> std::result::Result<String, BoxError> {
        self(tag, insecure_registries)
    }
}

/// Lists the pods of one namespace.
pub trait PodLister {
    /// Fails on cluster unavailability (transport or auth).
    fn list_pods(&self, namespace: &str) -> std::result::Result<Vec<Pod>, BoxError>;
}

/// One executable step produced by a [`CommandGenerator`].
pub trait Operation {
    /// Human-readable form, used in logs and errors.
    fn describe(&self) -> String;

    /// Run the step to completion.
    fn run(&self) -> std::result::Result<(), BoxError>;
}

/// Turns a plan into the ordered operations for one container.
pub trait CommandGenerator {
    fn commands(&self, pod: &Pod, container: &Container, plan: &SyncPlan)
    -> Vec<Box<dyn Operation>>;
}
