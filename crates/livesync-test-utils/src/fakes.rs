//! In-memory collaborators for exercising the planner and executor.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use livesync_core::{
    BoxError, CancelFlag, CommandGenerator, Container, Operation, Pod, PodLister, SyncPlan,
    WorkingDirResolver,
};

/// Always resolves to the same working directory.
pub struct StaticWorkingDir(pub String);

impl StaticWorkingDir {
    pub fn new(dir: impl Into<String>) -> Self {
        Self(dir.into())
    }
}

impl WorkingDirResolver for StaticWorkingDir {
    fn working_dir(&self, _tag: &str, _insecure: &BTreeSet<String>) -> Result<String, BoxError> {
        Ok(self.0.clone())
    }
}

/// Always fails with the given message.
pub struct FailingWorkingDir(pub String);

impl WorkingDirResolver for FailingWorkingDir {
    fn working_dir(&self, _tag: &str, _insecure: &BTreeSet<String>) -> Result<String, BoxError> {
        Err(self.0.clone().into())
    }
}

/// Resolves to a fixed directory and records every tag it was asked about.
#[derive(Default)]
pub struct CountingWorkingDir {
    pub dir: String,
    pub tags: Mutex<Vec<String>>,
}

impl CountingWorkingDir {
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            tags: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.tags.lock().unwrap().len()
    }
}

impl WorkingDirResolver for CountingWorkingDir {
    fn working_dir(&self, tag: &str, _insecure: &BTreeSet<String>) -> Result<String, BoxError> {
        self.tags.lock().unwrap().push(tag.to_string());
        Ok(self.dir.clone())
    }
}

/// Namespaces and pods held in memory.
#[derive(Default)]
pub struct FakeCluster {
    pods: HashMap<String, Vec<Pod>>,
    failing_namespace: Option<String>,
    list_calls: AtomicUsize,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pod with one container per `(name, image)` pair.
    pub fn with_pod(mut self, namespace: &str, pod: &str, containers: &[(&str, &str)]) -> Self {
        let containers = containers
            .iter()
            .map(|(name, image)| Container::new(*name, *image))
            .collect();
        self.pods
            .entry(namespace.to_string())
            .or_default()
            .push(Pod::new(pod, namespace, containers));
        self
    }

    /// Make listing `namespace` fail as an unreachable cluster would.
    pub fn failing_on(mut self, namespace: &str) -> Self {
        self.failing_namespace = Some(namespace.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl PodLister for FakeCluster {
    fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, BoxError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_namespace.as_deref() == Some(namespace) {
            return Err(format!("connection refused listing {namespace}").into());
        }
        Ok(self.pods.get(namespace).cloned().unwrap_or_default())
    }
}

/// Ordered log of operations that actually ran.
pub type Journal = Arc<Mutex<Vec<String>>>;

/// An operation that appends its description to a journal when run.
pub struct RecordedOp {
    description: String,
    journal: Journal,
    fail: bool,
    cancel: Option<CancelFlag>,
}

impl Operation for RecordedOp {
    fn describe(&self) -> String {
        self.description.clone()
    }

    fn run(&self) -> Result<(), BoxError> {
        if self.fail {
            return Err(format!("{} failed", self.description).into());
        }
        self.journal.lock().unwrap().push(self.description.clone());
        if let Some(flag) = &self.cancel {
            flag.store(true, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Generates one [`RecordedOp`] per copy entry and one per delete entry.
///
/// Descriptions look like `copy /ws/a.js -> pod/container` and
/// `delete /ws/b.js -> pod/container`.
#[derive(Default)]
pub struct RecordingGenerator {
    journal: Journal,
    fail_at: Option<usize>,
    cancel_at: Option<(usize, CancelFlag)>,
    generated: AtomicUsize,
    empty: bool,
}

impl RecordingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The operation with this zero-based index, counted across the whole
    /// run, fails instead of recording.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// The operation with this index raises `flag` once it has recorded.
    pub fn cancelling_at(mut self, index: usize, flag: CancelFlag) -> Self {
        self.cancel_at = Some((index, flag));
        self
    }

    /// Produce no operations for any container.
    pub fn producing_nothing(mut self) -> Self {
        self.empty = true;
        self
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    fn next_op(&self, description: String) -> Box<dyn Operation> {
        let index = self.generated.fetch_add(1, Ordering::SeqCst);
        Box::new(RecordedOp {
            description,
            journal: Arc::clone(&self.journal),
            fail: self.fail_at == Some(index),
            cancel: self
                .cancel_at
                .as_ref()
                .filter(|(at, _)| *at == index)
                .map(|(_, flag)| Arc::clone(flag)),
        })
    }
}

impl CommandGenerator for RecordingGenerator {
    fn commands(
        &self,
        pod: &Pod,
        container: &Container,
        plan: &SyncPlan,
    ) -> Vec<Box<dyn Operation>> {
        if self.empty {
            return Vec::new();
        }

        let target = format!("{}/{}", pod.name, container.name);
        let copies = plan
            .copy
            .iter()
            .map(|entry| format!("copy {} -> {}", entry.host, target));
        let deletes = plan
            .delete
            .iter()
            .map(|entry| format!("delete {} -> {}", entry.host, target));

        copies
            .chain(deletes)
            .map(|description| self.next_op(description))
            .collect()
    }
}
