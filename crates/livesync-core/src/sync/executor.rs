//! Plan executor

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::plan::SyncPlan;
use crate::cluster::{CommandGenerator, PodLister};
use crate::{Error, Result};

/// Shared flag that stops an executor between remote calls.
///
/// Raising it never reverts an operation that has already started.
pub type CancelFlag = Arc<AtomicBool>;

/// Applies a [`SyncPlan`] to every running container of an image.
///
/// Namespaces, pods, containers and operations are visited strictly in
/// order, one at a time. The first failing operation ends the run and
/// nothing already applied is undone.
pub struct PlanExecutor<'a> {
    lister: &'a dyn PodLister,
    cancel: Option<CancelFlag>,
}

impl<'a> PlanExecutor<'a> {
    pub fn new(lister: &'a dyn PodLister) -> Self {
        Self {
            lister,
            cancel: None,
        }
    }

    /// Check `flag` before each pod listing and each operation.
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    /// Run the plan against every container whose image is exactly
    /// `target_image_tag`, returning how many operations were executed.
    ///
    /// An empty plan returns `Ok(0)` without contacting the cluster.
    ///
    /// # Errors
    ///
    /// - [`Error::Discovery`] if listing a namespace fails
    /// - [`Error::Execution`] for the first operation that fails
    /// - [`Error::NoFilesSynced`] if no operation ran at all
    /// - [`Error::Cancelled`] if the cancel flag was raised
    pub fn perform(
        &self,
        target_image_tag: &str,
        plan: &SyncPlan,
        namespaces: &[String],
        generator: &dyn CommandGenerator,
    ) -> Result<usize> {
        if plan.combined().is_empty() {
            return Ok(0);
        }

        let mut num_synced = 0;
        for namespace in namespaces {
            self.check_cancelled()?;
            let pods = self
                .lister
                .list_pods(namespace)
                .map_err(|source| Error::Discovery {
                    namespace: namespace.clone(),
                    source,
                })?;

            for pod in &pods {
                for container in &pod.containers {
                    if container.image != target_image_tag {
                        continue;
                    }

                    let operations = generator.commands(pod, container, plan);
                    tracing::debug!(
                        namespace = %namespace,
                        pod = %pod.name,
                        container = %container.name,
                        operations = operations.len(),
                        "Syncing container"
                    );

                    for operation in &operations {
                        self.check_cancelled()?;
                        operation.run().map_err(|source| Error::Execution {
                            operation: operation.describe(),
                            pod: pod.name.clone(),
                            container: container.name.clone(),
                            source,
                        })?;
                        num_synced += 1;
                    }
                }
            }
        }

        if num_synced == 0 {
            return Err(Error::NoFilesSynced);
        }

        tracing::info!(
            image = %target_image_tag,
            operations = num_synced,
            files = plan.file_count(),
            "Synced files"
        );
        Ok(num_synced)
    }
}
