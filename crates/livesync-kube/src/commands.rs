//! kubectl operations that apply a sync plan to one container

use std::collections::BTreeSet;

use livesync_core::{BoxError, CommandGenerator, Container, Operation, Pod, SyncPlan};
use livesync_fs::NormalizedPath;

use crate::subprocess;

/// An external command run as one sync step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOperation {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandOperation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Operation for CommandOperation {
    fn describe(&self) -> String {
        subprocess::render(&self.program, &self.args)
    }

    fn run(&self) -> std::result::Result<(), BoxError> {
        subprocess::run(&self.program, &self.args)?;
        Ok(())
    }
}

/// Generates kubectl commands for a container.
///
/// For the copy half of a plan: one `mkdir -p` of every destination's
/// parent, then one `kubectl cp` per destination. For the delete half: a
/// single `rm -rf` of every destination.
#[derive(Debug, Clone)]
pub struct KubectlCommands {
    kubectl: String,
    context: Option<String>,
}

impl Default for KubectlCommands {
    fn default() -> Self {
        Self::new()
    }
}

impl KubectlCommands {
    pub fn new() -> Self {
        Self {
            kubectl: "kubectl".to_string(),
            context: None,
        }
    }

    /// Use a specific kubeconfig context instead of the current one.
    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    fn base_args(&self) -> Vec<String> {
        match &self.context {
            Some(context) => vec!["--context".to_string(), context.clone()],
            None => Vec::new(),
        }
    }

    fn exec(
        &self,
        pod: &Pod,
        container: &Container,
        command: &[&str],
        paths: Vec<String>,
    ) -> CommandOperation {
        let mut args = self.base_args();
        args.extend(
            [
                "exec",
                pod.name.as_str(),
                "--namespace",
                pod.namespace.as_str(),
                "-c",
                container.name.as_str(),
                "--",
            ]
            .iter()
            .chain(command)
            .map(|s| s.to_string()),
        );
        args.extend(paths);
        CommandOperation::new(&self.kubectl, args)
    }

    fn copy(&self, pod: &Pod, container: &Container, host: &str, dest: &str) -> CommandOperation {
        let mut args = self.base_args();
        args.extend([
            "cp".to_string(),
            host.to_string(),
            format!("{}/{}:{}", pod.namespace, pod.name, dest),
            "-c".to_string(),
            container.name.clone(),
        ]);
        CommandOperation::new(&self.kubectl, args)
    }

    /// Build the operations for one container, in execution order.
    pub fn operations(
        &self,
        pod: &Pod,
        container: &Container,
        plan: &SyncPlan,
    ) -> Vec<CommandOperation> {
        let mut operations = Vec::new();

        if !plan.copy.is_empty() {
            let parents: BTreeSet<String> = plan
                .copy
                .iter()
                .flat_map(|entry| &entry.destinations)
                .filter_map(|dest| NormalizedPath::new(dest).parent())
                .map(|parent| parent.to_string())
                .collect();
            if !parents.is_empty() {
                let parents = parents.into_iter().collect();
                operations.push(self.exec(pod, container, &["mkdir", "-p"], parents));
            }

            for entry in &plan.copy {
                for dest in &entry.destinations {
                    operations.push(self.copy(pod, container, &entry.host, dest));
                }
            }
        }

        if !plan.delete.is_empty() {
            let targets: Vec<String> = plan
                .delete
                .iter()
                .flat_map(|entry| entry.destinations.iter().cloned())
                .collect();
            operations.push(self.exec(pod, container, &["rm", "-rf", "--"], targets));
        }

        operations
    }
}

impl CommandGenerator for KubectlCommands {
    fn commands(
        &self,
        pod: &Pod,
        container: &Container,
        plan: &SyncPlan,
    ) -> Vec<Box<dyn Operation>> {
        self.operations(pod, container, plan)
            .into_iter()
            .map(|op| Box::new(op) as Box<dyn Operation>)
            .collect()
    }
}
