//! Pod discovery through `kubectl get pods`

use livesync_core::{BoxError, Container, Pod, PodLister};
use serde::Deserialize;

use crate::error::{KubeError, Result};
use crate::subprocess;

#[derive(Debug, Deserialize)]
struct PodList {
    #[serde(default)]
    items: Vec<PodItem>,
}

#[derive(Debug, Deserialize)]
struct PodItem {
    metadata: Metadata,
    #[serde(default)]
    spec: PodSpec,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PodSpec {
    #[serde(default)]
    containers: Vec<ContainerSpec>,
}

#[derive(Debug, Deserialize)]
struct ContainerSpec {
    name: String,
    #[serde(default)]
    image: String,
}

/// Parse `kubectl get pods -o json` output.
///
/// Pods without a namespace in their metadata are attributed to
/// `namespace`.
pub fn parse_pod_list(json: &str, namespace: &str) -> Result<Vec<Pod>> {
    let list: PodList = serde_json::from_str(json).map_err(|e| KubeError::ParseError {
        program: "kubectl".into(),
        message: e.to_string(),
    })?;

    Ok(list
        .items
        .into_iter()
        .map(|item| {
            let containers = item
                .spec
                .containers
                .into_iter()
                .map(|c| Container::new(c.name, c.image))
                .collect();
            Pod::new(
                item.metadata.name,
                item.metadata
                    .namespace
                    .unwrap_or_else(|| namespace.to_string()),
                containers,
            )
        })
        .collect())
}

/// Lists pods by shelling out to kubectl.
#[derive(Debug, Clone)]
pub struct KubectlPodLister {
    kubectl: String,
    context: Option<String>,
}

impl Default for KubectlPodLister {
    fn default() -> Self {
        Self::new()
    }
}

impl KubectlPodLister {
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

    pub fn args(&self, namespace: &str) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(context) = &self.context {
            args.push("--context".to_string());
            args.push(context.clone());
        }
        args.extend(
            ["get", "pods", "--namespace", namespace, "--output", "json"]
                .iter()
                .map(|s| s.to_string()),
        );
        args
    }
}

impl PodLister for KubectlPodLister {
    fn list_pods(&self, namespace: &str) -> std::result::Result<Vec<Pod>, BoxError> {
        let stdout = subprocess::run(&self.kubectl, &self.args(namespace))?;
        let pods = parse_pod_list(&stdout, namespace)?;
        tracing::debug!(namespace, pods = pods.len(), "Listed pods");
        Ok(pods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PODS: &str = r#"{
        "apiVersion": "v1",
        "kind": "List",
        "items": [
            {
                "metadata": {"name": "web-1", "namespace": "staging"},
                "spec": {"containers": [
                    {"name": "web", "image": "gcr.io/k8s/app:abc"},
                    {"name": "proxy", "image": "envoy:1"}
                ]}
            },
            {
                "metadata": {"name": "job-1"},
                "spec": {}
            }
        ]
    }"#;

    #[test]
    fn test_parse_pod_list() {
        let pods = parse_pod_list(PODS, "default").unwrap();
        assert_eq!(
            pods,
            vec![
                Pod::new(
                    "web-1",
                    "staging",
                    vec![
                        Container::new("web", "gcr.io/k8s/app:abc"),
                        Container::new("proxy", "envoy:1"),
                    ]
                ),
                Pod::new("job-1", "default", vec![]),
            ]
        );
    }

    #[test]
    fn test_parse_garbage_is_error() {
        let err = parse_pod_list("not json", "default").unwrap_err();
        assert!(matches!(err, KubeError::ParseError { .. }));
    }

    #[test]
    fn test_args_with_context() {
        let lister = KubectlPodLister::new().with_context(Some("kind-dev".into()));
        assert_eq!(
            lister.args("default"),
            vec![
                "--context", "kind-dev", "get", "pods", "--namespace", "default", "--output",
                "json"
            ]
        );
    }
}
