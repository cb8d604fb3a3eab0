//! Read-only pod queries used to resolve a target

use crate::client::create_client;
use crate::error::{KcError, Result};
use crate::resources::{has_image, pod_status, Listable, StatusCategory};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::{Api, Client};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Delay between two polls while waiting for a running pod
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Cluster access needed by the target selector.
///
/// Implementors provide `get_pod` and `list_pods`; the waiting queries are
/// built on top of `list_pods` and poll until their timeout elapses.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Namespace of the active kubeconfig context
    fn default_namespace(&self) -> &str;

    /// Fetch a single pod by name
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod>;

    /// List pods in a namespace, optionally filtered by a label selector
    async fn list_pods(&self, namespace: &str, label_selector: Option<&str>) -> Result<Vec<Pod>>;

    /// Display status of a pod (`Running`, `Init:0/1`, `CrashLoopBackOff`, ...)
    fn pod_status(&self, pod: &Pod) -> String {
        pod_status(pod)
    }

    /// Running pods with a container matching one of `images`, in list
    /// order. Waits while a matching pod is still starting and returns once
    /// none is, or at `timeout` with whatever is running by then.
    async fn running_pods_with_image(
        &self,
        images: &[String],
        namespace: &str,
        timeout: Duration,
    ) -> Result<Vec<Pod>> {
        let deadline = Instant::now() + timeout;

        loop {
            let mut running = Vec::new();
            let mut pending = false;

            for pod in self.list_pods(namespace, None).await? {
                if !has_image(&pod, images) {
                    continue;
                }

                let status = self.pod_status(&pod);
                if status == "Running" {
                    running.push(pod);
                } else if is_starting(&status) {
                    pending = true;
                }
            }

            if !pending || Instant::now() >= deadline {
                debug!(
                    "Found {} running pod(s) with image {} in namespace {}",
                    running.len(),
                    images.join(", "),
                    namespace
                );
                return Ok(running);
            }

            debug!("Waiting for pods with image {} to start", images.join(", "));
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait until the newest non-terminating pod matching `label_selector`
    /// is running and return it.
    async fn newest_running_pod(
        &self,
        label_selector: &str,
        namespace: &str,
        timeout: Duration,
    ) -> Result<Pod> {
        let deadline = Instant::now() + timeout;

        loop {
            let mut pods: Vec<Pod> = self
                .list_pods(namespace, Some(label_selector))
                .await?
                .into_iter()
                .filter(|pod| self.pod_status(pod) != "Terminating")
                .collect();

            pods.sort_by(|a, b| {
                let created = |p: &Pod| p.metadata.creation_timestamp.as_ref().map(|t| t.0);
                created(b).cmp(&created(a))
            });

            if let Some(newest) = pods.into_iter().next() {
                let status = self.pod_status(&newest);
                if status == "Running" {
                    return Ok(newest);
                }
                debug!(
                    "Newest pod {} has status {}, waiting",
                    newest.metadata.name.as_deref().unwrap_or("<unknown>"),
                    status
                );
            }

            if Instant::now() >= deadline {
                return Err(KcError::Timeout(format!(
                    "a running pod with label selector {} in namespace {}",
                    label_selector, namespace
                )));
            }

            sleep(POLL_INTERVAL).await;
        }
    }
}

/// Whether a pod with this status may still become Running
fn is_starting(status: &str) -> bool {
    StatusCategory::of(status) == StatusCategory::Warning
        && !matches!(status, "Terminating" | "Unknown")
}

/// `ClusterClient` backed by a live kube-rs client
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using the given kubeconfig context
    pub async fn connect(context: Option<&str>) -> Result<Self> {
        Ok(Self::new(create_client(context).await?))
    }

    /// Underlying kube client, for streaming logs or exec
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ClusterClient for KubeCluster {
    fn default_namespace(&self) -> &str {
        self.client.default_namespace()
    }

    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get(name).await?)
    }

    async fn list_pods(&self, namespace: &str, label_selector: Option<&str>) -> Result<Vec<Pod>> {
        let api = Pod::api(self.client.clone(), namespace);
        Pod::list_resources(&api, label_selector).await
    }
}
