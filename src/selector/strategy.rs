//! Deterministic pod resolution strategies

use super::TargetSelector;
use crate::error::{KcError, Result};
use k8s_openapi::api::core::v1::Pod;
use std::fmt;

/// A deterministic way to find the target pod.
///
/// Strategies are tried in [`Strategy::ORDER`]; the first one whose input is
/// set decides, even when it finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Fetch the pod named on the command line
    PodName,
    /// First running pod with a matching container image
    ImageSelector,
    /// Newest running pod matching the label selector
    LabelSelector,
}

impl Strategy {
    pub const ORDER: [Strategy; 3] = [
        Strategy::PodName,
        Strategy::ImageSelector,
        Strategy::LabelSelector,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::PodName => "pod name",
            Strategy::ImageSelector => "image selector",
            Strategy::LabelSelector => "label selector",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TargetSelector<'_> {
    /// Whether the input `strategy` needs is present
    pub fn applies(&self, strategy: Strategy) -> bool {
        match strategy {
            Strategy::PodName => self.pod_name.is_some(),
            Strategy::ImageSelector => !self.image_selector.is_empty(),
            Strategy::LabelSelector => self.label_selector.is_some(),
        }
    }

    /// The strategy that decides this resolution, if any
    pub fn strategy(&self) -> Option<Strategy> {
        Strategy::ORDER.into_iter().find(|s| self.applies(*s))
    }

    /// Run a single strategy. `Ok(None)` means it does not apply or found
    /// no pod.
    pub async fn resolve_with(&self, strategy: Strategy) -> Result<Option<Pod>> {
        let namespace = self.namespace.as_str();

        match strategy {
            Strategy::PodName => {
                let Some(name) = self.pod_name.as_deref() else {
                    return Ok(None);
                };

                let pod = self
                    .cluster
                    .get_pod(namespace, name)
                    .await
                    .map_err(|e| KcError::pod_fetch(namespace, name, e))?;

                // Init:* statuses count as running
                let status = self.cluster.pod_status(&pod);
                if status != "Running" && !status.starts_with("Init") {
                    return Err(KcError::PodNotRunning {
                        name: name.to_string(),
                        status,
                    });
                }

                Ok(Some(pod))
            }
            Strategy::ImageSelector => {
                if self.image_selector.is_empty() {
                    return Ok(None);
                }

                let pods = self
                    .cluster
                    .running_pods_with_image(&self.image_selector, namespace, self.wait_timeout)
                    .await
                    .map_err(|e| KcError::pod_query(namespace, e))?;

                Ok(pods.into_iter().next())
            }
            Strategy::LabelSelector => {
                let Some(label_selector) = self.label_selector.as_deref() else {
                    return Ok(None);
                };

                self.cluster
                    .newest_running_pod(label_selector, namespace, self.wait_timeout)
                    .await
                    .map(Some)
                    .map_err(|e| KcError::pod_query(namespace, e))
            }
        }
    }
}
