//! Target selection: decide which pod and container a command acts on
//!
//! A [`TargetSelector`] first tries the deterministic [`Strategy`]s in order
//! (explicit pod name, image selector, label selector). When none of them
//! yields a pod, or the user forced `--pick`, it falls back to asking the
//! user, provided interactive selection is allowed for the command.

mod params;
mod prompt;
mod strategy;

pub use params::{CmdParameter, SelectorParameter};
pub use prompt::{DialoguerPrompt, Prompt};
pub use strategy::Strategy;

use crate::client::ClusterClient;
use crate::config::AppConfig;
use crate::error::{KcError, Result};
use crate::resources::KubeResource;
use k8s_openapi::api::core::v1::{Container, Pod};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default question for selecting a pod
pub const DEFAULT_POD_QUESTION: &str = "Select a pod";

/// Default question for selecting a container
pub const DEFAULT_CONTAINER_QUESTION: &str = "Select a container";

/// Selects a target pod or container
pub struct TargetSelector<'a> {
    pod_question: Option<String>,
    container_question: Option<String>,

    namespace: String,
    pick: bool,

    label_selector: Option<String>,
    image_selector: Vec<String>,
    pod_name: Option<String>,
    container_name: Option<String>,

    allow_pick: bool,
    wait_timeout: Duration,

    cluster: &'a dyn ClusterClient,
    prompt: Box<dyn Prompt + 'a>,
}

impl<'a> TargetSelector<'a> {
    /// Create a target selector.
    ///
    /// Namespace and label selector are resolved here; their errors are
    /// returned unchanged. `pick` only takes effect when `allow_pick` is set.
    pub fn new(
        config: &AppConfig,
        cluster: &'a dyn ClusterClient,
        params: &SelectorParameter,
        allow_pick: bool,
        image_selector: Vec<String>,
    ) -> Result<Self> {
        let namespace = params.namespace(config, cluster)?;
        let label_selector = params.label_selector(config)?;

        Ok(Self {
            pod_question: config.pod_question.clone(),
            container_question: config.container_question.clone(),
            namespace,
            pick: allow_pick && params.pick(),
            label_selector,
            image_selector,
            pod_name: params.pod_name(),
            container_name: params.container_name(config)?,
            allow_pick,
            wait_timeout: config.wait_timeout(),
            cluster,
            prompt: Box::new(DialoguerPrompt),
        })
    }

    /// Use a different prompt for interactive selection
    pub fn with_prompt(mut self, prompt: impl Prompt + 'a) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn with_pod_question(mut self, question: impl Into<String>) -> Self {
        self.pod_question = Some(question.into());
        self
    }

    pub fn with_container_question(mut self, question: impl Into<String>) -> Self {
        self.container_question = Some(question.into());
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn label_selector(&self) -> Option<&str> {
        self.label_selector.as_deref()
    }

    /// Effective pick flag (forced interactive selection)
    pub fn pick(&self) -> bool {
        self.pick
    }

    pub fn allow_pick(&self) -> bool {
        self.allow_pick
    }

    fn pod_question(&self) -> &str {
        self.pod_question.as_deref().unwrap_or(DEFAULT_POD_QUESTION)
    }

    fn container_question(&self) -> &str {
        self.container_question
            .as_deref()
            .unwrap_or(DEFAULT_CONTAINER_QUESTION)
    }

    /// Resolve the target pod
    pub async fn get_pod(&self) -> Result<Pod> {
        if !self.pick {
            if let Some(strategy) = self.strategy() {
                debug!("Resolving pod in namespace {} by {}", self.namespace, strategy);

                if let Some(pod) = self.resolve_with(strategy).await? {
                    debug!("Selected pod {} by {}", pod.name(), strategy);
                    return Ok(pod);
                }

                info!("No running pod found by {}", strategy);
            }
        }

        if !self.allow_pick {
            return Err(KcError::NoSelectorNoPick {
                namespace: self.namespace.clone(),
            });
        }

        self.select_pod().await?.ok_or_else(|| KcError::NoPodFound {
            namespace: self.namespace.clone(),
        })
    }

    /// Resolve the target pod and, if it has any, one of its containers
    pub async fn get_container(&self) -> Result<(Pod, Option<Container>)> {
        let pod = self.get_pod().await?;

        let containers = pod
            .spec
            .as_ref()
            .map(|s| s.containers.clone())
            .unwrap_or_default();

        let container = match containers.len() {
            0 => None,
            1 => containers.into_iter().next(),
            _ => self.select_container(pod.name(), containers)?,
        };

        Ok((pod, container))
    }

    /// Ask the user for a pod among all pods in the namespace
    async fn select_pod(&self) -> Result<Option<Pod>> {
        let pods = self
            .cluster
            .list_pods(&self.namespace, None)
            .await
            .map_err(|e| KcError::pod_query(&self.namespace, e))?;

        if pods.is_empty() {
            return Err(KcError::NoPodFound {
                namespace: self.namespace.clone(),
            });
        }

        let options: Vec<String> = pods.iter().map(|p| p.name().to_string()).collect();
        let answer = self.prompt.ask(self.pod_question(), &options)?;

        Ok(pods.into_iter().find(|p| p.name() == answer))
    }

    fn select_container(
        &self,
        pod_name: &str,
        containers: Vec<Container>,
    ) -> Result<Option<Container>> {
        if !self.pick {
            if let Some(name) = &self.container_name {
                return containers
                    .into_iter()
                    .find(|c| &c.name == name)
                    .map(Some)
                    .ok_or_else(|| KcError::ContainerNotFound {
                        container: name.clone(),
                        pod: pod_name.to_string(),
                    });
            }
        }

        if !self.allow_pick {
            return Err(KcError::NoContainerNameNoPick {
                pod: pod_name.to_string(),
            });
        }

        let options: Vec<String> = containers.iter().map(|c| c.name.clone()).collect();
        let answer = self.prompt.ask(self.container_question(), &options)?;

        let selected = containers.into_iter().find(|c| c.name == answer);
        if selected.is_none() {
            warn!("Selected container {} is not part of pod {}", answer, pod_name);
        }

        Ok(selected)
    }
}
