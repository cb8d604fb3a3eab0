// Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use k8s_openapi::api::core::v1::{
    Container, ContainerState, ContainerStateWaiting, ContainerStatus, Pod, PodSpec, PodStatus,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use kube::error::ErrorResponse;
use kubetarget::client::ClusterClient;
use kubetarget::error::{KcError, Result};
use kubetarget::selector::Prompt;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Create a mock Pod for testing
pub fn create_mock_pod(name: &str, namespace: &str, status: &str) -> Pod {
    create_mock_pod_with_age(name, namespace, status, 1)
}

/// Create a mock Pod with specific age
pub fn create_mock_pod_with_age(name: &str, namespace: &str, status: &str, hours_ago: i64) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            creation_timestamp: Some(Time(Utc::now() - ChronoDuration::hours(hours_ago))),
            ..Default::default()
        },
        status: Some(PodStatus {
            phase: Some(status.to_string()),
            ..Default::default()
        }),
        spec: Some(PodSpec {
            containers: vec![Container {
                name: "main".to_string(),
                image: Some("nginx:latest".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }),
    }
}

/// Create a Pending pod whose only init container is still starting
pub fn create_initializing_pod(name: &str, namespace: &str) -> Pod {
    let mut pod = create_mock_pod(name, namespace, "Pending");
    pod.spec.as_mut().unwrap().init_containers = Some(vec![Container {
        name: "migrate".to_string(),
        ..Default::default()
    }]);
    pod.status.as_mut().unwrap().init_container_statuses = Some(vec![ContainerStatus {
        name: "migrate".to_string(),
        state: Some(ContainerState {
            waiting: Some(ContainerStateWaiting {
                reason: Some("PodInitializing".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }]);
    pod
}

/// Replace the containers of a pod with `(name, image)` pairs
pub fn with_containers(mut pod: Pod, containers: &[(&str, &str)]) -> Pod {
    pod.spec.as_mut().unwrap().containers = containers
        .iter()
        .map(|(name, image)| Container {
            name: name.to_string(),
            image: Some(image.to_string()),
            ..Default::default()
        })
        .collect();
    pod
}

/// Set labels on a pod
pub fn with_labels(mut pod: Pod, labels: &[(&str, &str)]) -> Pod {
    pod.metadata.labels = Some(
        labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    );
    pod
}

/// Mark a pod as being deleted
pub fn terminating(mut pod: Pod) -> Pod {
    pod.metadata.deletion_timestamp = Some(Time(Utc::now()));
    pod
}

fn not_found(name: &str) -> KcError {
    KcError::Kube(kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: format!("pods \"{}\" not found", name),
        reason: "NotFound".to_string(),
        code: 404,
    }))
}

fn matches_labels(pod: &Pod, selector: &str) -> bool {
    let labels = pod.metadata.labels.clone().unwrap_or_default();
    selector
        .split(',')
        .filter(|term| !term.is_empty())
        .all(|term| match term.split_once('=') {
            Some((k, v)) => labels.get(k).map(String::as_str) == Some(v),
            None => labels.contains_key(term),
        })
}

/// In-memory cluster. Each list call consumes one snapshot until the last
/// one, which then stays in place.
pub struct FakeCluster {
    default_namespace: String,
    snapshots: Mutex<VecDeque<Vec<Pod>>>,
    fail_lists: bool,
    pub get_calls: Mutex<Vec<String>>,
    pub list_calls: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeCluster {
    pub fn new(pods: Vec<Pod>) -> Self {
        Self::with_snapshots(vec![pods])
    }

    pub fn with_snapshots(snapshots: Vec<Vec<Pod>>) -> Self {
        Self {
            default_namespace: "default".to_string(),
            snapshots: Mutex::new(snapshots.into()),
            fail_lists: false,
            get_calls: Mutex::new(Vec::new()),
            list_calls: Mutex::new(Vec::new()),
        }
    }

    /// A cluster whose list requests fail
    pub fn failing_lists(pods: Vec<Pod>) -> Self {
        Self {
            fail_lists: true,
            ..Self::new(pods)
        }
    }

    pub fn with_default_namespace(mut self, namespace: &str) -> Self {
        self.default_namespace = namespace.to_string();
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.get_calls.lock().unwrap().clone()
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    fn current(&self) -> Vec<Pod> {
        let mut snapshots = self.snapshots.lock().unwrap();
        if snapshots.len() > 1 {
            snapshots.pop_front().unwrap_or_default()
        } else {
            snapshots.front().cloned().unwrap_or_default()
        }
    }
}

#[async_trait]
impl ClusterClient for FakeCluster {
    fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod> {
        self.get_calls
            .lock()
            .unwrap()
            .push(format!("{}/{}", namespace, name));

        self.current()
            .into_iter()
            .find(|p| {
                p.metadata.namespace.as_deref() == Some(namespace)
                    && p.metadata.name.as_deref() == Some(name)
            })
            .ok_or_else(|| not_found(name))
    }

    async fn list_pods(&self, namespace: &str, label_selector: Option<&str>) -> Result<Vec<Pod>> {
        self.list_calls
            .lock()
            .unwrap()
            .push((namespace.to_string(), label_selector.map(String::from)));

        if self.fail_lists {
            return Err(KcError::Io(std::io::Error::other("connection refused")));
        }

        Ok(self
            .current()
            .into_iter()
            .filter(|p| p.metadata.namespace.as_deref() == Some(namespace))
            .filter(|p| label_selector.map_or(true, |ls| matches_labels(p, ls)))
            .collect())
    }
}

/// A question asked through [`ScriptedPrompt`]
#[derive(Debug, Clone, PartialEq)]
pub struct Asked {
    pub question: String,
    pub options: Vec<String>,
}

/// Prompt that replays scripted answers and records every question
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<Asked>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// A prompt that must not be asked anything
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn asked(&self) -> Vec<Asked> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, question: &str, options: &[String]) -> Result<String> {
        self.asked.lock().unwrap().push(Asked {
            question: question.to_string(),
            options: options.to_vec(),
        });

        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| KcError::Prompt(format!("unexpected question: {}", question)))
    }
}
