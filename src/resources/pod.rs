//! Pod resource implementation

use crate::error::Result;
use crate::resources::{Execable, KubeResource, Listable, Tabular};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{ContainerStatus, Pod};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::ListParams;
use kube::{Api, Client};

impl KubeResource for Pod {
    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }
}

#[async_trait]
impl Listable for Pod {
    fn api(client: Client, namespace: &str) -> Api<Self> {
        Api::namespaced(client, namespace)
    }

    async fn list_resources(api: &Api<Self>, label_selector: Option<&str>) -> Result<Vec<Self>> {
        let mut lp = ListParams::default();
        if let Some(ls) = label_selector {
            lp = lp.labels(ls);
        }

        let list = api.list(&lp).await?;
        Ok(list.items)
    }
}

impl Tabular for Pod {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "READY", "STATUS", "RESTARTS", "AGE"]
    }

    fn headers_wide() -> Vec<&'static str> {
        vec!["NAME", "READY", "STATUS", "RESTARTS", "AGE", "CONTAINERS", "IMAGES"]
    }

    fn row(&self) -> Vec<String> {
        let (ready, total) = ready_containers(self);

        vec![
            self.name().to_string(),
            format!("{}/{}", ready, total),
            pod_status(self),
            restart_count(self).to_string(),
            self.age(),
        ]
    }

    fn row_wide(&self) -> Vec<String> {
        let mut row = self.row();
        row.push(self.containers().join(","));
        row.push(images(self).join(","));
        row
    }

    fn status_for_color(&self) -> Option<String> {
        Some(pod_status(self))
    }
}

impl Execable for Pod {
    fn containers(&self) -> Vec<String> {
        self.spec
            .as_ref()
            .map(|s| s.containers.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }
}

/// Compute the pod status the way `kubectl get pods` displays it.
///
/// Deleted pods report `Terminating`. While init containers run the status is
/// `Init:<reason>` or `Init:<done>/<total>`. Otherwise the first container
/// with a waiting or terminated reason wins, falling back to the pod phase.
pub fn pod_status(pod: &Pod) -> String {
    let status = pod.status.as_ref();

    let mut reason = status
        .and_then(|s| s.reason.clone())
        .filter(|r| !r.is_empty())
        .or_else(|| status.and_then(|s| s.phase.clone()))
        .unwrap_or_else(|| "Unknown".to_string());

    let init_statuses: &[ContainerStatus] = status
        .and_then(|s| s.init_container_statuses.as_deref())
        .unwrap_or(&[]);
    let init_total = pod
        .spec
        .as_ref()
        .and_then(|s| s.init_containers.as_ref())
        .map(|c| c.len())
        .unwrap_or(init_statuses.len());

    let mut initializing = false;
    for (i, cs) in init_statuses.iter().enumerate() {
        let state = cs.state.as_ref();

        if let Some(terminated) = state.and_then(|s| s.terminated.as_ref()) {
            if terminated.exit_code == 0 {
                continue;
            }
            reason = match terminated.reason.as_deref() {
                Some(r) if !r.is_empty() => format!("Init:{}", r),
                _ => match terminated.signal {
                    Some(signal) if signal != 0 => format!("Init:Signal:{}", signal),
                    _ => format!("Init:ExitCode:{}", terminated.exit_code),
                },
            };
        } else if let Some(waiting) = state
            .and_then(|s| s.waiting.as_ref())
            .and_then(|w| w.reason.as_deref())
            .filter(|r| !r.is_empty() && *r != "PodInitializing")
        {
            reason = format!("Init:{}", waiting);
        } else {
            reason = format!("Init:{}/{}", i, init_total);
        }

        initializing = true;
        break;
    }

    if !initializing {
        let statuses: &[ContainerStatus] = status
            .and_then(|s| s.container_statuses.as_deref())
            .unwrap_or(&[]);

        for cs in statuses.iter().rev() {
            let Some(state) = cs.state.as_ref() else {
                continue;
            };

            if let Some(waiting) = state
                .waiting
                .as_ref()
                .and_then(|w| w.reason.as_deref())
                .filter(|r| !r.is_empty())
            {
                reason = waiting.to_string();
            } else if let Some(terminated) = &state.terminated {
                reason = match terminated.reason.as_deref() {
                    Some(r) if !r.is_empty() => r.to_string(),
                    _ => match terminated.signal {
                        Some(signal) if signal != 0 => format!("Signal:{}", signal),
                        _ => format!("ExitCode:{}", terminated.exit_code),
                    },
                };
            }
        }
    }

    if pod.metadata.deletion_timestamp.is_some() {
        return "Terminating".to_string();
    }

    reason
}

/// Whether any container of the pod runs one of the given images
pub fn has_image(pod: &Pod, selectors: &[String]) -> bool {
    images(pod)
        .iter()
        .any(|image| selectors.iter().any(|s| image_matches(image, s)))
}

/// Match a container image against an image selector.
///
/// A selector carrying a tag or digest must equal the image. A bare
/// repository matches every tag and digest of that repository.
pub fn image_matches(image: &str, selector: &str) -> bool {
    if image == selector {
        return true;
    }

    let repository = strip_tag(selector);
    if repository != selector {
        return false;
    }

    strip_tag(image) == repository
}

/// Strip the tag and digest from an image reference, keeping registry ports
fn strip_tag(image: &str) -> &str {
    let image = image.split('@').next().unwrap_or(image);
    let name_start = image.rfind('/').map(|i| i + 1).unwrap_or(0);

    match image[name_start..].rfind(':') {
        Some(i) => &image[..name_start + i],
        None => image,
    }
}

fn images(pod: &Pod) -> Vec<String> {
    pod.spec
        .as_ref()
        .map(|s| s.containers.iter().filter_map(|c| c.image.clone()).collect())
        .unwrap_or_default()
}

/// Get ready container count and total container count
fn ready_containers(pod: &Pod) -> (i32, i32) {
    let total = pod
        .spec
        .as_ref()
        .map(|s| s.containers.len() as i32)
        .unwrap_or(0);

    let ready = pod
        .status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref())
        .map(|cs| cs.iter().filter(|c| c.ready).count() as i32)
        .unwrap_or(0);

    (ready, total)
}

/// Get total restart count across all containers
fn restart_count(pod: &Pod) -> i32 {
    pod.status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref())
        .map(|cs| cs.iter().map(|c| c.restart_count).sum())
        .unwrap_or(0)
}
