//! Core traits for Kubernetes resources

use crate::error::Result;
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::{Api, Client, Resource};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Core trait that the targeted Kubernetes resources implement
pub trait KubeResource:
    Clone + Debug + DeserializeOwned + Serialize + Send + Sync + Resource + 'static
{
    /// Get object metadata
    fn metadata(&self) -> &ObjectMeta;

    /// Get the resource name
    fn name(&self) -> &str {
        self.metadata()
            .name
            .as_deref()
            .unwrap_or("<unknown>")
    }

    /// Get the resource namespace (if namespaced)
    fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }

    /// Get the creation timestamp as a human-readable age string
    fn age(&self) -> String {
        self.metadata()
            .creation_timestamp
            .as_ref()
            .map(|ts| humanize_duration(ts.0))
            .unwrap_or_else(|| "<unknown>".to_string())
    }
}

/// Trait for resources that can be listed
#[async_trait]
pub trait Listable: KubeResource {
    /// Create a kube Api handle for this resource
    fn api(client: Client, namespace: &str) -> Api<Self>
    where
        Self: Sized;

    /// List resources with optional label selector
    async fn list_resources(api: &Api<Self>, label_selector: Option<&str>) -> Result<Vec<Self>>
    where
        Self: Sized;
}

/// Trait for resources that have a meaningful table display
pub trait Tabular: KubeResource {
    /// Column headers for table output
    fn headers() -> Vec<&'static str>;

    /// Wide column headers (additional columns for -o wide)
    fn headers_wide() -> Vec<&'static str> {
        Self::headers()
    }

    /// Row values for table output
    fn row(&self) -> Vec<String>;

    /// Wide row values
    fn row_wide(&self) -> Vec<String> {
        self.row()
    }

    /// Get the status for coloring (e.g., "Running", "Pending", "Failed")
    fn status_for_color(&self) -> Option<String> {
        None
    }
}

/// Trait for resources whose containers can be targeted
pub trait Execable: KubeResource {
    /// Container names in declaration order
    fn containers(&self) -> Vec<String>;
}

/// Convert a chrono DateTime to a human-readable duration string
pub fn humanize_duration(time: chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let duration = now.signed_duration_since(time);

    if duration.num_days() > 0 {
        format!("{}d", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m", duration.num_minutes())
    } else {
        format!("{}s", duration.num_seconds().max(0))
    }
}

/// Display category of a pod status, used for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Healthy,
    Warning,
    Error,
    Unknown,
}

impl StatusCategory {
    /// Classify a status as printed by [`crate::resources::pod_status`]
    pub fn of(status: &str) -> Self {
        // Init:CrashLoopBackOff and friends share the classification of their reason
        let reason = status.strip_prefix("Init:").unwrap_or(status);

        match reason {
            "Running" | "Succeeded" | "Completed" if reason == status => StatusCategory::Healthy,
            "Failed" | "Error" | "CrashLoopBackOff" | "ImagePullBackOff" | "ErrImagePull"
            | "CreateContainerConfigError" | "InvalidImageName" | "OOMKilled" => {
                StatusCategory::Error
            }
            r if r.starts_with("ExitCode:") || r.starts_with("Signal:") => StatusCategory::Error,
            _ if reason != status => StatusCategory::Warning,
            "Pending" | "ContainerCreating" | "PodInitializing" | "Terminating" | "Unknown" => {
                StatusCategory::Warning
            }
            _ => StatusCategory::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_category_of() {
        assert_eq!(StatusCategory::of("Running"), StatusCategory::Healthy);
        assert_eq!(StatusCategory::of("CrashLoopBackOff"), StatusCategory::Error);
        assert_eq!(StatusCategory::of("Init:0/2"), StatusCategory::Warning);
        assert_eq!(StatusCategory::of("Init:CrashLoopBackOff"), StatusCategory::Error);
        assert_eq!(StatusCategory::of("ExitCode:137"), StatusCategory::Error);
        assert_eq!(StatusCategory::of("Completed"), StatusCategory::Healthy);
        assert_eq!(StatusCategory::of("Evicted"), StatusCategory::Unknown);
    }

    #[test]
    fn test_humanize_duration() {
        let two_hours_ago = chrono::Utc::now() - chrono::Duration::hours(2);
        assert_eq!(humanize_duration(two_hours_ago), "2h");

        let three_days_ago = chrono::Utc::now() - chrono::Duration::days(3);
        assert_eq!(humanize_duration(three_days_ago), "3d");
    }
}
