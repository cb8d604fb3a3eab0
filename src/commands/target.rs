//! Target command and the target resolution shared by pod commands

use crate::cli::{OutputFormat, TargetArgs};
use crate::client::{ClusterClient, KubeCluster};
use crate::config::AppConfig;
use crate::error::Result;
use crate::resources::KubeResource;
use crate::selector::{CmdParameter, SelectorParameter, TargetSelector};
use k8s_openapi::api::core::v1::{Container, Pod};
use owo_colors::OwoColorize;
use serde_json::json;
use std::fmt;

/// A resolved pod and, if it has one, the chosen container
#[derive(Debug, Clone)]
pub struct Target {
    pub namespace: String,
    pub pod: Pod,
    pub container: Option<Container>,
}

impl Target {
    pub fn pod_name(&self) -> &str {
        self.pod.name()
    }

    pub fn container_name(&self) -> Option<&str> {
        self.container.as_ref().map(|c| c.name.as_str())
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "namespace": self.namespace,
            "pod": self.pod_name(),
            "container": self.container_name(),
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.pod_name())?;
        if let Some(container) = self.container_name() {
            write!(f, ":{}", container)?;
        }
        Ok(())
    }
}

/// Map target flags onto selector command parameters
pub fn cmd_parameter(namespace: Option<&str>, args: &TargetArgs) -> CmdParameter {
    CmdParameter {
        namespace: namespace.map(String::from),
        label_selector: args.label_selector.clone(),
        pod_name: args.pod.clone(),
        container_name: args.container.clone(),
        selector_name: args.selector_name.clone(),
        pick: Some(args.pick),
    }
}

/// Build the target selector for a pod command
pub fn target_selector<'a>(
    cluster: &'a dyn ClusterClient,
    config: &AppConfig,
    namespace: Option<&str>,
    args: &TargetArgs,
) -> Result<TargetSelector<'a>> {
    let params = SelectorParameter::new(cmd_parameter(namespace, args));
    TargetSelector::new(config, cluster, &params, !args.no_pick, args.images.clone())
}

/// Resolve pod and container with a prepared selector
pub async fn resolve(selector: &TargetSelector<'_>) -> Result<Target> {
    let (pod, container) = selector.get_container().await?;
    Ok(Target {
        namespace: selector.namespace().to_string(),
        pod,
        container,
    })
}

/// Resolve the target of a pod command
pub async fn resolve_target(
    cluster: &dyn ClusterClient,
    config: &AppConfig,
    namespace: Option<&str>,
    args: &TargetArgs,
) -> Result<Target> {
    let selector = target_selector(cluster, config, namespace, args)?;
    resolve(&selector).await
}

/// Run the target command
pub async fn run_target(
    context: Option<&str>,
    namespace: Option<&str>,
    args: &TargetArgs,
    config: &AppConfig,
    output: OutputFormat,
) -> Result<()> {
    let cluster = KubeCluster::connect(context).await?;
    let target = resolve_target(&cluster, config, namespace, args).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&target.to_json())?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&target.to_json())?),
        OutputFormat::Name => println!("{}", target),
        OutputFormat::Table | OutputFormat::Wide => {
            println!("{:12} {}", "NAMESPACE".bold(), target.namespace);
            println!("{:12} {}", "POD".bold(), target.pod_name());
            println!(
                "{:12} {}",
                "CONTAINER".bold(),
                target.container_name().unwrap_or("<none>")
            );
        }
    }

    Ok(())
}
