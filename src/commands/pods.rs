//! Pods command implementation

use crate::cli::{ListArgs, OutputFormat};
use crate::client::{ClusterClient, KubeCluster};
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::{format_json, format_names, format_table, format_yaml};
use crate::selector::{CmdParameter, SelectorParameter};

/// List pods in the namespace targets are resolved in
pub async fn list_pods(
    context: Option<&str>,
    namespace: Option<&str>,
    args: &ListArgs,
    config: &AppConfig,
    output: OutputFormat,
) -> Result<()> {
    let cluster = KubeCluster::connect(context).await?;

    let params = SelectorParameter::new(CmdParameter {
        namespace: namespace.map(String::from),
        ..Default::default()
    });
    let ns = params.namespace(config, &cluster)?;

    let pods = cluster.list_pods(&ns, args.selector.as_deref()).await?;

    let output_str = match output {
        OutputFormat::Table => format_table(&pods, args.wide),
        OutputFormat::Wide => format_table(&pods, true),
        OutputFormat::Json => format_json(&pods, true)?,
        OutputFormat::Yaml => format_yaml(&pods)?,
        OutputFormat::Name => format_names(&pods),
    };

    println!("{}", output_str);
    Ok(())
}
