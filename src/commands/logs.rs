//! Logs command implementation

use crate::cli::LogsArgs;
use crate::client::KubeCluster;
use crate::commands::target::resolve_target;
use crate::config::AppConfig;
use crate::error::{KcError, Result};
use futures::{AsyncBufReadExt, TryStreamExt};
use k8s_openapi::api::core::v1::Pod;
use kube::api::LogParams;
use kube::Api;
use std::io::Write;
use tracing::debug;

/// Run the logs command
pub async fn run_logs(
    context: Option<&str>,
    namespace: Option<&str>,
    args: &LogsArgs,
    config: &AppConfig,
) -> Result<()> {
    let cluster = KubeCluster::connect(context).await?;
    let target = resolve_target(&cluster, config, namespace, &args.target).await?;
    debug!("Showing logs of {}", target);

    let api: Api<Pod> = Api::namespaced(cluster.client().clone(), &target.namespace);
    let lp = log_params(args, target.container_name())?;

    if args.follow {
        stream_logs(&api, target.pod_name(), &lp).await
    } else {
        let logs = api.logs(target.pod_name(), &lp).await?;
        print!("{}", logs);
        Ok(())
    }
}

fn log_params(args: &LogsArgs, container: Option<&str>) -> Result<LogParams> {
    let mut lp = LogParams {
        container: container.map(String::from),
        tail_lines: Some(args.tail),
        follow: args.follow,
        timestamps: args.timestamps,
        previous: args.previous,
        ..Default::default()
    };

    if let Some(since) = &args.since {
        lp.since_seconds = Some(parse_duration_to_seconds(since)?);
    }

    Ok(lp)
}

/// Stream logs to stdout
async fn stream_logs(api: &Api<Pod>, pod_name: &str, params: &LogParams) -> Result<()> {
    let mut stream = api.log_stream(pod_name, params).await?.lines();

    while let Some(line) = stream.try_next().await? {
        println!("{}", line);
        std::io::stdout().flush().ok();
    }

    Ok(())
}

/// Parse a duration such as "1h", "30m", "10s" or "1h30m" to seconds
fn parse_duration_to_seconds(s: &str) -> Result<i64> {
    let s = s.trim();
    if s.is_empty() {
        return Err(KcError::InvalidArgument("Empty duration".to_string()));
    }

    // humantime needs a unit on every number, so "90" is read as seconds here
    if let Ok(seconds) = s.parse::<i64>() {
        return positive(seconds, s);
    }

    let duration = humantime::parse_duration(s)
        .map_err(|e| KcError::InvalidArgument(format!("Invalid duration {}: {}", s, e)))?;

    positive(duration.as_secs() as i64, s)
}

fn positive(seconds: i64, input: &str) -> Result<i64> {
    if seconds <= 0 {
        return Err(KcError::InvalidArgument(format!(
            "Duration must be greater than 0: {}",
            input
        )));
    }
    Ok(seconds)
}
