//! Exec command implementation - execute commands in the target container

use crate::cli::ExecArgs;
use crate::client::KubeCluster;
use crate::commands::target::resolve_target;
use crate::config::AppConfig;
use crate::error::{KcError, Result};
use k8s_openapi::api::core::v1::Pod;
use kube::api::AttachParams;
use kube::Api;
use std::fmt;
use std::future::Future;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tracing::debug;

/// Run the exec command
pub async fn run_exec(
    context: Option<&str>,
    namespace: Option<&str>,
    args: &ExecArgs,
    config: &AppConfig,
) -> Result<()> {
    if args.command.is_empty() {
        return Err(KcError::InvalidArgument(
            "No command specified. Use -- followed by the command to execute".to_string(),
        ));
    }

    let cluster = KubeCluster::connect(context).await?;
    let target = resolve_target(&cluster, config, namespace, &args.target).await?;
    debug!("Executing {:?} in {}", args.command, target);

    let api: Api<Pod> = Api::namespaced(cluster.client().clone(), &target.namespace);

    let mut ap = AttachParams::default()
        .stdin(args.stdin)
        .tty(args.tty)
        .stdout(true)
        // kube rejects stderr together with a tty
        .stderr(!args.tty);
    if let Some(container) = target.container_name() {
        ap = ap.container(container);
    }

    let mut attached = api.exec(target.pod_name(), &args.command, &ap).await?;

    let stdout_task = attached
        .stdout()
        .map(|stdout| spawn_pipe(stdout, tokio::io::stdout()));
    let stderr_task = attached
        .stderr()
        .map(|stderr| spawn_pipe(stderr, tokio::io::stderr()));
    let stdin_task = if args.stdin {
        attached
            .stdin()
            .map(|stdin| spawn_pipe(tokio::io::stdin(), stdin))
    } else {
        None
    };

    finish([stdout_task, stderr_task], stdin_task, attached.join()).await
}

/// Wait for the output pipes and the remote process, then stop the stdin pipe.
///
/// stdin stays blocked on a terminal read after the remote side exits, so it
/// is aborted instead of awaited.
async fn finish<F, E>(
    outputs: [Option<JoinHandle<()>>; 2],
    stdin: Option<JoinHandle<()>>,
    process: F,
) -> Result<()>
where
    F: Future<Output = std::result::Result<(), E>>,
    E: fmt::Display,
{
    for task in outputs.into_iter().flatten() {
        task.await.ok();
    }

    let status = process.await;

    if let Some(task) = stdin {
        task.abort();
    }

    status.map_err(|e| KcError::Io(std::io::Error::other(e.to_string())))
}

/// Copy `reader` into `writer` until EOF or the first error
fn spawn_pipe<R, W>(mut reader: R, mut writer: W) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; 4096];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if writer.write_all(&buf[..n]).await.is_err() {
                        break;
                    }
                    writer.flush().await.ok();
                }
            }
        }
    })
}
