//! Shell command implementation - open an interactive shell in the target container

use crate::cli::{ExecArgs, ShellArgs};
use crate::commands::exec::run_exec;
use crate::config::AppConfig;
use crate::error::Result;

/// Run the shell command (wrapper around exec with interactive shell)
pub async fn run_shell(
    context: Option<&str>,
    namespace: Option<&str>,
    args: &ShellArgs,
    config: &AppConfig,
) -> Result<()> {
    let shell = args.shell.as_deref().unwrap_or("/bin/sh");

    let exec_args = ExecArgs {
        target: args.target.clone(),
        command: vec![shell.to_string()],
        tty: true,
        stdin: true,
    };

    run_exec(context, namespace, &exec_args, config).await
}
