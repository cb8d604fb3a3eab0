//! kubetarget (kt) - run dev commands against the right pod and container

use anyhow::Result;
use clap::Parser;
use kubetarget::cli::{Cli, Command};
use kubetarget::{commands, config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let app_config = config::load_config()?;

    if cli.no_color || !app_config.colors {
        owo_colors::set_override(false);
    }

    let context = cli.context.as_deref();
    let namespace = cli.namespace.as_deref();

    let result = match cli.command {
        Command::Pods(ref args) => {
            commands::list_pods(context, namespace, args, &app_config, cli.output).await
        }
        Command::Target(ref args) => {
            commands::run_target(context, namespace, args, &app_config, cli.output).await
        }
        Command::Logs(ref args) => commands::run_logs(context, namespace, args, &app_config).await,
        Command::Exec(ref args) => commands::run_exec(context, namespace, args, &app_config).await,
        Command::Shell(ref args) => {
            commands::run_shell(context, namespace, args, &app_config).await
        }
        Command::Completions(ref args) => {
            generate_completions(args.shell);
            Ok(())
        }
    };

    // Exit explicitly: an aborted exec stdin pipe leaves a blocking terminal
    // read that would hold up runtime shutdown
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "kt", &mut std::io::stdout());
}
