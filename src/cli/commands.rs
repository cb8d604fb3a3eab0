//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "kt",
    version,
    about = "Find the pod and container a dev command should target",
    long_about = None,
)]
pub struct Cli {
    /// Kubernetes context to use
    #[arg(long, global = true, env = "KT_CONTEXT")]
    pub context: Option<String>,

    /// Namespace to use
    #[arg(short = 'n', long, global = true, env = "KT_NAMESPACE")]
    pub namespace: Option<String>,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
    Wide,
    Name,
}

#[derive(Subcommand)]
pub enum Command {
    /// List pods
    #[command(alias = "po")]
    Pods(ListArgs),

    /// Resolve and print the target pod and container
    #[command(alias = "t")]
    Target(TargetArgs),

    /// View logs of the target container
    Logs(LogsArgs),

    /// Execute a command in the target container
    Exec(ExecArgs),

    /// Open an interactive shell in the target container
    Shell(ShellArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Clone)]
pub struct ListArgs {
    /// Filter by labels (key=value)
    #[arg(short = 'l', long)]
    pub selector: Option<String>,

    /// Show wide output with additional columns
    #[arg(short = 'w', long)]
    pub wide: bool,
}

/// Flags that decide which pod and container are targeted
#[derive(Args, Clone, Debug, Default)]
pub struct TargetArgs {
    /// Pod name
    pub pod: Option<String>,

    /// Container name
    #[arg(short = 'c', long)]
    pub container: Option<String>,

    /// Use the newest running pod matching these labels (key=value)
    #[arg(short = 'l', long)]
    pub label_selector: Option<String>,

    /// Use the first running pod with this image (repeatable)
    #[arg(long = "image", value_name = "IMAGE")]
    pub images: Vec<String>,

    /// Use a selector preset from ~/.kt/config.toml
    #[arg(long)]
    pub selector_name: Option<String>,

    /// Always pick pod and container interactively
    #[arg(long, conflicts_with = "no_pick")]
    pub pick: bool,

    /// Never prompt, fail if the target is ambiguous
    #[arg(long)]
    pub no_pick: bool,
}

#[derive(Args)]
pub struct LogsArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Follow log output
    #[arg(short = 'f', long)]
    pub follow: bool,

    /// Number of lines to show from the end
    #[arg(long, default_value = "100")]
    pub tail: i64,

    /// Show logs since duration (e.g., 1h, 30m, 10s)
    #[arg(long)]
    pub since: Option<String>,

    /// Show timestamps
    #[arg(long)]
    pub timestamps: bool,

    /// Include previous container logs
    #[arg(short = 'p', long)]
    pub previous: bool,
}

#[derive(Args)]
pub struct ExecArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Command to execute
    #[arg(last = true)]
    pub command: Vec<String>,

    /// Enable TTY
    #[arg(short = 't', long)]
    pub tty: bool,

    /// Pass stdin
    #[arg(short = 'i', long)]
    pub stdin: bool,
}

#[derive(Args)]
pub struct ShellArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Shell to use
    #[arg(long)]
    pub shell: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
