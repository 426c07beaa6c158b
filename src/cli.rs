use anyhow::Result;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    args_conflicts_with_subcommands = true,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// A bare `pyship` invocation runs the full pipeline with these args.
    #[command(flatten)]
    pub release: ReleaseArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full release pipeline (same as invoking with no subcommand)
    Release(ReleaseArgs),

    /// Validate the given YAML release profile without running any step
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ReleaseArgs {
    /// Path to the YAML release profile, resolved relative to the project directory
    #[arg(short, long, default_value = "release.yaml")]
    pub file: Utf8PathBuf,

    /// Project directory containing the package to release
    #[arg(short, long, default_value = ".")]
    pub dir: Utf8PathBuf,

    /// Set the log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Do not run, just show what would be done
    #[arg(long)]
    pub dry_run: bool,

    /// Assume an affirmative answer to the publish prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the YAML release profile to validate
    #[arg(short, long, default_value = "release.yaml")]
    pub file: Utf8PathBuf,

    /// Set the log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

/// Represents log levels for controlling the verbosity of logging output.
///
/// This enum maps directly to the log levels used by the `tracing` crate:
/// - `Trace`: Designates very detailed application-level information.
/// - `Debug`: Designates information useful for debugging.
/// - `Info`: Designates general operational messages.
/// - `Warn`: Designates potentially harmful situations.
/// - `Error`: Designates error events that might still allow the application to continue running.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

pub fn parse_args() -> Result<Cli> {
    Ok(Cli::parse())
}
