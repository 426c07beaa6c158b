pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod step;

use std::sync::Arc;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{FmtSubscriber, filter::LevelFilter};

pub use error::PyshipError;

use crate::confirm::ConfirmationProvider;
use crate::executor::CommandExecutor;
use crate::pipeline::ReleasePipeline;
use crate::step::StepContext;

pub fn init_logging(log_level: cli::LogLevel) -> Result<()> {
    let filter = match log_level {
        cli::LogLevel::Trace => LevelFilter::TRACE,
        cli::LogLevel::Debug => LevelFilter::DEBUG,
        cli::LogLevel::Info => LevelFilter::INFO,
        cli::LogLevel::Warn => LevelFilter::WARN,
        cli::LogLevel::Error => LevelFilter::ERROR,
    };

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(filter).finish(),
    )
    .context("failed to set global default tracing subscriber")
}

/// Resolves the profile path relative to the project directory.
fn profile_path(opts: &cli::ReleaseArgs) -> Utf8PathBuf {
    if opts.file.is_absolute() {
        opts.file.clone()
    } else {
        opts.dir.join(&opts.file)
    }
}

/// Runs the full release pipeline.
///
/// Loads and validates the release profile, checks the project-descriptor
/// precondition, and executes clean → build → check → install →
/// verify-import → publish, halting at the first failure.
pub fn run_release(
    opts: &cli::ReleaseArgs,
    executor: Arc<dyn CommandExecutor>,
    confirm: &dyn ConfirmationProvider,
) -> Result<()> {
    let path = profile_path(opts);
    let profile =
        config::load_profile(&path).with_context(|| format!("failed to load profile from {}", path))?;
    profile.validate().context("profile validation failed")?;

    // Precondition: refuse to run any step outside a Python project root.
    let descriptor = config::find_project_descriptor(&opts.dir)?;
    debug!("found project descriptor: {}", descriptor);

    info!("releasing {} from {}", profile.package, opts.dir);

    let ctx = StepContext {
        project_dir: &opts.dir,
        profile: &profile,
        executor,
        confirm,
        dry_run: opts.dry_run,
    };

    ReleasePipeline::full().run(&ctx)
}

pub fn run_validate(opts: &cli::ValidateArgs) -> Result<()> {
    let profile = config::load_profile(&opts.file)
        .with_context(|| format!("failed to load profile from {}", opts.file))?;
    profile.validate().context("profile validation failed")?;
    info!("validation successful:\n{:#?}", profile);
    Ok(())
}
