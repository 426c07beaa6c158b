//! Release step definitions.
//!
//! This module provides the [`ReleaseStep`] enum — a data-driven
//! abstraction where each variant names *what* the step does, and
//! methods on the enum provide *how* via Rust's exhaustive pattern
//! matching. The fixed release sequence lives in [`ReleaseStep::ORDERED`].
//!
//! Every step is a pure function of an explicit [`StepContext`]: the
//! project directory, the release profile, the command executor, and the
//! confirmation provider are all passed in rather than read from ambient
//! process state, so tests can substitute each seam.

pub mod clean;
pub mod package;
pub mod publish;
pub mod verify;

use std::sync::Arc;

use anyhow::{Context, Result};
use camino::Utf8Path;
use strum::Display;

use crate::config::ReleaseProfile;
use crate::confirm::ConfirmationProvider;
use crate::error::PyshipError;
use crate::executor::{CommandExecutor, CommandSpec, ExecutionResult, format_command_args};

/// Explicit execution context shared by all steps.
pub struct StepContext<'a> {
    /// Root of the Python project being released
    pub project_dir: &'a Utf8Path,
    /// Loaded and validated release profile
    pub profile: &'a ReleaseProfile,
    /// Executor used for all external tool invocations
    pub executor: Arc<dyn CommandExecutor>,
    /// Answers the publish prompt
    pub confirm: &'a dyn ConfirmationProvider,
    /// When true, steps log what they would do without side effects
    pub dry_run: bool,
}

/// One step of the release pipeline.
///
/// The enum dispatch pattern provides compile-time exhaustive matching —
/// adding a new variant causes compilation errors at every unhandled
/// match site, preventing missed implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ReleaseStep {
    /// Remove previous build artifacts
    Clean,
    /// Produce distributable artifacts
    Build,
    /// Validate distribution metadata
    Check,
    /// Editable install into the current environment
    Install,
    /// Import the installed package and read its version
    VerifyImport,
    /// Confirmed upload to the package index
    Publish,
}

impl ReleaseStep {
    /// The fixed release sequence. Steps always execute in this order
    /// and the pipeline halts at the first failure.
    pub const ORDERED: [ReleaseStep; 6] = [
        ReleaseStep::Clean,
        ReleaseStep::Build,
        ReleaseStep::Check,
        ReleaseStep::Install,
        ReleaseStep::VerifyImport,
        ReleaseStep::Publish,
    ];

    /// Returns a human-readable description used in progress logging.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clean => "removing previous build artifacts",
            Self::Build => "building distributable artifacts",
            Self::Check => "checking distribution metadata",
            Self::Install => "installing the package in editable mode",
            Self::VerifyImport => "verifying the installed package imports",
            Self::Publish => "uploading artifacts to the package index",
        }
    }

    /// Executes the step within the given context.
    pub fn execute(&self, ctx: &StepContext) -> Result<()> {
        match self {
            Self::Clean => clean::run(ctx),
            Self::Build => package::build(ctx),
            Self::Check => package::check(ctx),
            Self::Install => package::install(ctx),
            Self::VerifyImport => verify::run(ctx),
            Self::Publish => publish::run(ctx),
        }
    }
}

/// Executes a command and fails the step on a non-zero exit.
///
/// The resulting `Execution` error carries the exit status and the
/// captured standard-error text, so the user sees why the tool failed
/// without scrolling back through the stream.
pub(crate) fn run_checked(
    executor: &Arc<dyn CommandExecutor>,
    spec: &CommandSpec,
) -> Result<ExecutionResult> {
    let result = executor
        .execute(spec)
        .with_context(|| format!("failed to execute {}", spec.command))?;

    if !result.success() {
        let status = result.status.expect("status should be present on failure");
        let stderr = result.stderr.trim();
        let reason = if stderr.is_empty() {
            status.to_string()
        } else {
            format!("{}: {}", status, stderr)
        };
        return Err(PyshipError::Execution {
            command: format!("{} {}", spec.command, format_command_args(&spec.args)),
            status: reason,
        }
        .into());
    }

    Ok(result)
}
