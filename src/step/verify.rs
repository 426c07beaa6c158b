//! Import verification step.
//!
//! Imports the freshly installed package in a child interpreter and
//! reads its `__version__` attribute from captured stdout. Failures get
//! their own `Import` error variant so they are distinguishable from
//! ordinary command failures.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

use super::StepContext;
use crate::error::PyshipError;
use crate::executor::CommandSpec;

/// Loose PEP 440 shape: leading release segment, then any combination of
/// pre/post/dev/local-segment characters.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)*([.\-_+!a-zA-Z0-9]*)$").expect("hardcoded regex must compile")
});

pub(crate) fn run(ctx: &StepContext) -> Result<()> {
    let module = ctx.profile.import_module();
    // The module name is validated as a dotted identifier before the
    // pipeline starts, so interpolating it here is safe.
    let snippet = format!("import {m}; print({m}.__version__)", m = module);

    let spec = CommandSpec::new(&ctx.profile.python, vec!["-c".to_string(), snippet])
        .with_cwd(ctx.project_dir.to_owned());

    let result = ctx
        .executor
        .execute(&spec)
        .with_context(|| format!("failed to execute {}", spec.command))?;

    if !result.success() {
        let stderr = result.stderr.trim();
        return Err(PyshipError::Import(format!(
            "failed to import module {}: {}",
            module,
            if stderr.is_empty() { "import raised an error" } else { stderr }
        ))
        .into());
    }

    // Dry-run never executed the interpreter, so there is nothing to parse.
    if result.status.is_none() {
        return Ok(());
    }

    let version = parse_version(&result.stdout).ok_or_else(|| {
        PyshipError::Import(format!(
            "module {} reported no usable __version__ (got {:?})",
            module,
            result.stdout.trim()
        ))
    })?;

    info!("package {} imports cleanly, version {}", ctx.profile.package, version);
    Ok(())
}

/// Extracts the version from captured stdout.
///
/// The interpreter may print warnings before the version line, so the
/// last non-empty line wins.
fn parse_version(stdout: &str) -> Option<String> {
    let line = stdout.lines().rev().map(str::trim).find(|l| !l.is_empty())?;
    VERSION_RE.is_match(line).then(|| line.to_string())
}
