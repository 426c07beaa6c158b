//! Packaging steps driven through the Python toolchain: build, check,
//! and editable install.

use anyhow::Result;
use camino::Utf8PathBuf;
use tracing::info;

use super::{StepContext, run_checked};
use crate::error::PyshipError;
use crate::executor::CommandSpec;

/// Builds distributable artifacts via `python -m build`.
pub(crate) fn build(ctx: &StepContext) -> Result<()> {
    let spec = CommandSpec::new(
        &ctx.profile.python,
        vec!["-m".to_string(), "build".to_string()],
    )
    .with_cwd(ctx.project_dir.to_owned());

    run_checked(&ctx.executor, &spec)?;
    Ok(())
}

/// Validates distribution metadata via `python -m twine check`.
pub(crate) fn check(ctx: &StepContext) -> Result<()> {
    let artifacts = collect_artifacts(ctx)?;
    if artifacts.is_empty() {
        if ctx.dry_run {
            info!("dry run: no artifacts present under {}, skipping check", ctx.profile.dist_dir);
            return Ok(());
        }
        return Err(PyshipError::Validation(format!(
            "no distributable artifacts found in {}",
            ctx.project_dir.join(&ctx.profile.dist_dir)
        ))
        .into());
    }

    let mut args = vec!["-m".to_string(), "twine".to_string(), "check".to_string()];
    args.extend(artifacts.iter().map(|p| p.to_string()));

    let spec = CommandSpec::new(&ctx.profile.python, args).with_cwd(ctx.project_dir.to_owned());
    run_checked(&ctx.executor, &spec)?;

    info!("checked {} artifact(s)", artifacts.len());
    Ok(())
}

/// Installs the package into the current environment in editable mode.
///
/// The editable install is deliberately left in place if a later step
/// fails; there is no rollback.
pub(crate) fn install(ctx: &StepContext) -> Result<()> {
    let spec = CommandSpec::new(
        &ctx.profile.python,
        vec![
            "-m".to_string(),
            "pip".to_string(),
            "install".to_string(),
            "-e".to_string(),
            ".".to_string(),
        ],
    )
    .with_cwd(ctx.project_dir.to_owned())
    .with_env("PIP_DISABLE_PIP_VERSION_CHECK", "1");

    run_checked(&ctx.executor, &spec)?;
    Ok(())
}

/// Enumerates distributable artifacts under the dist directory.
///
/// Results are sorted so tool invocations are deterministic. Replaces
/// the `dist/*` shell glob with an explicit listing; no shell is involved
/// anywhere in the pipeline.
pub(crate) fn collect_artifacts(ctx: &StepContext) -> Result<Vec<Utf8PathBuf>, PyshipError> {
    let dist_dir = ctx.project_dir.join(&ctx.profile.dist_dir);

    let entries = match dist_dir.read_dir_utf8() {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(PyshipError::io(format!("failed to read dist directory: {}", dist_dir), e));
        }
    };

    let mut artifacts = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| PyshipError::io(format!("failed to read entry in {}", dist_dir), e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| PyshipError::io(format!("failed to read metadata: {}", entry.path()), e))?;
        if file_type.is_file() {
            artifacts.push(entry.path().to_owned());
        }
    }
    artifacts.sort();
    Ok(artifacts)
}
