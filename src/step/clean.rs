//! Clean step: remove previous build artifacts.
//!
//! Removes the `build/` directory, the configured dist directory, and
//! any `*.egg-info` entries in the project directory. Absent targets are
//! ignored, so the step is idempotent.

use std::fs;

use anyhow::Result;
use camino::Utf8Path;
use tracing::{debug, info};

use super::StepContext;
use crate::error::PyshipError;

pub(crate) fn run(ctx: &StepContext) -> Result<()> {
    let build_dir = ctx.project_dir.join("build");
    let dist_dir = ctx.project_dir.join(&ctx.profile.dist_dir);

    remove_dir_if_exists(&build_dir, ctx.dry_run)?;
    remove_dir_if_exists(&dist_dir, ctx.dry_run)?;

    for egg_info in find_egg_info_dirs(ctx.project_dir)? {
        remove_dir_if_exists(&egg_info, ctx.dry_run)?;
    }

    Ok(())
}

/// Removes a directory tree, treating an already-absent target as success.
fn remove_dir_if_exists(path: &Utf8Path, dry_run: bool) -> Result<(), PyshipError> {
    if dry_run {
        info!("dry run: would remove {}", path);
        return Ok(());
    }

    match fs::remove_dir_all(path) {
        Ok(()) => {
            info!("removed {}", path);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("already absent: {}", path);
            Ok(())
        }
        Err(e) => Err(PyshipError::io(format!("failed to remove {}", path), e)),
    }
}

/// Lists `*.egg-info` entries directly under the project directory.
fn find_egg_info_dirs(project_dir: &Utf8Path) -> Result<Vec<camino::Utf8PathBuf>, PyshipError> {
    let entries = project_dir
        .read_dir_utf8()
        .map_err(|e| PyshipError::io(format!("failed to read directory: {}", project_dir), e))?;

    let mut matches = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| PyshipError::io(format!("failed to read entry in {}", project_dir), e))?;
        if entry.file_name().ends_with(".egg-info") {
            matches.push(entry.path().to_owned());
        }
    }
    matches.sort();
    Ok(matches)
}
