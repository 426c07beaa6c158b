//! Publish step: confirmed upload to the package index.
//!
//! Asks the configured confirmation provider before doing anything. A
//! declined prompt logs a skip and succeeds, so a run that ends with
//! "no thanks" still exits zero.

use anyhow::Result;
use tracing::info;

use super::package::collect_artifacts;
use super::{StepContext, run_checked};
use crate::error::PyshipError;
use crate::executor::CommandSpec;

pub(crate) fn run(ctx: &StepContext) -> Result<()> {
    let prompt = format!("publish {} to the package index?", ctx.profile.package);
    if !ctx.confirm.confirm(&prompt)? {
        info!("skipping upload of {}", ctx.profile.package);
        return Ok(());
    }

    let artifacts = collect_artifacts(ctx)?;
    if artifacts.is_empty() {
        if ctx.dry_run {
            info!("dry run: no artifacts present under {}, skipping upload", ctx.profile.dist_dir);
            return Ok(());
        }
        return Err(PyshipError::Validation(format!(
            "no distributable artifacts found in {}",
            ctx.project_dir.join(&ctx.profile.dist_dir)
        ))
        .into());
    }

    let mut args = vec!["-m".to_string(), "twine".to_string(), "upload".to_string()];
    if let Some(ref repository_url) = ctx.profile.repository_url {
        args.push("--repository-url".to_string());
        args.push(repository_url.clone());
    }
    args.extend(artifacts.iter().map(|p| p.to_string()));

    let spec = CommandSpec::new(&ctx.profile.python, args).with_cwd(ctx.project_dir.to_owned());
    run_checked(&ctx.executor, &spec)?;

    info!("uploaded {} artifact(s) for {}", artifacts.len(), ctx.profile.package);
    Ok(())
}
