//! Pipeline orchestrator for executing release steps in order.
//!
//! Control flow is strictly sequential: each step runs to completion
//! before the next starts, no step is retried, and the first failure
//! aborts the whole run.

use anyhow::{Context, Result};
use tracing::info;

use crate::step::{ReleaseStep, StepContext};

/// Ordered sequence of release steps.
pub struct ReleasePipeline {
    steps: Vec<ReleaseStep>,
}

impl ReleasePipeline {
    /// Creates a pipeline over an explicit step sequence.
    pub fn new(steps: Vec<ReleaseStep>) -> Self {
        Self { steps }
    }

    /// Creates the full release pipeline:
    /// clean → build → check → install → verify-import → publish.
    pub fn full() -> Self {
        Self::new(ReleaseStep::ORDERED.to_vec())
    }

    /// Returns true if the pipeline has no steps to execute.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Executes all steps in order, halting at the first failure.
    pub fn run(&self, ctx: &StepContext) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        info!("starting release pipeline with {} step(s)", self.len());

        for (index, step) in self.steps.iter().enumerate() {
            info!("running step {}/{}: {} ({})", index + 1, self.len(), step, step.description());
            step.execute(ctx)
                .with_context(|| format!("step {} failed", step))?;
            info!("step {} completed", step);
        }

        info!("release pipeline completed successfully");
        Ok(())
    }
}
