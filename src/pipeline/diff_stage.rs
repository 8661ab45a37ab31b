//! Diff computation stage.

use crate::config::DiffConfig;
use crate::diff::{SpecificationDiffEngine, SpecificationDiffResult};
use crate::model::Specification;
use anyhow::{Context, Result};

/// Compare two parsed specifications with the engine options from `config`.
pub fn compute_diff(
    config: &DiffConfig,
    old: &Specification,
    new: &Specification,
) -> Result<SpecificationDiffResult> {
    let quiet = config.behavior.quiet;
    if !quiet {
        tracing::info!("Computing diff...");
    }

    let engine = SpecificationDiffEngine::new().with_extensions(config.diff.with_extensions);
    let result = engine.diff(old, new).context("Failed to compute diff")?;

    if !quiet {
        tracing::info!(
            "Diff complete: {} new, {} missing, {} changed endpoints",
            result.new_endpoints.len(),
            result.missing_endpoints.len(),
            result.changed_endpoints.len()
        );
    }

    Ok(result)
}
