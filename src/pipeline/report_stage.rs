//! Report generation and output stage.

use super::output::{should_use_color, write_output, OutputTarget};
use crate::config::DiffConfig;
use crate::diff::SpecificationDiffResult;
use crate::reports::{create_reporter, ReportConfig};
use anyhow::{Context, Result};

/// Build the report configuration for a diff run.
#[must_use]
pub fn build_report_config(config: &DiffConfig) -> ReportConfig {
    ReportConfig::default()
        .with_paths(
            config.paths.old.display().to_string(),
            config.paths.new.display().to_string(),
        )
        .with_basic_markdown(config.output.plain_markdown)
}

/// Render the report for `result` in the configured format.
pub fn render_report(config: &DiffConfig, result: &SpecificationDiffResult) -> Result<String> {
    let target = OutputTarget::from_option(config.output.file.clone());
    // Colors only make sense on an interactive stdout
    let use_color = should_use_color(config.output.no_color) && target.is_terminal();

    let reporter = create_reporter(config.output.format, use_color);
    reporter
        .generate(result, &build_report_config(config))
        .with_context(|| format!("Failed to generate {} report", config.output.format))
}

/// Render the report and write it to stdout or the configured file.
pub fn output_report(config: &DiffConfig, result: &SpecificationDiffResult) -> Result<()> {
    let report = render_report(config, result)?;
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&report, &target, config.behavior.quiet)
}
