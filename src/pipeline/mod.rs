//! Pipeline orchestration for specification diffs.
//!
//! Shared parse → diff → report logic, kept out of the CLI handlers so it can
//! be driven from tests.

mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::compute_diff;
pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::{parse_spec_with_context, ParsedSpec};
pub use report_stage::{build_report_config, output_report, render_report};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a specification file
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        source: anyhow::Error,
    },

    /// Diff computation failed
    #[error("Diff failed: {source}")]
    DiffFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected, or no failure flag requested
    pub const SUCCESS: i32 = 0;
    /// Changes were detected (`--fail-on-change`)
    pub const CHANGES_DETECTED: i32 = 1;
    /// A contract-breaking change was detected (`--fail-on-contract-change`)
    pub const CONTRACT_CHANGED: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHANGES_DETECTED, 1);
        assert_eq!(exit_codes::CONTRACT_CHANGED, 2);
        assert_eq!(exit_codes::ERROR, 3);
    }

    #[test]
    fn test_pipeline_error_display() {
        let err = PipelineError::ParseFailed {
            path: "v2.yaml".to_string(),
            source: anyhow::anyhow!("missing swagger field"),
        };
        assert_eq!(
            err.to_string(),
            "Parse failed for v2.yaml: missing swagger field"
        );
    }
}
