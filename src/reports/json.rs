//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::SpecificationDiffResult;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Whether to only include summary
    summary_only: bool,
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            summary_only: false,
            pretty: true,
        }
    }

    /// Create a summary-only reporter
    #[must_use]
    pub const fn summary_only() -> Self {
        Self {
            summary_only: true,
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(
        &self,
        result: &SpecificationDiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME"),
                    version: &config.metadata.tool_version,
                },
                generated_at: config
                    .metadata
                    .generated_at
                    .clone()
                    .unwrap_or_else(|| Utc::now().to_rfc3339()),
                old_spec: SpecInfo {
                    file_path: config.metadata.old_spec_path.as_deref(),
                    version: result.old_version.as_deref(),
                },
                new_spec: SpecInfo {
                    file_path: config.metadata.new_spec_path.as_deref(),
                    version: result.new_version.as_deref(),
                },
            },
            summary: JsonSummary::from_result(result),
            diff: if self.summary_only { None } else { Some(result) },
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }?;

        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures for serialization

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata<'a>,
    summary: JsonSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    diff: Option<&'a SpecificationDiffResult>,
}

#[derive(Serialize)]
struct JsonReportMetadata<'a> {
    tool: ToolInfo<'a>,
    generated_at: String,
    old_spec: SpecInfo<'a>,
    new_spec: SpecInfo<'a>,
}

#[derive(Serialize)]
struct ToolInfo<'a> {
    name: &'static str,
    version: &'a str,
}

#[derive(Serialize)]
struct SpecInfo<'a> {
    file_path: Option<&'a str>,
    version: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonSummary {
    new_endpoints: usize,
    missing_endpoints: usize,
    changed_endpoints: usize,
    changed_operations: usize,
    has_changes: bool,
    has_contract_changes: bool,
    has_only_cosmetic_changes: bool,
}

impl JsonSummary {
    fn from_result(result: &SpecificationDiffResult) -> Self {
        Self {
            new_endpoints: result.new_endpoints.len(),
            missing_endpoints: result.missing_endpoints.len(),
            changed_endpoints: result.changed_endpoints.len(),
            changed_operations: result.changed_operation_count(),
            has_changes: result.has_changes(),
            has_contract_changes: result.has_contract_changes(),
            has_only_cosmetic_changes: result.has_only_cosmetic_changes(),
        }
    }
}
