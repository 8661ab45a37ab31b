//! Report generation for diff results.
//!
//! This module provides multiple output formats for specification diffs:
//! - Markdown: changelog layout, optionally without emphasis markers
//! - HTML: standalone change log page
//! - JSON: structured data for programmatic integration
//! - Summary: compact shell-friendly output
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! All document-controlled data (paths, summaries, descriptions, extension
//! keys) is escaped before embedding in HTML or Markdown reports.

pub mod escape;
mod html;
mod json;
mod markdown;
mod summary;
mod types;

pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::diff::SpecificationDiffResult;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a diff result.
    fn generate(
        &self,
        result: &SpecificationDiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write a rendered report to a writer
    fn write_report(
        &self,
        result: &SpecificationDiffResult,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(result, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a reporter for the given format.
///
/// `use_color` only affects formats that emit ANSI sequences (summary).
#[must_use]
pub fn create_reporter(format: ReportFormat, use_color: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Summary => {
            let reporter = SummaryReporter::new();
            if use_color {
                Box::new(reporter)
            } else {
                Box::new(reporter.no_color())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::diff::{
        ChangedEndpoint, ChangedExtensionGroup, ChangedOperation, ChangedParameter, ElProperty,
        Endpoint, ExtensionChange, SpecificationDiffResult, INFO_GROUP,
    };
    use crate::model::{HttpMethod, Operation, Parameter, ParameterLocation, Property};
    use serde_json::json;

    /// A result touching every report section.
    pub(crate) fn sample_result() -> SpecificationDiffResult {
        let mut result = SpecificationDiffResult::new();
        result.old_version = Some("1.0.0".to_string());
        result.new_version = Some("1.1.0".to_string());

        result.new_endpoints.push(Endpoint::new(
            "/stores",
            HttpMethod::Get,
            &Operation::default().with_summary("List stores"),
        ));
        result.missing_endpoints.push(Endpoint::new(
            "/pets/{id}",
            HttpMethod::Delete,
            &Operation::default().with_summary("Delete a pet"),
        ));

        result
            .extensions
            .increased
            .insert("x-audience".to_string(), json!("public"));
        let mut info = ChangedExtensionGroup::new();
        info.changed.insert(
            "x-owner".to_string(),
            ExtensionChange {
                old: json!("team-a"),
                new: json!("team-b"),
            },
        );
        result.extensions.put_sub_group(INFO_GROUP, info);

        let limit = Parameter::new("limit", ParameterLocation::Query).with_type("integer");
        let mut changed_limit = ChangedParameter::new(limit.clone(), limit.with_required(true));
        changed_limit.is_change_required = true;

        let mut operation = ChangedOperation {
            summary: Some("List pets".to_string()),
            ..ChangedOperation::default()
        };
        operation.add_parameters.push(
            Parameter::new("sort", ParameterLocation::Query).with_description("Sort order"),
        );
        operation
            .missing_parameters
            .push(Parameter::new("offset", ParameterLocation::Query));
        operation.changed_parameters.push(changed_limit);
        operation.add_props.push(ElProperty::new(
            "owner.email",
            Some("Owner".to_string()),
            Property::typed("string"),
        ));
        operation.missing_props.push(ElProperty::new(
            "tag",
            Some("Pet".to_string()),
            Property::typed("string"),
        ));

        let mut endpoint = ChangedEndpoint::new("/pets");
        endpoint
            .changed_operations
            .insert(HttpMethod::Get, operation);
        result.changed_endpoints.push(endpoint);

        result.classification.mark_contract();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_returns_requested_format() {
        for format in [
            ReportFormat::Markdown,
            ReportFormat::Html,
            ReportFormat::Json,
            ReportFormat::Summary,
        ] {
            assert_eq!(create_reporter(format, false).format(), format);
        }
    }

    #[test]
    fn test_write_report_to_buffer() {
        let reporter = create_reporter(ReportFormat::Markdown, false);
        let mut buffer = Vec::new();
        reporter
            .write_report(
                &SpecificationDiffResult::new(),
                &ReportConfig::default(),
                &mut buffer,
            )
            .expect("write to buffer");
        let text = String::from_utf8(buffer).expect("utf8");
        assert!(text.starts_with("## Version"));
    }
}
