//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full parse → diff → report pipeline,
//! error handling paths, and the diff command handler with real fixture files.

use swagger_diff::cli::run_diff;
use swagger_diff::config::{DiffConfig, DiffConfigBuilder, Validatable};
use swagger_diff::diff::Changed;
use swagger_diff::pipeline::{
    compute_diff, exit_codes, output_report, parse_spec_with_context, write_output, OutputTarget,
    PipelineError,
};
use swagger_diff::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn release_config() -> DiffConfigBuilder {
    DiffConfigBuilder::new()
        .old_path(fixture_path("petstore-v1.yaml"))
        .new_path(fixture_path("petstore-v2.yaml"))
        .quiet(true)
}

fn self_diff_config() -> DiffConfigBuilder {
    DiffConfigBuilder::new()
        .old_path(fixture_path("petstore-v1.yaml"))
        .new_path(fixture_path("petstore-v1.json"))
        .quiet(true)
}

// ============================================================================
// Pipeline Parse Stage Tests
// ============================================================================

mod parse_stage {
    use super::*;

    #[test]
    fn parse_yaml_fixture() {
        let parsed = parse_spec_with_context(&fixture_path("petstore-v1.yaml"), true)
            .expect("parse should succeed");
        assert_eq!(parsed.spec().endpoint_count(), 4);
        assert!(parsed.source.ends_with("petstore-v1.yaml"));
    }

    #[test]
    fn parse_json_fixture() {
        let spec = parse_spec_with_context(&fixture_path("recursive.json"), true)
            .expect("parse should succeed")
            .into_spec();
        assert_eq!(spec.version(), Some("3.2.0"));
        assert_eq!(spec.definitions.len(), 3);
    }

    #[test]
    fn parse_missing_file_returns_error() {
        let result = parse_spec_with_context(Path::new("/nonexistent/swagger.yaml"), true);
        let msg = format!("{:#}", result.expect_err("missing file should fail"));
        assert!(msg.contains("/nonexistent/swagger.yaml"), "message: {msg}");
    }

    #[test]
    fn parse_openapi3_is_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("openapi.json");
        std::fs::write(&path, r#"{"openapi": "3.0.3", "paths": {}}"#).expect("write temp file");

        let msg = format!(
            "{:#}",
            parse_spec_with_context(&path, true).expect_err("OpenAPI 3 should fail")
        );
        assert!(msg.contains("Failed to parse specification"), "message: {msg}");
    }
}

// ============================================================================
// Pipeline Diff Stage Tests
// ============================================================================

mod diff_stage {
    use super::*;

    fn run(config: &DiffConfig) -> swagger_diff::SpecificationDiffResult {
        let old = parse_spec_with_context(&config.paths.old, true).expect("parse old");
        let new = parse_spec_with_context(&config.paths.new, true).expect("parse new");
        compute_diff(config, old.spec(), new.spec()).expect("diff should succeed")
    }

    #[test]
    fn compute_diff_release() {
        let result = run(&release_config().build().expect("valid config"));
        assert_eq!(result.new_endpoints.len(), 1);
        assert_eq!(result.missing_endpoints.len(), 1);
        assert!(result.has_contract_changes());
        // Extension diffing is off by default
        assert!(!result.extensions.is_diff());
    }

    #[test]
    fn compute_diff_with_extensions() {
        let config = release_config()
            .with_extensions(true)
            .build()
            .expect("valid config");
        let result = run(&config);
        assert!(result.extensions.is_diff());
    }

    #[test]
    fn compute_diff_json_against_yaml() {
        let result = run(&self_diff_config().build().expect("valid config"));
        assert!(!result.has_changes());
        assert!(!result.has_only_cosmetic_changes());
    }
}

// ============================================================================
// Pipeline Report Stage Tests
// ============================================================================

mod report_stage {
    use super::*;

    fn render_to_file(format: ReportFormat, file_name: &str) -> String {
        let dir = tempfile::tempdir().expect("create temp dir");
        let out_path = dir.path().join(file_name);
        let config = release_config()
            .with_extensions(true)
            .output_format(format)
            .output_file(Some(out_path.clone()))
            .build()
            .expect("valid config");

        let old = parse_spec_with_context(&config.paths.old, true).expect("parse old");
        let new = parse_spec_with_context(&config.paths.new, true).expect("parse new");
        let result = compute_diff(&config, old.spec(), new.spec()).expect("diff");
        output_report(&config, &result).expect("report should succeed");

        std::fs::read_to_string(&out_path).expect("read output")
    }

    #[test]
    fn output_report_markdown_to_file() {
        let content = render_to_file(ReportFormat::Markdown, "CHANGELOG.md");
        assert!(content.starts_with("## Version 1.0.0 to 1.1.0"));
        assert!(content.contains("### What's New"));
        assert!(content.contains("/stores"));
        assert!(content.contains("### What's Deprecated"));
        assert!(content.contains("### What's Changed"));
        assert!(content.contains("owner.email"));
    }

    #[test]
    fn output_report_html_to_file() {
        let content = render_to_file(ReportFormat::Html, "changes.html");
        assert!(content.contains("<title>Api Change Log</title>"));
        assert!(content.contains("/stores"));
        assert!(content.contains("x-owner"));
    }

    #[test]
    fn output_report_json_to_file() {
        let content = render_to_file(ReportFormat::Json, "changes.json");
        let json: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");

        assert_eq!(json["summary"]["new_endpoints"], 1);
        assert_eq!(json["summary"]["missing_endpoints"], 1);
        assert_eq!(json["summary"]["has_contract_changes"], true);
        assert_eq!(json["metadata"]["old_spec"]["version"], "1.0.0");
        assert!(json["diff"]["changed_endpoints"].is_array());
    }

    #[test]
    fn output_report_summary_to_file() {
        let content = render_to_file(ReportFormat::Summary, "summary.txt");
        assert!(content.contains("+1 endpoint added"));
        assert!(content.contains("Verdict:  contract changed"));
        assert!(!content.contains('\x1b'), "file output is never colored");
    }

    #[test]
    fn write_output_to_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("out.txt");
        write_output("report body", &OutputTarget::File(path.clone()), true)
            .expect("write should succeed");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "report body");
    }
}

// ============================================================================
// Command Handler Tests
// ============================================================================

mod command_handler {
    use super::*;

    fn run_to_tempfile(builder: DiffConfigBuilder) -> i32 {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = builder
            .output_file(Some(dir.path().join("report.md")))
            .build()
            .expect("valid config");
        assert!(config.is_valid());
        run_diff(config).expect("diff command should succeed")
    }

    #[test]
    fn exit_code_success_without_flags() {
        assert_eq!(run_to_tempfile(release_config()), exit_codes::SUCCESS);
    }

    #[test]
    fn exit_code_contract_change() {
        let code = run_to_tempfile(release_config().fail_on_contract_change(true));
        assert_eq!(code, exit_codes::CONTRACT_CHANGED);
    }

    #[test]
    fn exit_code_any_change() {
        let code = run_to_tempfile(release_config().fail_on_change(true));
        assert_eq!(code, exit_codes::CHANGES_DETECTED);
    }

    #[test]
    fn exit_code_unchanged_with_all_flags() {
        let code = run_to_tempfile(
            self_diff_config()
                .fail_on_contract_change(true)
                .fail_on_change(true),
        );
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    fn missing_input_is_an_error() {
        let config = DiffConfigBuilder::new()
            .old_path(fixture_path("petstore-v1.yaml"))
            .new_path(fixture_path("does-not-exist.yaml"))
            .quiet(true)
            .build()
            .expect("valid config");
        assert!(!config.is_valid());
        assert!(run_diff(config).is_err());
    }

    #[test]
    fn pipeline_error_wraps_source() {
        let err = PipelineError::DiffFailed {
            source: anyhow::anyhow!("cannot diff: old specification is absent"),
        };
        assert!(err.to_string().starts_with("Diff failed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
