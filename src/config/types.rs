//! Configuration types for swagger-diff operations.

use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Diff engine options
    pub diff: DiffOptions,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Compare vendor extensions.
    pub const fn with_extensions(mut self, enabled: bool) -> Self {
        self.config.diff.with_extensions = enabled;
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file (None for stdout).
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Render Markdown without emphasis markers.
    pub const fn plain_markdown(mut self, plain: bool) -> Self {
        self.config.output.plain_markdown = plain;
        self
    }

    pub const fn fail_on_contract_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_contract_change = fail;
        self
    }

    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Diff engine options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffOptions {
    /// Compare vendor extensions (`x-*` keys). Any extension difference is a
    /// contract change.
    pub with_extensions: bool,
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Markdown without emphasis markers, with ASCII arrows
    pub plain_markdown: bool,
}

/// Behavior flags for diff operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 2 if a contract-breaking change is detected
    pub fail_on_contract_change: bool,
    /// Exit with code 1 if any change is detected
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for diff operations
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Paths to compare
    pub paths: DiffPaths,
    /// Diff engine options
    pub diff: DiffOptions,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to the old (baseline) specification
    pub old: PathBuf,
    /// Path to the new specification
    pub new: PathBuf,
}

// ============================================================================
// Builder for DiffConfig
// ============================================================================

/// Builder for `DiffConfig`
#[derive(Debug, Default)]
pub struct DiffConfigBuilder {
    old: Option<PathBuf>,
    new: Option<PathBuf>,
    diff: DiffOptions,
    output: OutputConfig,
    behavior: BehaviorConfig,
}

impl DiffConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an application config, typically file settings merged with CLI flags.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            diff: config.diff.clone(),
            output: config.output.clone(),
            behavior: config.behavior.clone(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn old_path(mut self, path: PathBuf) -> Self {
        self.old = Some(path);
        self
    }

    #[must_use]
    pub fn new_path(mut self, path: PathBuf) -> Self {
        self.new = Some(path);
        self
    }

    #[must_use]
    pub const fn with_extensions(mut self, enabled: bool) -> Self {
        self.diff.with_extensions = enabled;
        self
    }

    #[must_use]
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.output.format = format;
        self
    }

    #[must_use]
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.output.file = file;
        self
    }

    #[must_use]
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.output.no_color = no_color;
        self
    }

    #[must_use]
    pub const fn plain_markdown(mut self, plain: bool) -> Self {
        self.output.plain_markdown = plain;
        self
    }

    #[must_use]
    pub const fn fail_on_contract_change(mut self, fail: bool) -> Self {
        self.behavior.fail_on_contract_change = fail;
        self
    }

    #[must_use]
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.behavior.fail_on_change = fail;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.behavior.quiet = quiet;
        self
    }

    pub fn build(self) -> anyhow::Result<DiffConfig> {
        let old = self.old.ok_or_else(|| anyhow::anyhow!("old path is required"))?;
        let new = self.new.ok_or_else(|| anyhow::anyhow!("new path is required"))?;

        Ok(DiffConfig {
            paths: DiffPaths { old, new },
            diff: self.diff,
            output: self.output,
            behavior: self.behavior,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_builder() {
        let config = AppConfig::builder()
            .with_extensions(true)
            .output_format(ReportFormat::Json)
            .fail_on_contract_change(true)
            .build();

        assert!(config.diff.with_extensions);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_contract_change);
        assert!(!config.behavior.fail_on_change);
    }

    #[test]
    fn test_diff_config_builder_requires_paths() {
        assert!(DiffConfigBuilder::new().build().is_err());
        assert!(DiffConfigBuilder::new()
            .old_path(PathBuf::from("v1.yaml"))
            .build()
            .is_err());
    }

    #[test]
    fn test_diff_config_from_app_config() {
        let app = AppConfig::builder()
            .with_extensions(true)
            .plain_markdown(true)
            .quiet(true)
            .build();
        let config = DiffConfigBuilder::from_app_config(&app)
            .old_path(PathBuf::from("v1.yaml"))
            .new_path(PathBuf::from("v2.yaml"))
            .fail_on_change(true)
            .build()
            .expect("paths set");

        assert_eq!(config.paths.old, PathBuf::from("v1.yaml"));
        assert!(config.diff.with_extensions);
        assert!(config.output.plain_markdown);
        assert!(config.behavior.quiet);
        assert!(config.behavior.fail_on_change);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("diff:\n  with_extensions: true\n").expect("valid yaml");
        assert!(config.diff.with_extensions);
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.output.format, ReportFormat::Markdown);
    }
}
