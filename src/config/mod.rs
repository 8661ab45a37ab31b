//! Configuration module for swagger-diff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use swagger_diff::config::AppConfig;
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .with_extensions(true)
//!     .fail_on_contract_change(true)
//!     .build();
//!
//! // Load from file
//! use swagger_diff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.swagger-diff.yaml` file in your project root or `~/.config/swagger-diff/`:
//!
//! ```yaml
//! diff:
//!   with_extensions: true
//! behavior:
//!   fail_on_contract_change: true
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffConfigBuilder, DiffOptions,
    DiffPaths, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    user_config_dir, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// The schema documents every option a `.swagger-diff.yaml` file can set and
/// can be used by editors for validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        let value: serde_json::Value = serde_json::from_str(&schema).unwrap();
        let properties = &value["properties"];
        assert!(properties.get("diff").is_some());
        assert!(properties.get("output").is_some());
        assert!(properties.get("behavior").is_some());
        assert!(schema.contains("with_extensions"));
    }
}
