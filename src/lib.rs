//! **Structural diffing for Swagger 2.0 API specifications.**
//!
//! `swagger-diff` compares two versions of a Swagger (`OpenAPI` v2) document and
//! reports which endpoints were added or removed, and how the surviving
//! operations changed: parameters, request bodies, response schemas, response
//! descriptions and vendor extensions. Every result carries a classification
//! that tells **contract-breaking** changes apart from **cosmetic** ones
//! (description-only edits), which makes the tool usable as a CI gate.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The in-memory [`Specification`] that both documents are
//!   parsed into, with definitions resolved to shared models.
//! - **[`parsers`]**: JSON and YAML loading via [`parse_spec`] and [`parse_spec_str`].
//! - **[`diff`]**: The [`SpecificationDiffEngine`] and the layered engines for
//!   operations, parameters, properties, models and vendor extensions.
//! - **[`reports`]**: Markdown, HTML, JSON and terminal-summary renderings of a
//!   [`SpecificationDiffResult`].
//! - **[`config`]**: YAML configuration files, discovery and validation.
//! - **[`pipeline`]**: The parse → diff → report stages shared by the CLI.
//!
//! ## Diffing Two Specifications
//!
//! ```no_run
//! use std::path::Path;
//! use swagger_diff::{parse_spec, SpecificationDiffEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let old = parse_spec(Path::new("api/v1/swagger.yaml"))?;
//!     let new = parse_spec(Path::new("api/v2/swagger.yaml"))?;
//!
//!     let result = SpecificationDiffEngine::new()
//!         .with_extensions(true)
//!         .diff(&old, &new)?;
//!
//!     println!("Endpoints added:   {}", result.new_endpoints.len());
//!     println!("Endpoints removed: {}", result.missing_endpoints.len());
//!     println!("Contract changed:  {}", result.has_contract_changes());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Rendering a Changelog
//!
//! ```no_run
//! use swagger_diff::{parse_spec_str, ReportFormat, SpecificationDiffEngine};
//! use swagger_diff::reports::{create_reporter, ReportConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let old = parse_spec_str(&std::fs::read_to_string("v1.json")?)?;
//!     let new = parse_spec_str(&std::fs::read_to_string("v2.json")?)?;
//!     let result = SpecificationDiffEngine::new().diff(&old, &new)?;
//!
//!     let reporter = create_reporter(ReportFormat::Markdown, false);
//!     println!("{}", reporter.generate(&result, &ReportConfig::default())?);
//!     Ok(())
//! }
//! ```

#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

pub use config::{AppConfig, AppConfigBuilder, BehaviorConfig, DiffOptions, OutputConfig};
pub use config::{ConfigError, DiffConfig, DiffConfigBuilder, Validatable};
pub use diff::{
    Changed, ChangedEndpoint, ChangedExtensionGroup, ChangedOperation, ChangedParameter,
    Classification, ElProperty, Endpoint, SpecificationDiffEngine, SpecificationDiffResult,
};
pub use error::{ErrorContext, Result, SwaggerDiffError};
pub use model::{HttpMethod, Model, Operation, Parameter, Property, Specification};
pub use parsers::{parse_spec, parse_spec_str, ParseError, SpecParser, SwaggerParser};
pub use reports::{ReportError, ReportFormat, ReportGenerator};
