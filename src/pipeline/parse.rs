//! Specification parsing stage.

use crate::model::Specification;
use anyhow::{Context, Result};
use std::path::Path;

/// A parsed specification together with where it came from.
#[derive(Debug)]
pub struct ParsedSpec {
    /// The parsed document
    pub spec: Specification,
    /// Display form of the source path
    pub source: String,
}

impl ParsedSpec {
    #[must_use]
    pub fn new(spec: Specification, source: impl Into<String>) -> Self {
        Self {
            spec,
            source: source.into(),
        }
    }

    #[must_use]
    pub const fn spec(&self) -> &Specification {
        &self.spec
    }

    #[must_use]
    pub fn into_spec(self) -> Specification {
        self.spec
    }
}

/// Parse a specification file with context for error messages
pub fn parse_spec_with_context(path: &Path, quiet: bool) -> Result<ParsedSpec> {
    if !quiet {
        tracing::info!("Parsing specification: {}", path.display());
    }

    let spec = crate::parsers::parse_spec(path)
        .with_context(|| format!("Failed to parse specification: {}", path.display()))?;

    if !quiet {
        tracing::info!(
            "Parsed {} paths, {} operations, {} definitions (version {})",
            spec.paths.len(),
            spec.endpoint_count(),
            spec.definitions.len(),
            spec.version().unwrap_or("unknown")
        );
    }

    Ok(ParsedSpec::new(spec, path.display().to_string()))
}
