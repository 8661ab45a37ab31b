//! Parser trait definitions and error types.

use crate::model::Specification;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a Swagger document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("YAML parse error: {0}")]
    YamlError(String),

    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    #[error("Unsupported Swagger version: {0} (supported: 2.0)")]
    UnsupportedVersion(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::YamlError(err.to_string())
    }
}

/// Confidence level for format detection
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct FormatConfidence(f32);

impl FormatConfidence {
    /// Definitely not a Swagger document
    pub const NONE: Self = Self(0.0);
    /// Looks like an API description, but not Swagger 2.0
    pub const MEDIUM: Self = Self(0.5);
    /// Declares `swagger: "2.0"`
    pub const CERTAIN: Self = Self(1.0);

    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Check if this confidence indicates the content can be parsed
    #[must_use]
    pub fn can_parse(&self) -> bool {
        self.0 >= Self::CERTAIN.0
    }
}

/// Detection result from a parser
#[derive(Debug, Clone, Default)]
pub struct FormatDetection {
    /// Confidence that this parser can handle the content
    pub confidence: FormatConfidence,
    /// Detected syntax ("JSON" or "YAML")
    pub variant: Option<String>,
    /// Declared document version, if found
    pub version: Option<String>,
    /// Issues that would make parsing fail or lose information
    pub warnings: Vec<String>,
}

impl FormatDetection {
    #[must_use]
    pub fn with_confidence(confidence: FormatConfidence) -> Self {
        Self {
            confidence,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: &str) -> Self {
        self.variant = Some(variant.to_string());
        self
    }

    #[must_use]
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    #[must_use]
    pub fn warning(mut self, warning: &str) -> Self {
        self.warnings.push(warning.to_string());
        self
    }
}

/// Trait for API description parsers
pub trait SpecParser {
    /// Parse a document from a file path
    fn parse(&self, path: &Path) -> Result<Specification, ParseError> {
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Parse a document from string content
    fn parse_str(&self, content: &str) -> Result<Specification, ParseError>;

    /// Supported document versions
    fn supported_versions(&self) -> Vec<&str>;

    /// Format name
    fn format_name(&self) -> &str;

    /// Lightweight check of whether this parser can handle the content.
    fn detect(&self, content: &str) -> FormatDetection;

    fn can_parse(&self, content: &str) -> bool {
        self.detect(content).confidence.can_parse()
    }
}
