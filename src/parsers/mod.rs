//! Swagger document parsers.
//!
//! Converts Swagger 2.0 documents (JSON or YAML) into the in-memory
//! [`Specification`] the diff engine works on.
//!
//! ## Usage
//!
//! ```no_run
//! use swagger_diff::parsers::{detect_format, parse_spec};
//! use std::path::Path;
//!
//! let spec = parse_spec(Path::new("petstore.yaml")).unwrap();
//!
//! let content = std::fs::read_to_string("petstore.yaml").unwrap();
//! if let Some(detected) = detect_format(&content) {
//!     println!("Detected: {} {:?}", detected.format_name, detected.version);
//! }
//! ```

mod detection;
mod swagger;
mod traits;

pub use detection::{declared_version, detect_syntax, SourceSyntax};
pub use swagger::SwaggerParser;
pub use traits::{FormatConfidence, FormatDetection, ParseError, SpecParser};

use crate::model::Specification;
use std::path::Path;

/// Result of format detection
#[derive(Debug, Clone)]
pub struct DetectedFormat {
    pub format_name: String,
    pub confidence: f32,
    /// "JSON" or "YAML"
    pub variant: Option<String>,
    pub version: Option<String>,
    pub warnings: Vec<String>,
}

/// Detect the document format without parsing it.
///
/// Returns None if the content does not look like an API description at all.
pub fn detect_format(content: &str) -> Option<DetectedFormat> {
    let parser = SwaggerParser::new();
    let detection = parser.detect(content);
    if detection.confidence == FormatConfidence::NONE {
        return None;
    }
    Some(DetectedFormat {
        format_name: parser.format_name().to_string(),
        confidence: detection.confidence.value(),
        variant: detection.variant,
        version: detection.version,
        warnings: detection.warnings,
    })
}

/// Maximum document size (64 MB).
const MAX_SPEC_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Read and parse a Swagger document from disk.
///
/// Returns an error if the file exceeds [`MAX_SPEC_FILE_SIZE`].
pub fn parse_spec(path: &Path) -> Result<Specification, ParseError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_SPEC_FILE_SIZE {
        return Err(ParseError::IoError(format!(
            "document is {} MB, exceeding the {} MB limit",
            metadata.len() / (1024 * 1024),
            MAX_SPEC_FILE_SIZE / (1024 * 1024),
        )));
    }
    let content = std::fs::read_to_string(path)?;
    parse_spec_str(&content)
}

/// Parse a Swagger document from string content.
pub fn parse_spec_str(content: &str) -> Result<Specification, ParseError> {
    SwaggerParser::new().parse_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_swagger_json() {
        let detected = detect_format(r#"{"swagger": "2.0", "paths": {}}"#).unwrap();
        assert_eq!(detected.format_name, "Swagger");
        assert_eq!(detected.variant.as_deref(), Some("JSON"));
        assert_eq!(detected.version.as_deref(), Some("2.0"));
        assert!(detected.warnings.is_empty());
    }

    #[test]
    fn test_detect_unknown_format() {
        assert!(detect_format(r#"{"some": "random", "json": "content"}"#).is_none());
    }

    #[test]
    fn test_parse_spec_missing_file() {
        let result = parse_spec(Path::new("/nonexistent/swagger.json"));
        assert!(matches!(result, Err(ParseError::IoError(_))));
    }

    #[test]
    fn test_parse_spec_str_minimal() {
        let spec = parse_spec_str("swagger: '2.0'\npaths: {}\n").unwrap();
        assert!(spec.paths.is_empty());
        assert_eq!(spec.swagger, "2.0");
    }
}
