//! Unified error types for swagger-diff.
//!
//! Library code returns [`SwaggerDiffError`]; the binary wraps it in `anyhow`
//! at the pipeline boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for swagger-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SwaggerDiffError {
    /// Errors while reading a Swagger document
    #[error("Failed to parse Swagger document: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors during diff computation
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Not a Swagger document - expected a top-level 'swagger' field")]
    UnknownFormat,

    #[error("Unsupported Swagger version: {version} (supported: {supported})")]
    UnsupportedVersion { version: String, supported: String },

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("Template rendering failed: {0}")]
    TemplateError(String),

    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for swagger-diff operations
pub type Result<T> = std::result::Result<T, SwaggerDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl SwaggerDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a document that is not Swagger
    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::parse(format!("at {}", path.into()), ParseErrorKind::UnknownFormat)
    }

    /// Create a parse error for missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create an error for a missing or unusable diff input
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::diff(
            "invalid input",
            DiffErrorKind::InvalidArgument(message.into()),
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a diff error
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for SwaggerDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SwaggerDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for SwaggerDiffError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse(
            "YAML deserialization",
            ParseErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

impl From<crate::parsers::ParseError> for SwaggerDiffError {
    fn from(err: crate::parsers::ParseError) -> Self {
        use crate::parsers::ParseError;

        let kind = match err {
            ParseError::IoError(msg) | ParseError::InvalidStructure(msg) => {
                ParseErrorKind::InvalidValue {
                    field: "document".to_string(),
                    message: msg,
                }
            }
            ParseError::JsonError(msg) => ParseErrorKind::InvalidJson(msg),
            ParseError::YamlError(msg) => ParseErrorKind::InvalidYaml(msg),
            ParseError::UnsupportedVersion(version) => ParseErrorKind::UnsupportedVersion {
                version,
                supported: "2.0".to_string(),
            },
            ParseError::MissingField(field) => ParseErrorKind::MissingField {
                field,
                context: "document".to_string(),
            },
        };
        Self::parse("", kind)
    }
}

impl From<crate::reports::ReportError> for SwaggerDiffError {
    fn from(err: crate::reports::ReportError) -> Self {
        Self::report(
            "",
            ReportErrorKind::TemplateError(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to the existing context, so a failure deep
/// in the parser reads as `"parsing new spec: resolving #/paths: ..."`.
///
/// # Example
///
/// ```ignore
/// use swagger_diff::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<Specification> {
///     let content = std::fs::read_to_string(path)
///         .context("reading Swagger file")?;
///
///     parse_spec_str(&content)
///         .with_context(|| format!("parsing Swagger from {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SwaggerDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: SwaggerDiffError, new_ctx: &str) -> SwaggerDiffError {
    match err {
        SwaggerDiffError::Parse {
            context: existing,
            source,
        } => SwaggerDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SwaggerDiffError::Diff {
            context: existing,
            source,
        } => SwaggerDiffError::Diff {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SwaggerDiffError::Report {
            context: existing,
            source,
        } => SwaggerDiffError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SwaggerDiffError::Io {
            path,
            message,
            source,
        } => SwaggerDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SwaggerDiffError::Config(msg) => SwaggerDiffError::Config(chain_context(new_ctx, &msg)),
        SwaggerDiffError::Validation(msg) => {
            SwaggerDiffError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Join two context strings as `"new: existing"`, or just `new` when nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
