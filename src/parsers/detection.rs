//! Syntax and version detection without a full parse.

use std::fmt;

/// Surface syntax of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSyntax {
    Json,
    Yaml,
}

impl fmt::Display for SourceSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

/// JSON if the first non-whitespace character opens an object, YAML otherwise.
#[must_use]
pub fn detect_syntax(content: &str) -> SourceSyntax {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    if trimmed.starts_with('{') {
        SourceSyntax::Json
    } else {
        SourceSyntax::Yaml
    }
}

/// Version declared under `key` (`swagger` or `openapi`), read by a shallow scan.
#[must_use]
pub fn declared_version(content: &str, key: &str) -> Option<String> {
    match detect_syntax(content) {
        SourceSyntax::Json => {
            let marker = format!("\"{key}\"");
            let start = content.find(&marker)? + marker.len();
            let rest = content[start..].trim_start().strip_prefix(':')?.trim_start();
            if let Some(value) = rest.strip_prefix('"') {
                return value.find('"').map(|end| value[..end].to_string());
            }
            let end = rest
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(rest.len());
            (end > 0).then(|| rest[..end].to_string())
        }
        SourceSyntax::Yaml => content.lines().find_map(|line| {
            let value = line.strip_prefix(key)?.trim_start().strip_prefix(':')?;
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (!value.is_empty()).then(|| value.to_string())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_syntax() {
        assert_eq!(detect_syntax("  \n{\"swagger\": \"2.0\"}"), SourceSyntax::Json);
        assert_eq!(detect_syntax("swagger: '2.0'\n"), SourceSyntax::Yaml);
        assert_eq!(detect_syntax("\u{feff}{}"), SourceSyntax::Json);
        assert_eq!(SourceSyntax::Yaml.to_string(), "YAML");
    }

    #[test]
    fn test_declared_version_json() {
        let content = r#"{ "info": {}, "swagger" : "2.0" }"#;
        assert_eq!(declared_version(content, "swagger").as_deref(), Some("2.0"));
        assert_eq!(declared_version(content, "openapi"), None);

        let numeric = r#"{"swagger": 2.0, "paths": {}}"#;
        assert_eq!(declared_version(numeric, "swagger").as_deref(), Some("2.0"));
    }

    #[test]
    fn test_declared_version_yaml() {
        let content = "openapi: 3.0.1\ninfo:\n  title: x\n";
        assert_eq!(declared_version(content, "openapi").as_deref(), Some("3.0.1"));

        let quoted = "swagger: \"2.0\"\n";
        assert_eq!(declared_version(quoted, "swagger").as_deref(), Some("2.0"));
    }
}
