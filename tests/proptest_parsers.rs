//! Property-based tests for the Swagger parser.
//!
//! Ensures the parser doesn't panic on arbitrary input, including random
//! strings, JSON-like fragments and YAML-like fragments.

use proptest::prelude::*;
use swagger_diff::parsers::{detect_format, parse_spec_str};

proptest! {
    // Parser tests only assert no-panic (not result correctness) since random
    // input is expected to produce Err in almost all cases.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_spec_str_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = parse_spec_str(&s);
    }

    #[test]
    fn detect_format_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = detect_format(&s);
    }

    #[test]
    fn json_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"\{[^\}]{0,500}\}"#).unwrap()
    ) {
        let _ = parse_spec_str(&s);
    }

    #[test]
    fn yaml_like_input_doesnt_panic(
        key in "[A-Za-z$/{}-]{1,20}",
        value in "\\PC{0,100}",
    ) {
        let input = format!("swagger: '2.0'\n{key}: {value}\n");
        let _ = parse_spec_str(&input);
        let _ = detect_format(&input);
    }

    #[test]
    fn empty_and_whitespace_is_rejected(s in "\\s{0,100}") {
        prop_assert!(parse_spec_str(&s).is_err());
    }

    #[test]
    fn partial_swagger_json_doesnt_panic(
        version in "[0-9]\\.[0-9]",
        extra in "\\PC{0,200}",
    ) {
        let input = format!(r#"{{"swagger": "{version}", "paths": {{{extra}}}}}"#);
        let _ = parse_spec_str(&input);
    }

    #[test]
    fn unsupported_versions_are_rejected(version in "[013-9]\\.[0-9]") {
        let input = format!("{{\"swagger\": \"{version}\", \"paths\": {{}}}}");
        prop_assert!(parse_spec_str(&input).is_err());
    }

    #[test]
    fn arbitrary_paths_parse(
        paths in prop::collection::vec("/[a-z]{1,10}(/\\{[a-z]{1,5}\\})?", 0..10),
    ) {
        let body: Vec<String> = paths
            .iter()
            .map(|p| format!(r#""{p}": {{"get": {{"responses": {{"200": {{"description": "ok"}}}}}}}}"#))
            .collect();
        let input = format!(r#"{{"swagger": "2.0", "paths": {{{}}}}}"#, body.join(","));

        let spec = parse_spec_str(&input).expect("well-formed document");
        let unique: std::collections::HashSet<_> = paths.iter().collect();
        prop_assert_eq!(spec.paths.len(), unique.len());
        prop_assert_eq!(spec.endpoint_count(), unique.len());
    }
}
