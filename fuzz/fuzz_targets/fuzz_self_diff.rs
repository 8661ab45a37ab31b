#![no_main]
use libfuzzer_sys::fuzz_target;
use swagger_diff::SpecificationDiffEngine;

/// Any document that parses must diff cleanly against itself.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let (Ok(old), Ok(new)) = (
            swagger_diff::parsers::parse_spec_str(s),
            swagger_diff::parsers::parse_spec_str(s),
        ) {
            let result = SpecificationDiffEngine::new()
                .with_extensions(true)
                .diff(&old, &new)
                .expect("self diff succeeds");
            assert!(!result.has_changes());
        }
    }
});
