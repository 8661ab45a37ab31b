#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the document parsing entry point.
///
/// Feeds arbitrary UTF-8 strings to `parse_spec_str`, covering JSON/YAML
/// syntax detection, version checks and the conversion into the model.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = swagger_diff::parsers::parse_spec_str(s);
    }
});
