//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two Swagger specifications.

use crate::config::DiffConfig;
use crate::diff::SpecificationDiffResult;
use crate::pipeline::{compute_diff, exit_codes, output_report, parse_spec_with_context};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let old_parsed = parse_spec_with_context(&config.paths.old, quiet)?;
    let new_parsed = parse_spec_with_context(&config.paths.new, quiet)?;

    let result = compute_diff(&config, old_parsed.spec(), new_parsed.spec())?;
    let exit_code = determine_exit_code(&config, &result);

    output_report(&config, &result)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on diff results and config flags.
fn determine_exit_code(config: &DiffConfig, result: &SpecificationDiffResult) -> i32 {
    if config.behavior.fail_on_contract_change && result.has_contract_changes() {
        return exit_codes::CONTRACT_CHANGED;
    }
    if config.behavior.fail_on_change && result.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
