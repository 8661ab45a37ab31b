//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{Changed, SpecificationDiffResult};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        result: &SpecificationDiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color("Swagger Diff Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        if let (Some(old), Some(new)) = (
            config.metadata.old_spec_path.as_deref(),
            config.metadata.new_spec_path.as_deref(),
        ) {
            lines.push(format!("{}  {old} → {new}", self.color("Files:", "cyan")));
        }
        lines.push(format!(
            "{}  {} → {}",
            self.color("Version:", "cyan"),
            result.old_version.as_deref().unwrap_or("unknown"),
            result.new_version.as_deref().unwrap_or("unknown")
        ));

        lines.push(String::new());
        lines.push(self.color("Changes:", "bold"));

        let added = result.new_endpoints.len();
        let removed = result.missing_endpoints.len();
        let changed = result.changed_operation_count();

        if added > 0 {
            lines.push(format!(
                "  {} {} added",
                self.color(&format!("+{added}"), "green"),
                plural(added, "endpoint", "endpoints")
            ));
        }
        if removed > 0 {
            lines.push(format!(
                "  {} {} removed",
                self.color(&format!("-{removed}"), "red"),
                plural(removed, "endpoint", "endpoints")
            ));
        }
        if changed > 0 {
            lines.push(format!(
                "  {} {} changed",
                self.color(&format!("~{changed}"), "yellow"),
                plural(changed, "operation", "operations")
            ));
        }
        if result.extensions.is_diff() {
            lines.push(format!(
                "  {} document extensions changed",
                self.color("*", "yellow")
            ));
        }
        if !result.has_changes() {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }

        lines.push(String::new());
        let verdict = if result.has_contract_changes() {
            self.color("contract changed", "red")
        } else if result.has_only_cosmetic_changes() {
            self.color("cosmetic only", "green")
        } else {
            self.color("unchanged", "dim")
        };
        lines.push(format!("{}  {verdict}", self.color("Verdict:", "cyan")));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::sample_result;

    #[test]
    fn test_plain_summary() {
        let config = ReportConfig::default().with_paths("v1.json", "v2.json");
        let text = SummaryReporter::new()
            .no_color()
            .generate(&sample_result(), &config)
            .expect("summary renders");

        assert!(text.contains("Files:  v1.json → v2.json"));
        assert!(text.contains("Version:  1.0.0 → 1.1.0"));
        assert!(text.contains("+1 endpoint added"));
        assert!(text.contains("-1 endpoint removed"));
        assert!(text.contains("~1 operation changed"));
        assert!(text.contains("document extensions changed"));
        assert!(text.contains("Verdict:  contract changed"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_colored_summary() {
        let text = SummaryReporter::new()
            .generate(&sample_result(), &ReportConfig::default())
            .expect("summary renders");
        assert!(text.contains("\x1b[31m"));
    }

    #[test]
    fn test_unchanged_verdict() {
        let text = SummaryReporter::new()
            .no_color()
            .generate(&SpecificationDiffResult::new(), &ReportConfig::default())
            .expect("summary renders");
        assert!(text.contains("No changes"));
        assert!(text.contains("Verdict:  unchanged"));
    }

    #[test]
    fn test_cosmetic_verdict() {
        let mut result = SpecificationDiffResult::new();
        result.classification.mark_cosmetic();
        let text = SummaryReporter::new()
            .no_color()
            .generate(&result, &ReportConfig::default())
            .expect("summary renders");
        assert!(text.contains("Verdict:  cosmetic only"));
    }
}
