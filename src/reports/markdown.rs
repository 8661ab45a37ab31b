//! Markdown change log generator.

use super::escape::{escape_markdown_code, escape_markdown_inline, escape_markdown_list};
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{
    ChangedEndpoint, ChangedExtensionGroup, ChangedOperation, ChangedParameter, Changed,
    ElProperty, Endpoint, SpecificationDiffResult, RESPONSES_GROUP,
};
use crate::model::Parameter;
use indexmap::IndexMap;
use std::fmt::Write;

const LI: &str = "* ";
const PRE_LI: &str = "    ";
const HR: &str = "---\n\n";

// Action verbs share a width so sorting can skip past them.
const INSERT: &str = "Added   ";
const DELETE: &str = "Removed ";
const MODIFY: &str = "Changed ";
const ACTION_WIDTH: usize = 7;

/// Emphasis markers and arrow used by one rendering mode.
#[derive(Debug, Clone, Copy)]
struct Style {
    italic: &'static str,
    bold: &'static str,
    arrow: &'static str,
}

const RICH: Style = Style {
    italic: "_",
    bold: "__",
    arrow: "&rarr;",
};

const BASIC: Style = Style {
    italic: "",
    bold: "",
    arrow: "->",
};

/// Markdown reporter
pub struct MarkdownReporter {
    basic: bool,
}

impl MarkdownReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { basic: false }
    }

    /// Plain variant without emphasis markers, for renderers that show them literally.
    #[must_use]
    pub const fn basic() -> Self {
        Self { basic: true }
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(
        &self,
        result: &SpecificationDiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let style = if self.basic || config.basic_markdown {
            BASIC
        } else {
            RICH
        };
        let mut writer = ChangelogWriter {
            style,
            md: String::new(),
        };
        writer.document(result)?;
        Ok(writer.md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

struct ChangelogWriter {
    style: Style,
    md: String,
}

impl ChangelogWriter {
    fn document(&mut self, result: &SpecificationDiffResult) -> Result<(), ReportError> {
        writeln!(
            self.md,
            "## Version {} to {}",
            version_label(result.old_version.as_deref()),
            version_label(result.new_version.as_deref())
        )?;
        self.md.push_str(HR);

        writeln!(self.md, "### What's New")?;
        self.md.push_str(HR);
        for endpoint in &result.new_endpoints {
            self.endpoint(endpoint)?;
        }
        self.md.push('\n');

        writeln!(self.md, "### What's Deprecated")?;
        self.md.push_str(HR);
        for endpoint in &result.missing_endpoints {
            self.endpoint(endpoint)?;
        }
        self.md.push('\n');

        writeln!(self.md, "### What's Changed")?;
        self.md.push_str(HR);
        self.extension_tree(&result.extensions, "");
        for changed in &result.changed_endpoints {
            self.changed_endpoint(changed)?;
        }
        Ok(())
    }

    fn endpoint(&mut self, endpoint: &Endpoint) -> Result<(), ReportError> {
        let bold = self.style.bold;
        write!(
            self.md,
            "{LI}{bold}`{}`{bold} {}",
            endpoint.method,
            escape_markdown_list(&endpoint.path_url)
        )?;
        if let Some(summary) = &endpoint.summary {
            write!(self.md, " {}", escape_markdown_inline(summary))?;
        }
        self.md.push('\n');
        Ok(())
    }

    fn changed_endpoint(&mut self, changed: &ChangedEndpoint) -> Result<(), ReportError> {
        let path = escape_markdown_list(&changed.path_url);
        if changed.extensions.is_diff() {
            writeln!(self.md, "{LI}{path}")?;
            self.extension_tree(&changed.extensions, PRE_LI);
        }

        let bold = self.style.bold;
        for (method, operation) in &changed.changed_operations {
            write!(self.md, "{LI}{bold}`{method}`{bold} {path}")?;
            if let Some(summary) = &operation.summary {
                write!(self.md, " - {}", escape_markdown_inline(summary))?;
            }
            self.md.push('\n');
            self.operation_detail(operation)?;
        }
        Ok(())
    }

    fn operation_detail(&mut self, operation: &ChangedOperation) -> Result<(), ReportError> {
        let italic = self.style.italic;
        let detail_title = format!("{PRE_LI}{LI}");

        if operation.extensions.is_diff_shallow() {
            push_sorted(
                &mut self.md,
                extension_lines(&operation.extensions, None),
                &detail_title,
            );
        }
        if operation.is_diff_param() {
            self.parameters(operation)?;
        }
        if operation.is_diff_prop() {
            writeln!(self.md, "{detail_title}{italic}Return Type{italic}")?;
            let mut lines = Vec::new();
            lines.extend(operation.add_props.iter().map(|p| property_line(INSERT, p)));
            lines.extend(operation.missing_props.iter().map(|p| property_line(DELETE, p)));
            for prop in &operation.changed_props {
                lines.push(property_line(MODIFY, prop));
                if prop.extensions.is_diff_shallow() {
                    lines.extend(extension_lines(&prop.extensions, Some(&prop.el)));
                }
            }
            push_sorted(&mut self.md, lines, &format!("{PRE_LI}{PRE_LI}{LI}"));
        }
        if let Some(responses) = operation.extensions.sub_group(RESPONSES_GROUP) {
            if responses.is_diff() {
                writeln!(self.md, "{detail_title}{italic}Responses{italic}")?;
                self.extension_tree(responses, &format!("{PRE_LI}{PRE_LI}"));
            }
        }
        Ok(())
    }

    /// Parameter changes grouped by location, then per-parameter attribute changes.
    fn parameters(&mut self, operation: &ChangedOperation) -> Result<(), ReportError> {
        let mut by_location: IndexMap<&'static str, Vec<String>> = IndexMap::new();

        for param in &operation.add_parameters {
            by_location
                .entry(param.location.as_str())
                .or_default()
                .push(parameter_line(INSERT, param));
        }
        for changed in &operation.changed_parameters {
            let lines = by_location.entry(changed.left.location.as_str()).or_default();
            lines.extend(changed.increased.iter().map(|p| property_line(INSERT, p)));
            lines.extend(changed.missing.iter().map(|p| property_line(DELETE, p)));
            lines.extend(changed.changed.iter().map(|p| property_line(MODIFY, p)));
            if changed.extensions.is_diff_shallow() {
                lines.extend(extension_lines(&changed.extensions, Some(&changed.left.name)));
            }
        }
        for param in &operation.missing_parameters {
            by_location
                .entry(param.location.as_str())
                .or_default()
                .push(parameter_line(DELETE, param));
        }

        let italic = self.style.italic;
        for (location, lines) in by_location {
            writeln!(
                self.md,
                "{PRE_LI}{LI}{italic}{} Parameters{italic}",
                capitalize(location)
            )?;
            push_sorted(&mut self.md, lines, &format!("{PRE_LI}{PRE_LI}{LI}"));
        }

        for changed in &operation.changed_parameters {
            self.parameter_attributes(changed)?;
        }
        Ok(())
    }

    fn parameter_attributes(&mut self, changed: &ChangedParameter) -> Result<(), ReportError> {
        if !(changed.is_change_required
            || changed.is_change_description
            || changed.is_change_type
            || changed.is_change_schema)
        {
            return Ok(());
        }
        let arrow = self.style.arrow;
        let (left, right) = (&changed.left, &changed.right);
        let prefix = format!("{PRE_LI}{PRE_LI}{LI}");
        let nested = format!("{PRE_LI}{PRE_LI}{PRE_LI}{LI}");

        writeln!(
            self.md,
            "{prefix}{MODIFY}`{}`",
            escape_markdown_code(&right.name)
        )?;
        if changed.is_change_required {
            writeln!(
                self.md,
                "{nested}{} {arrow} {}",
                requiredness(left.required),
                requiredness(right.required)
            )?;
        }
        if changed.is_change_type {
            if left.location != right.location {
                writeln!(
                    self.md,
                    "{nested}in `{}` {arrow} `{}`",
                    left.location, right.location
                )?;
            }
            let (old_shape, new_shape) = (parameter_shape(left), parameter_shape(right));
            if old_shape != new_shape {
                writeln!(
                    self.md,
                    "{nested}type `{}` {arrow} `{}`",
                    escape_markdown_code(&old_shape),
                    escape_markdown_code(&new_shape)
                )?;
            }
        }
        if changed.is_change_schema {
            writeln!(
                self.md,
                "{nested}schema `{}` {arrow} `{}`",
                escape_markdown_code(left.schema_label()),
                escape_markdown_code(right.schema_label())
            )?;
        }
        if changed.is_change_description {
            writeln!(
                self.md,
                "{nested}Notes {} {arrow} {}",
                description_label(left.normalized_description()),
                description_label(right.normalized_description())
            )?;
        }
        Ok(())
    }

    /// Extension lines of a group, then each changed sub-group under its name.
    fn extension_tree(&mut self, group: &ChangedExtensionGroup, indent: &str) {
        if group.is_diff_shallow() {
            push_sorted(&mut self.md, extension_lines(group, None), &format!("{indent}{LI}"));
        }
        for (name, sub_group) in &group.sub_groups {
            if sub_group.is_diff() {
                self.md.push_str(indent);
                self.md.push_str(LI);
                self.md.push_str(&escape_markdown_inline(name));
                self.md.push('\n');
                self.extension_tree(sub_group, &format!("{indent}{PRE_LI}"));
            }
        }
    }
}

fn extension_lines(group: &ChangedExtensionGroup, owner: Option<&str>) -> Vec<String> {
    let qualify = |key: &str| match owner {
        Some(owner) => escape_markdown_code(&format!("{owner}.{key}")),
        None => escape_markdown_code(key),
    };
    let mut lines = Vec::new();
    lines.extend(group.increased.keys().map(|k| format!("{INSERT}`{}`", qualify(k))));
    lines.extend(group.missing.keys().map(|k| format!("{DELETE}`{}`", qualify(k))));
    lines.extend(group.changed.keys().map(|k| format!("{MODIFY}`{}`", qualify(k))));
    lines
}

fn property_line(action: &str, prop: &ElProperty) -> String {
    with_comment(
        format!("{action}`{}`", escape_markdown_code(&prop.el)),
        prop.property.description.as_deref(),
    )
}

fn parameter_line(action: &str, param: &Parameter) -> String {
    with_comment(
        format!("{action}`{}`", escape_markdown_code(&param.name)),
        param.description.as_deref(),
    )
}

fn with_comment(mut line: String, description: Option<&str>) -> String {
    if let Some(description) = description {
        line.push_str(" //");
        line.push_str(&escape_markdown_inline(description));
    }
    line
}

/// Sort change lines by action (added, removed, other), then by subject.
fn sort_lines(lines: &mut [String]) {
    fn rank(line: &str) -> u8 {
        if line.starts_with("Add") {
            0
        } else if line.starts_with("Remove") {
            1
        } else {
            2
        }
    }
    fn subject(line: &str) -> &str {
        line.get(ACTION_WIDTH..).unwrap_or(line)
    }
    lines.sort_by(|a, b| {
        rank(a)
            .cmp(&rank(b))
            .then_with(|| subject(a).cmp(subject(b)))
    });
}

fn push_sorted(md: &mut String, mut lines: Vec<String>, prefix: &str) {
    sort_lines(&mut lines);
    for line in lines {
        md.push_str(prefix);
        md.push_str(&line);
        md.push('\n');
    }
}

fn requiredness(required: bool) -> &'static str {
    if required {
        "required"
    } else {
        "not required"
    }
}

fn parameter_shape(param: &Parameter) -> String {
    let base = param.param_type.as_deref().unwrap_or("schema");
    match &param.format {
        Some(format) => format!("{base}({format})"),
        None => base.to_string(),
    }
}

fn description_label(description: Option<&str>) -> String {
    description.map_or_else(|| "(none)".to_string(), escape_markdown_inline)
}

fn version_label(version: Option<&str>) -> String {
    version.map_or_else(|| "unknown".to_string(), escape_markdown_inline)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
