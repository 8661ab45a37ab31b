//! HTML change log generator.

use super::escape::{escape_html, escape_html_opt};
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{
    Changed, ChangedEndpoint, ChangedExtensionGroup, ChangedOperation, ChangedParameter,
    ElProperty, Endpoint, SpecificationDiffResult, INFO_GROUP, RESPONSES_GROUP,
    SECURITY_DEFINITIONS_GROUP, TAGS_GROUP,
};
use crate::model::Parameter;
use serde_json::Value;
use std::fmt::Write;

/// HTML report generator
pub struct HtmlReporter {
    /// Include inline CSS
    include_styles: bool,
}

impl HtmlReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_styles: true,
        }
    }

    /// Leave styling to the embedding page.
    #[must_use]
    pub const fn without_styles(mut self) -> Self {
        self.include_styles = false;
        self
    }

    fn get_styles(&self) -> &'static str {
        r#"
        <style>
            :root {
                --bg-color: #1e1e2e;
                --text-color: #cdd6f4;
                --accent-color: #89b4fa;
                --success-color: #a6e3a1;
                --warning-color: #f9e2af;
                --error-color: #f38ba8;
                --border-color: #45475a;
            }

            body {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                background-color: var(--bg-color);
                color: var(--text-color);
                margin: 0;
                padding: 20px;
                line-height: 1.6;
            }

            .container {
                max-width: 1200px;
                margin: 0 auto;
            }

            h1, h2, h3 {
                color: var(--accent-color);
            }

            h3 {
                font-size: 1em;
                margin: 4px 0;
            }

            .indent { margin-left: 20px; }
            .comment { color: #a6adc8; margin-left: 8px; }
            .missing, del { color: var(--error-color); }
            .extension-container { border-left: 2px solid var(--border-color); padding-left: 12px; }

            span.GET, span.PUT, span.POST, span.DELETE,
            span.OPTIONS, span.HEAD, span.PATCH {
                display: inline-block;
                min-width: 64px;
                margin-right: 8px;
                font-weight: 600;
            }
            span.GET { color: var(--success-color); }
            span.POST { color: var(--accent-color); }
            span.PUT, span.PATCH { color: var(--warning-color); }
            span.DELETE { color: var(--error-color); }

            .footer {
                margin-top: 40px;
                padding-top: 20px;
                border-top: 1px solid var(--border-color);
                font-size: 0.9em;
                color: #a6adc8;
            }
        </style>
        "#
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(
        &self,
        result: &SpecificationDiffResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut html = String::new();
        let title = escape_html(config.title_or_default());

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "    <meta charset=\"UTF-8\">")?;
        writeln!(html, "    <title>{title}</title>")?;
        if self.include_styles {
            writeln!(html, "{}", self.get_styles())?;
        }
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "<div class=\"container\">")?;
        writeln!(html, "<header><h1>{title}</h1></header>")?;
        writeln!(html, "<div class=\"article\">")?;

        writeln!(html, "<div><h2>Versions</h2><hr>")?;
        writeln!(
            html,
            "<p id=\"versions\">Changes from {} to {}.</p></div>",
            escape_html(result.old_version.as_deref().unwrap_or("unknown")),
            escape_html(result.new_version.as_deref().unwrap_or("unknown"))
        )?;

        writeln!(html, "<div><h2>What's New</h2><hr>")?;
        writeln!(html, "<ol id=\"new\">")?;
        for endpoint in &result.new_endpoints {
            new_endpoint(&mut html, endpoint)?;
        }
        writeln!(html, "</ol></div>")?;

        writeln!(html, "<div><h2>What's Deprecated</h2><hr>")?;
        writeln!(html, "<ol id=\"deprecated\">")?;
        for endpoint in &result.missing_endpoints {
            missing_endpoint(&mut html, endpoint)?;
        }
        writeln!(html, "</ol></div>")?;

        writeln!(html, "<div><h2>What's Changed</h2><hr>")?;
        writeln!(html, "<div id=\"changed\">")?;
        document_extensions(&mut html, &result.extensions)?;
        writeln!(html, "<ol>")?;
        for changed in &result.changed_endpoints {
            changed_endpoint(&mut html, changed)?;
        }
        writeln!(html, "</ol>")?;
        writeln!(html, "</div></div>")?;

        writeln!(html, "</div>")?;
        writeln!(
            html,
            "<div class=\"footer\">Generated by swagger-diff v{}</div>",
            escape_html(&config.metadata.tool_version)
        )?;
        writeln!(html, "</div>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }
}

// ============================================================================
// Endpoint lists
// ============================================================================

fn new_endpoint(html: &mut String, endpoint: &Endpoint) -> Result<(), ReportError> {
    writeln!(
        html,
        "<li><span class=\"{m}\">{m}</span>{} <span>{}</span></li>",
        escape_html(&endpoint.path_url),
        escape_html_opt(endpoint.summary.as_deref()),
        m = endpoint.method
    )?;
    Ok(())
}

fn missing_endpoint(html: &mut String, endpoint: &Endpoint) -> Result<(), ReportError> {
    writeln!(
        html,
        "<li><span class=\"{m}\">{m}</span><del>{}</del> <span>{}</span></li>",
        escape_html(&endpoint.path_url),
        escape_html_opt(endpoint.summary.as_deref()),
        m = endpoint.method
    )?;
    Ok(())
}

// ============================================================================
// Vendor extensions
// ============================================================================

fn document_extensions(html: &mut String, root: &ChangedExtensionGroup) -> Result<(), ReportError> {
    if root.is_diff_shallow() {
        writeln!(html, "<div class=\"indent\">Root-Level Extensions</div>")?;
        extension_list(html, root, "indent extension-container")?;
    }
    if let Some(info) = root.sub_group(INFO_GROUP).filter(|g| g.is_diff()) {
        writeln!(html, "<ul class=\"indent\"><li>Info Extensions")?;
        extension_list(html, info, "extension-container")?;
        writeln!(html, "</li></ul>")?;
    }
    for (name, title) in [
        (SECURITY_DEFINITIONS_GROUP, "Security Definition Extensions"),
        (TAGS_GROUP, "Tag Extensions"),
    ] {
        if let Some(group) = root.sub_group(name).filter(|g| g.is_diff()) {
            writeln!(html, "<div class=\"indent\">{title}</div>")?;
            writeln!(html, "<ul class=\"indent extension-container\">")?;
            for (entity, sub_group) in &group.sub_groups {
                if sub_group.is_diff() {
                    writeln!(html, "<li><h3>{}</h3>", escape_html(entity))?;
                    extension_list(html, sub_group, "indent")?;
                    writeln!(html, "</li>")?;
                }
            }
            writeln!(html, "</ul>")?;
        }
    }
    Ok(())
}

fn extension_list(
    html: &mut String,
    group: &ChangedExtensionGroup,
    class: &str,
) -> Result<(), ReportError> {
    if class.is_empty() {
        writeln!(html, "<ul>")?;
    } else {
        writeln!(html, "<ul class=\"{class}\">")?;
    }
    extension_items(html, group)?;
    writeln!(html, "</ul>")?;
    Ok(())
}

fn extension_items(html: &mut String, group: &ChangedExtensionGroup) -> Result<(), ReportError> {
    for key in group.increased.keys() {
        writeln!(html, "<li>Add {}</li>", escape_html(key))?;
    }
    for key in group.missing.keys() {
        writeln!(
            html,
            "<li class=\"missing\">Delete <del>{}</del></li>",
            escape_html(key)
        )?;
    }
    for (key, change) in &group.changed {
        writeln!(
            html,
            "<li>{}: <del>{}</del> -&gt; <i>{}</i></li>",
            escape_html(key),
            escape_html(&value_text(&change.old)),
            escape_html(&value_text(&change.new))
        )?;
    }
    Ok(())
}

/// Strings render bare, everything else as compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Changed endpoints
// ============================================================================

fn changed_endpoint(html: &mut String, changed: &ChangedEndpoint) -> Result<(), ReportError> {
    let path = escape_html(&changed.path_url);
    if changed.extensions.is_diff() {
        writeln!(html, "<li>{path}<ul><li>")?;
        extension_list(html, &changed.extensions, "")?;
        writeln!(html, "</li></ul></li>")?;
    }

    for (method, operation) in &changed.changed_operations {
        writeln!(
            html,
            "<li><span class=\"{method}\">{method}</span>{path} <span>{}</span>",
            escape_html_opt(operation.summary.as_deref())
        )?;
        writeln!(html, "<ul class=\"detail\">")?;
        operation_detail(html, operation)?;
        writeln!(html, "</ul></li>")?;
    }
    Ok(())
}

fn operation_detail(html: &mut String, operation: &ChangedOperation) -> Result<(), ReportError> {
    if operation.extensions.is_diff_shallow() {
        writeln!(html, "<li>")?;
        extension_list(html, &operation.extensions, "")?;
        writeln!(html, "</li>")?;
    }

    if operation.is_diff_param() {
        writeln!(html, "<li><h3>Parameter</h3><ul class=\"change param\">")?;
        for param in &operation.add_parameters {
            added_parameter(html, param)?;
        }
        for changed in &operation.changed_parameters {
            for prop in &changed.increased {
                added_property(html, prop)?;
            }
        }
        for changed in &operation.changed_parameters {
            changed_parameter(html, changed)?;
        }
        for changed in &operation.changed_parameters {
            for prop in &changed.missing {
                missing_property(html, prop)?;
            }
        }
        for param in &operation.missing_parameters {
            missing_parameter(html, param)?;
        }
        writeln!(html, "</ul></li>")?;
    }

    if operation.is_diff_prop() {
        writeln!(html, "<li><h3>Return Type</h3><ul class=\"change response\">")?;
        for prop in &operation.add_props {
            added_property(html, prop)?;
        }
        for prop in &operation.changed_props {
            changed_property(html, prop)?;
        }
        for prop in &operation.missing_props {
            missing_property(html, prop)?;
        }
        writeln!(html, "</ul></li>")?;
    }

    if let Some(responses) = operation
        .extensions
        .sub_group(RESPONSES_GROUP)
        .filter(|g| g.is_diff())
    {
        writeln!(html, "<li><h3>Responses</h3><ul>")?;
        for (code, group) in &responses.sub_groups {
            writeln!(html, "<li class=\"indent\">{}", escape_html(code))?;
            extension_list(html, group, "indent")?;
            writeln!(html, "</li>")?;
        }
        writeln!(html, "</ul></li>")?;
    }
    Ok(())
}

fn comment(description: Option<&str>) -> String {
    description.map_or_else(String::new, |text| format!("//{}", escape_html(text)))
}

fn added_parameter(html: &mut String, param: &Parameter) -> Result<(), ReportError> {
    writeln!(
        html,
        "<li>Add {}<span class=\"comment\">{}</span></li>",
        escape_html(&param.name),
        comment(param.description.as_deref())
    )?;
    Ok(())
}

fn missing_parameter(html: &mut String, param: &Parameter) -> Result<(), ReportError> {
    writeln!(
        html,
        "<li class=\"missing\"><span>Delete</span><del>{}</del><span class=\"comment\">{}</span></li>",
        escape_html(&param.name),
        comment(param.description.as_deref())
    )?;
    Ok(())
}

fn changed_parameter(html: &mut String, changed: &ChangedParameter) -> Result<(), ReportError> {
    let describes_attributes = changed.is_change_required
        || changed.is_change_description
        || changed.is_change_type
        || changed.is_change_schema
        || changed.extensions.is_diff_shallow();
    if !describes_attributes {
        return Ok(());
    }
    let (left, right) = (&changed.left, &changed.right);
    writeln!(html, "<li>Change {}:<ul class=\"indent\">", escape_html(&right.name))?;
    if changed.is_change_required {
        writeln!(
            html,
            "<li><del>{}</del> -&gt; {}</li>",
            requiredness(left.required),
            requiredness(right.required)
        )?;
    }
    if changed.is_change_type {
        writeln!(
            html,
            "<li><del>{}</del> -&gt; {}</li>",
            escape_html(&parameter_shape(left)),
            escape_html(&parameter_shape(right))
        )?;
    }
    if changed.is_change_schema {
        writeln!(
            html,
            "<li>schema <del>{}</del> -&gt; {}</li>",
            escape_html(left.schema_label()),
            escape_html(right.schema_label())
        )?;
    }
    if changed.is_change_description {
        writeln!(
            html,
            "<li>Notes:<del class=\"comment\">{}</del> -&gt; <span class=\"comment\">{}</span></li>",
            escape_html_opt(left.normalized_description()),
            escape_html_opt(right.normalized_description())
        )?;
    }
    if changed.extensions.is_diff_shallow() {
        writeln!(html, "<li>")?;
        extension_list(html, &changed.extensions, "")?;
        writeln!(html, "</li>")?;
    }
    writeln!(html, "</ul></li>")?;
    Ok(())
}

fn added_property(html: &mut String, prop: &ElProperty) -> Result<(), ReportError> {
    writeln!(
        html,
        "<li>Add {}<span class=\"comment\">{}</span></li>",
        escape_html(&prop.el),
        comment(prop.property.description.as_deref())
    )?;
    Ok(())
}

fn changed_property(html: &mut String, prop: &ElProperty) -> Result<(), ReportError> {
    writeln!(
        html,
        "<li>Change {}<span class=\"comment\">{}</span></li>",
        escape_html(&prop.el),
        comment(prop.property.description.as_deref())
    )?;
    Ok(())
}

fn missing_property(html: &mut String, prop: &ElProperty) -> Result<(), ReportError> {
    writeln!(
        html,
        "<li class=\"missing\">Delete<del>{}</del><span class=\"comment\">{}</span></li>",
        escape_html(&prop.el),
        comment(prop.property.description.as_deref())
    )?;
    Ok(())
}

fn requiredness(required: bool) -> &'static str {
    if required {
        "required"
    } else {
        "not required"
    }
}

/// `in type(format)` summary of a parameter's declared shape.
fn parameter_shape(param: &Parameter) -> String {
    let base = param.param_type.as_deref().unwrap_or("schema");
    match &param.format {
        Some(format) => format!("{} {base}({format})", param.location),
        None => format!("{} {base}", param.location),
    }
}
