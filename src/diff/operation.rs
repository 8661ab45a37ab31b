//! Operation comparison for one path.

use super::extensions::VendorExtensionDiffer;
use super::key_set::diff_keys;
use super::parameter::ParameterDiffEngine;
use super::property::PropertyDiffEngine;
use super::result::{ChangedOperation, OperationsDiffResult};
use super::traits::Changed;
use crate::model::{HttpMethod, Operation, Response};
use indexmap::IndexMap;

/// Name of the extension sub-group holding per-response differences.
pub const RESPONSES_GROUP: &str = "responses";

/// Compares the operations of a path method by method.
#[derive(Debug, Clone, Copy)]
pub struct OperationDiffEngine<'a> {
    parameters: ParameterDiffEngine<'a>,
    properties: PropertyDiffEngine<'a>,
    extensions: VendorExtensionDiffer,
}

impl<'a> OperationDiffEngine<'a> {
    #[must_use]
    pub fn new(
        parameters: ParameterDiffEngine<'a>,
        properties: PropertyDiffEngine<'a>,
        extensions: VendorExtensionDiffer,
    ) -> Self {
        Self {
            parameters,
            properties,
            extensions,
        }
    }

    #[must_use]
    pub fn diff(
        &self,
        left: &'a IndexMap<HttpMethod, Operation>,
        right: &'a IndexMap<HttpMethod, Operation>,
    ) -> OperationsDiffResult {
        let mut result = OperationsDiffResult::default();
        let methods = diff_keys(Some(left), Some(right));

        for (method, operation) in methods.increased {
            result.increased.insert(*method, operation.clone());
        }
        for (method, operation) in methods.missing {
            result.missing.insert(*method, operation.clone());
        }
        if !result.increased.is_empty() || !result.missing.is_empty() {
            result.classification.mark_contract();
        }

        for method in methods.shared_keys {
            let (Some(old_op), Some(new_op)) = (left.get(method), right.get(method)) else {
                continue;
            };
            let changed = self.compare(old_op, new_op);
            if changed.is_diff() {
                result.classification.record(!changed.has_contract_changes());
                result.changed.insert(*method, changed);
            }
        }

        result
    }

    fn compare(&self, old_op: &'a Operation, new_op: &'a Operation) -> ChangedOperation {
        let params = self.parameters.diff(&old_op.parameters, &new_op.parameters);
        let props = self
            .properties
            .diff(old_op.success_schema(), new_op.success_schema());

        let mut extensions = self.extensions.diff(Some(old_op), Some(new_op));
        let responses = self
            .extensions
            .diff_response_group(old_op.responses.as_ref(), new_op.responses.as_ref());
        if responses.is_diff() {
            extensions.put_sub_group(RESPONSES_GROUP, responses);
        }

        ChangedOperation {
            summary: new_op.summary.clone(),
            add_parameters: params.increased,
            missing_parameters: params.missing,
            changed_parameters: params.changed,
            add_props: props.increased,
            missing_props: props.missing,
            changed_props: props.changed,
            is_change_description: old_op.description != new_op.description,
            is_change_summary: old_op.summary != new_op.summary,
            is_change_operation_id: old_op.operation_id != new_op.operation_id,
            is_change_response_description: response_descriptions_differ(
                old_op.responses.as_ref(),
                new_op.responses.as_ref(),
            ),
            response_classification: props.classification,
            extensions,
        }
    }
}

/// Compare response descriptions of status codes present on both sides.
fn response_descriptions_differ(
    left: Option<&IndexMap<String, Response>>,
    right: Option<&IndexMap<String, Response>>,
) -> bool {
    let (Some(left), Some(right)) = (left, right) else {
        return false;
    };
    diff_keys(Some(left), Some(right))
        .shared_keys
        .into_iter()
        .any(|code| {
            left.get(code).map(|r| &r.description) != right.get(code).map(|r| &r.description)
        })
}
