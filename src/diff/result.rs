//! Diff result types.

use super::extensions::ChangedExtensionGroup;
use super::traits::{Changed, Classification};
use crate::model::{HttpMethod, Operation, Parameter, Property};
use indexmap::IndexMap;
use serde::Serialize;

// ============================================================================
// Property-level records
// ============================================================================

/// A property-level change located by a dotted path expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElProperty {
    /// Dotted path relative to the containing model, e.g. `owner.address.city`.
    pub el: String,
    /// Name of the model the property belongs to, when known.
    pub parent_model_name: Option<String>,
    /// The left-hand property for changes and removals, the right-hand one for additions.
    pub property: Property,
    /// True for the synthetic `"<old> -> <new>"` record of a changed response type.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub response_type_changed: bool,
    #[serde(skip_serializing_if = "ChangedExtensionGroup::is_empty")]
    pub extensions: ChangedExtensionGroup,
}

impl ElProperty {
    #[must_use]
    pub fn new(el: impl Into<String>, parent_model_name: Option<String>, property: Property) -> Self {
        Self {
            el: el.into(),
            parent_model_name,
            property,
            response_type_changed: false,
            extensions: ChangedExtensionGroup::new(),
        }
    }

    #[must_use]
    pub fn with_extensions(mut self, extensions: ChangedExtensionGroup) -> Self {
        self.extensions = extensions;
        self
    }
}

/// Outcome of comparing two models (or two response schemas).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelDiffResult {
    pub increased: Vec<ElProperty>,
    pub missing: Vec<ElProperty>,
    pub changed: Vec<ElProperty>,
    #[serde(flatten)]
    pub classification: Classification,
}

/// Response schema comparison shares the model result shape.
pub type PropertyDiffResult = ModelDiffResult;

impl ModelDiffResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.increased.is_empty() && self.missing.is_empty() && self.changed.is_empty()
    }

    #[must_use]
    pub fn has_contract_changes(&self) -> bool {
        self.classification.has_contract_changes()
    }

    #[must_use]
    pub fn has_only_cosmetic_changes(&self) -> bool {
        self.classification.has_only_cosmetic_changes()
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// A parameter present on both sides (matched by name) with recorded differences.
#[derive(Debug, Clone, Serialize)]
pub struct ChangedParameter {
    pub left: Parameter,
    pub right: Parameter,
    pub is_change_required: bool,
    pub is_change_description: bool,
    /// Declared type, format or location differs.
    pub is_change_type: bool,
    /// A body schema was declared on one side only.
    pub is_change_schema: bool,
    /// Body schema properties added, removed or changed.
    pub increased: Vec<ElProperty>,
    pub missing: Vec<ElProperty>,
    pub changed: Vec<ElProperty>,
    #[serde(skip)]
    pub schema_classification: Classification,
    #[serde(skip_serializing_if = "ChangedExtensionGroup::is_empty")]
    pub extensions: ChangedExtensionGroup,
}

impl ChangedParameter {
    #[must_use]
    pub fn new(left: Parameter, right: Parameter) -> Self {
        Self {
            left,
            right,
            is_change_required: false,
            is_change_description: false,
            is_change_type: false,
            is_change_schema: false,
            increased: Vec::new(),
            missing: Vec::new(),
            changed: Vec::new(),
            schema_classification: Classification::new(),
            extensions: ChangedExtensionGroup::new(),
        }
    }

    /// Name of the matched parameter.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.right.name
    }

    #[must_use]
    pub fn has_contract_changes(&self) -> bool {
        self.is_change_required
            || self.is_change_type
            || self.is_change_schema
            || !self.increased.is_empty()
            || !self.missing.is_empty()
            || self.schema_classification.has_contract_changes()
            || self.extensions.is_diff()
    }

    /// Only the description (or cosmetic body-schema attributes) differ.
    #[must_use]
    pub fn has_only_cosmetic_changes(&self) -> bool {
        self.is_diff() && !self.has_contract_changes()
    }
}

impl Changed for ChangedParameter {
    fn is_diff(&self) -> bool {
        self.is_change_required
            || self.is_change_description
            || self.is_change_type
            || self.is_change_schema
            || !self.increased.is_empty()
            || !self.missing.is_empty()
            || !self.changed.is_empty()
            || self.extensions.is_diff()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ParameterDiffResult {
    pub increased: Vec<Parameter>,
    pub missing: Vec<Parameter>,
    pub changed: Vec<ChangedParameter>,
}

impl ParameterDiffResult {
    #[must_use]
    pub fn has_contract_changes(&self) -> bool {
        !self.increased.is_empty()
            || !self.missing.is_empty()
            || self.changed.iter().any(ChangedParameter::has_contract_changes)
    }

    #[must_use]
    pub fn has_only_cosmetic_changes(&self) -> bool {
        !self.changed.is_empty() && !self.has_contract_changes()
    }
}

// ============================================================================
// Operations
// ============================================================================

/// An operation present on both sides with recorded differences.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChangedOperation {
    /// Summary of the new operation
    pub summary: Option<String>,
    pub add_parameters: Vec<Parameter>,
    pub missing_parameters: Vec<Parameter>,
    pub changed_parameters: Vec<ChangedParameter>,
    /// Success response schema changes
    pub add_props: Vec<ElProperty>,
    pub missing_props: Vec<ElProperty>,
    pub changed_props: Vec<ElProperty>,
    pub is_change_description: bool,
    pub is_change_summary: bool,
    pub is_change_operation_id: bool,
    pub is_change_response_description: bool,
    #[serde(skip)]
    pub response_classification: Classification,
    /// Operation-level extension changes, with a `responses` sub-group.
    #[serde(skip_serializing_if = "ChangedExtensionGroup::is_empty")]
    pub extensions: ChangedExtensionGroup,
}

impl ChangedOperation {
    #[must_use]
    pub fn is_diff_param(&self) -> bool {
        !self.add_parameters.is_empty()
            || !self.missing_parameters.is_empty()
            || !self.changed_parameters.is_empty()
    }

    #[must_use]
    pub fn is_diff_prop(&self) -> bool {
        !self.add_props.is_empty()
            || !self.missing_props.is_empty()
            || !self.changed_props.is_empty()
    }

    #[must_use]
    pub fn has_contract_changes(&self) -> bool {
        !self.add_parameters.is_empty()
            || !self.missing_parameters.is_empty()
            || self
                .changed_parameters
                .iter()
                .any(ChangedParameter::has_contract_changes)
            || !self.add_props.is_empty()
            || !self.missing_props.is_empty()
            || self.response_classification.has_contract_changes()
            || self.extensions.is_diff()
    }

    #[must_use]
    pub fn has_only_cosmetic_changes(&self) -> bool {
        self.is_diff() && !self.has_contract_changes()
    }
}

impl Changed for ChangedOperation {
    fn is_diff(&self) -> bool {
        self.is_diff_param()
            || self.is_diff_prop()
            || self.is_change_description
            || self.is_change_summary
            || self.is_change_operation_id
            || self.is_change_response_description
            || self.extensions.is_diff()
    }
}

/// Operations of one path compared method by method.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationsDiffResult {
    pub increased: IndexMap<HttpMethod, Operation>,
    pub missing: IndexMap<HttpMethod, Operation>,
    pub changed: IndexMap<HttpMethod, ChangedOperation>,
    #[serde(flatten)]
    pub classification: Classification,
}

// ============================================================================
// Endpoints and specification
// ============================================================================

/// One (path, method) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    pub path_url: String,
    pub method: HttpMethod,
    pub summary: Option<String>,
    #[serde(skip)]
    pub operation: Operation,
}

impl Endpoint {
    #[must_use]
    pub fn new(path_url: impl Into<String>, method: HttpMethod, operation: &Operation) -> Self {
        Self {
            path_url: path_url.into(),
            method,
            summary: operation.summary.clone(),
            operation: operation.clone(),
        }
    }
}

/// A path present on both sides with recorded differences.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChangedEndpoint {
    pub path_url: String,
    pub new_operations: IndexMap<HttpMethod, Operation>,
    pub missing_operations: IndexMap<HttpMethod, Operation>,
    pub changed_operations: IndexMap<HttpMethod, ChangedOperation>,
    #[serde(skip_serializing_if = "ChangedExtensionGroup::is_empty")]
    pub extensions: ChangedExtensionGroup,
}

impl ChangedEndpoint {
    #[must_use]
    pub fn new(path_url: impl Into<String>) -> Self {
        Self {
            path_url: path_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_diff_operation(&self) -> bool {
        !self.new_operations.is_empty()
            || !self.missing_operations.is_empty()
            || !self.changed_operations.is_empty()
    }
}

impl Changed for ChangedEndpoint {
    fn is_diff(&self) -> bool {
        self.is_diff_operation() || self.extensions.is_diff()
    }
}

/// Complete outcome of comparing two specifications.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpecificationDiffResult {
    pub old_version: Option<String>,
    pub new_version: Option<String>,
    pub new_endpoints: Vec<Endpoint>,
    pub missing_endpoints: Vec<Endpoint>,
    pub changed_endpoints: Vec<ChangedEndpoint>,
    /// Root extension changes, with `info`, `tags` and `securityDefinitions` sub-groups.
    #[serde(skip_serializing_if = "ChangedExtensionGroup::is_empty")]
    pub extensions: ChangedExtensionGroup,
    #[serde(flatten)]
    pub classification: Classification,
}

impl SpecificationDiffResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_contract_changes(&self) -> bool {
        self.classification.has_contract_changes()
    }

    /// True iff something changed and every change was cosmetic.
    #[must_use]
    pub fn has_only_cosmetic_changes(&self) -> bool {
        self.classification.has_only_cosmetic_changes()
    }

    /// Any endpoint list is non-empty or any extension differs.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.new_endpoints.is_empty()
            || !self.missing_endpoints.is_empty()
            || !self.changed_endpoints.is_empty()
            || self.extensions.is_diff()
    }

    /// Changed operations across all changed endpoints.
    #[must_use]
    pub fn changed_operation_count(&self) -> usize {
        self.changed_endpoints
            .iter()
            .map(|e| e.changed_operations.len())
            .sum()
    }
}
