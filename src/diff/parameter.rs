//! Parameter list comparison.

use super::extensions::VendorExtensionDiffer;
use super::model::ModelDiffEngine;
use super::result::{ChangedParameter, ParameterDiffResult};
use super::traits::Changed;
use crate::model::{BodySchema, Parameter};

/// Matches parameters by name and compares each pair.
#[derive(Debug, Clone, Copy)]
pub struct ParameterDiffEngine<'a> {
    models: ModelDiffEngine<'a>,
    extensions: VendorExtensionDiffer,
}

impl<'a> ParameterDiffEngine<'a> {
    #[must_use]
    pub fn new(models: ModelDiffEngine<'a>, extensions: VendorExtensionDiffer) -> Self {
        Self { models, extensions }
    }

    /// Compare two parameter lists.
    ///
    /// Each left parameter claims the first unclaimed right parameter with the
    /// same name. Unclaimed right parameters are reported as increased.
    #[must_use]
    pub fn diff(&self, left: &'a [Parameter], right: &'a [Parameter]) -> ParameterDiffResult {
        let mut result = ParameterDiffResult::default();
        let mut unclaimed: Vec<&'a Parameter> = right.iter().collect();

        for left_param in left {
            let position = unclaimed.iter().position(|p| p.name == left_param.name);
            match position {
                Some(index) => {
                    let right_param = unclaimed.remove(index);
                    let changed = self.compare(left_param, right_param);
                    if changed.is_diff() {
                        result.changed.push(changed);
                    }
                }
                None => result.missing.push(left_param.clone()),
            }
        }

        result.increased = unclaimed.into_iter().cloned().collect();
        result
    }

    fn compare(&self, left: &'a Parameter, right: &'a Parameter) -> ChangedParameter {
        let mut changed = ChangedParameter::new(left.clone(), right.clone());
        changed.is_change_required = left.required != right.required;
        changed.is_change_description =
            left.normalized_description().unwrap_or("") != right.normalized_description().unwrap_or("");
        changed.is_change_type = left.location != right.location
            || left.param_type != right.param_type
            || left.format != right.format;

        let nested = match (&left.schema, &right.schema) {
            (Some(BodySchema::Reference(left_ref)), Some(BodySchema::Reference(right_ref))) => {
                Some(self.models.diff(
                    self.models.resolve_old(left_ref),
                    self.models.resolve_new(right_ref),
                    Some(left_ref.as_str()),
                ))
            }
            (Some(BodySchema::Inline(left_model)), Some(BodySchema::Inline(right_model))) => {
                Some(self.models.diff(
                    Some(left_model),
                    Some(right_model),
                    Some(left.name.as_str()),
                ))
            }
            // A named model replaced by an inline one (or the reverse) is
            // compared by content.
            (Some(BodySchema::Reference(left_ref)), Some(BodySchema::Inline(right_model))) => {
                Some(self.models.diff(
                    self.models.resolve_old(left_ref),
                    Some(right_model),
                    Some(left_ref.as_str()),
                ))
            }
            (Some(BodySchema::Inline(left_model)), Some(BodySchema::Reference(right_ref))) => {
                Some(self.models.diff(
                    Some(left_model),
                    self.models.resolve_new(right_ref),
                    Some(left.name.as_str()),
                ))
            }
            (Some(_), None) | (None, Some(_)) => {
                changed.is_change_schema = true;
                None
            }
            (None, None) => None,
        };
        if let Some(nested) = nested {
            changed.increased = nested.increased;
            changed.missing = nested.missing;
            changed.changed = nested.changed;
            changed.schema_classification = nested.classification;
        }

        changed.extensions = self.extensions.diff(Some(left), Some(right));
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Model, ModelId, ParameterLocation, Property, Specification};
    use serde_json::json;

    fn engine<'a>(
        old: &'a Specification,
        new: &'a Specification,
        extensions: bool,
    ) -> ParameterDiffEngine<'a> {
        let ext = VendorExtensionDiffer::new(extensions);
        ParameterDiffEngine::new(ModelDiffEngine::new(&old.definitions, &new.definitions, ext), ext)
    }

    fn query(name: &str) -> Parameter {
        Parameter::new(name, ParameterLocation::Query).with_type("string")
    }

    #[test]
    fn test_added_removed_and_unchanged() {
        let spec = Specification::new();
        let left = vec![query("limit"), query("offset")];
        let right = vec![query("limit"), query("cursor")];
        let result = engine(&spec, &spec, false).diff(&left, &right);

        assert_eq!(result.missing.len(), 1);
        assert_eq!(result.missing[0].name, "offset");
        assert_eq!(result.increased.len(), 1);
        assert_eq!(result.increased[0].name, "cursor");
        assert!(result.changed.is_empty());
        assert!(result.has_contract_changes());
    }

    #[test]
    fn test_required_flip() {
        let spec = Specification::new();
        let left = vec![query("limit")];
        let right = vec![query("limit").with_required(true)];
        let result = engine(&spec, &spec, false).diff(&left, &right);

        assert_eq!(result.changed.len(), 1);
        assert!(result.changed[0].is_change_required);
        assert!(result.changed[0].has_contract_changes());
    }

    #[test]
    fn test_blank_description_equals_absent() {
        let spec = Specification::new();
        let left = vec![query("limit")];
        let right = vec![query("limit").with_description("  ")];
        let result = engine(&spec, &spec, false).diff(&left, &right);
        assert!(result.changed.is_empty());

        let right = vec![query("limit").with_description("page size")];
        let result = engine(&spec, &spec, false).diff(&left, &right);
        assert_eq!(result.changed.len(), 1);
        assert!(result.changed[0].has_only_cosmetic_changes());
        assert!(result.has_only_cosmetic_changes());
    }

    #[test]
    fn test_duplicate_names_match_first_occurrence() {
        let spec = Specification::new();
        let left = vec![query("tag").with_description("first")];
        let right = vec![
            query("tag").with_description("first"),
            query("tag").with_description("second"),
        ];
        let result = engine(&spec, &spec, false).diff(&left, &right);

        assert!(result.changed.is_empty());
        assert_eq!(result.increased.len(), 1);
        assert_eq!(result.increased[0].description.as_deref(), Some("second"));
    }

    #[test]
    fn test_body_reference_recurses() {
        let build = |name_type: &str| {
            let mut spec = Specification::new();
            spec.add_definition(
                "NewPet",
                Model::new(ModelId::default()).with_property("name", Property::typed(name_type)),
            );
            spec
        };
        let old = build("string");
        let new = build("integer");
        let body = || {
            Parameter::new("body", ParameterLocation::Body)
                .with_schema(BodySchema::Reference("NewPet".to_string()))
        };
        let (left, right) = (vec![body()], vec![body()]);
        let result = engine(&old, &new, false).diff(&left, &right);

        assert_eq!(result.changed.len(), 1);
        let changed = &result.changed[0];
        assert_eq!(changed.changed.len(), 1);
        assert_eq!(changed.changed[0].parent_model_name.as_deref(), Some("NewPet"));
        assert!(changed.has_contract_changes());
    }

    #[test]
    fn test_inline_body_schema_recurses() {
        let mut spec = Specification::new();
        let mut inline = |desc: &str| {
            Parameter::new("payload", ParameterLocation::Body).with_schema(BodySchema::Inline(
                spec.new_model()
                    .with_property("note", Property::typed("string").with_description(desc)),
            ))
        };
        let (left, right) = (vec![inline("a")], vec![inline("b")]);
        let result = engine(&spec, &spec, false).diff(&left, &right);

        assert_eq!(result.changed.len(), 1);
        assert_eq!(result.changed[0].changed[0].parent_model_name.as_deref(), Some("payload"));
        assert!(result.changed[0].has_only_cosmetic_changes());
    }

    fn pet_spec(id_type: &str) -> Specification {
        let mut spec = Specification::new();
        spec.add_definition(
            "Pet",
            Model::new(ModelId::default()).with_property("id", Property::typed(id_type)),
        );
        spec
    }

    fn body(schema: Option<BodySchema>) -> Parameter {
        let param = Parameter::new("body", ParameterLocation::Body);
        match schema {
            Some(schema) => param.with_schema(schema),
            None => param,
        }
    }

    #[test]
    fn test_reference_replaced_by_inline_schema() {
        let old = pet_spec("string");
        let mut new = pet_spec("string");
        let inline = new.new_model().with_property("id", Property::typed("integer"));

        let left = vec![body(Some(BodySchema::Reference("Pet".to_string())))];
        let right = vec![body(Some(BodySchema::Inline(inline)))];
        let result = engine(&old, &new, false).diff(&left, &right);

        assert_eq!(result.changed.len(), 1);
        let changed = &result.changed[0];
        assert_eq!(changed.changed.len(), 1);
        assert_eq!(changed.changed[0].el, "id");
        assert_eq!(changed.changed[0].parent_model_name.as_deref(), Some("Pet"));
        assert!(changed.has_contract_changes());
        assert!(result.has_contract_changes());
    }

    #[test]
    fn test_inline_replaced_by_reference_schema() {
        let mut old = pet_spec("integer");
        let new = pet_spec("integer");
        let inline = old
            .new_model()
            .with_property("id", Property::typed("integer"))
            .with_property("legacy", Property::typed("string"));

        let left = vec![body(Some(BodySchema::Inline(inline)))];
        let right = vec![body(Some(BodySchema::Reference("Pet".to_string())))];
        let result = engine(&old, &new, false).diff(&left, &right);

        assert_eq!(result.changed.len(), 1);
        assert_eq!(result.changed[0].missing.len(), 1);
        assert_eq!(result.changed[0].missing[0].el, "legacy");
        assert!(result.changed[0].has_contract_changes());
    }

    #[test]
    fn test_equivalent_inline_and_reference_schemas_match() {
        let old = pet_spec("integer");
        let mut new = pet_spec("integer");
        let inline = new.new_model().with_property("id", Property::typed("integer"));

        let left = vec![body(Some(BodySchema::Reference("Pet".to_string())))];
        let right = vec![body(Some(BodySchema::Inline(inline)))];
        let result = engine(&old, &new, false).diff(&left, &right);
        assert!(result.changed.is_empty());
    }

    #[test]
    fn test_schema_dropped_from_body() {
        let spec = pet_spec("integer");
        let left = vec![body(Some(BodySchema::Reference("Pet".to_string())))];
        let right = vec![body(None)];

        let result = engine(&spec, &spec, false).diff(&left, &right);
        assert_eq!(result.changed.len(), 1);
        assert!(result.changed[0].is_change_schema);
        assert!(result.changed[0].has_contract_changes());

        let result = engine(&spec, &spec, false).diff(&right, &left);
        assert_eq!(result.changed.len(), 1);
        assert!(result.changed[0].is_change_schema);
    }

    #[test]
    fn test_inline_schema_follows_reference_to_definition() {
        let build = |name_type: &str| {
            let mut spec = Specification::new();
            spec.add_definition(
                "Owner",
                Model::new(ModelId::default()).with_property("name", Property::typed(name_type)),
            );
            let inline = spec.new_model().with_property("owner", Property::reference("Owner"));
            (spec, inline)
        };
        let (old, old_inline) = build("string");
        let (new, new_inline) = build("integer");
        assert_ne!(new_inline.id, new.model("Owner").map(|m| m.id).unwrap_or_default());

        let left = vec![body(Some(BodySchema::Inline(old_inline)))];
        let right = vec![body(Some(BodySchema::Inline(new_inline)))];
        let result = engine(&old, &new, false).diff(&left, &right);

        assert_eq!(result.changed.len(), 1);
        assert_eq!(result.changed[0].changed.len(), 1);
        assert_eq!(result.changed[0].changed[0].el, "owner.name");
        assert!(result.changed[0].has_contract_changes());
    }

    #[test]
    fn test_extension_diff_retains_parameter() {
        let spec = Specification::new();
        let mut tagged = query("limit");
        tagged.vendor_extensions.insert("x-max".to_string(), json!(100));
        let (left, right) = (vec![query("limit")], vec![tagged]);

        let disabled = engine(&spec, &spec, false).diff(&left, &right);
        assert!(disabled.changed.is_empty());

        let enabled = engine(&spec, &spec, true).diff(&left, &right);
        assert_eq!(enabled.changed.len(), 1);
        assert!(enabled.changed[0].has_contract_changes());
    }

    #[test]
    fn test_type_change_is_contract() {
        let spec = Specification::new();
        let left = vec![query("limit")];
        let right = vec![Parameter::new("limit", ParameterLocation::Query).with_type("integer")];
        let result = engine(&spec, &spec, false).diff(&left, &right);

        assert!(result.changed[0].is_change_type);
        assert!(result.has_contract_changes());
    }
}
