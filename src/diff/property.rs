//! Success response schema comparison.

use super::extensions::VendorExtensionDiffer;
use super::model::{has_only_cosmetic_changes, ModelDiffEngine};
use super::result::{ElProperty, PropertyDiffResult};
use crate::model::Property;

/// Parent model name reported for a changed response type.
pub const RESPONSE_PARENT: &str = "response";

/// Compares the schemas of two responses.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDiffEngine<'a> {
    models: ModelDiffEngine<'a>,
    extensions: VendorExtensionDiffer,
}

impl<'a> PropertyDiffEngine<'a> {
    #[must_use]
    pub fn new(models: ModelDiffEngine<'a>, extensions: VendorExtensionDiffer) -> Self {
        Self { models, extensions }
    }

    /// Compare two optional response schemas.
    ///
    /// Reference schemas (or absent ones) are resolved and compared as models.
    /// Two concrete schemas that differ yield one synthetic `"<old> -> <new>"`
    /// record. A schema appearing where there was none is not reported.
    #[must_use]
    pub fn diff(&self, left: Option<&'a Property>, right: Option<&'a Property>) -> PropertyDiffResult {
        let left_is_model = left.map_or(true, Property::is_reference);
        let right_is_model = right.map_or(true, Property::is_reference);

        if left_is_model && right_is_model {
            let left_ref = left.and_then(Property::ref_name);
            let right_ref = right.and_then(Property::ref_name);
            let left_model = left_ref.and_then(|name| self.models.resolve_old(name));
            let right_model = right_ref.and_then(|name| self.models.resolve_new(name));
            return self
                .models
                .diff(left_model, right_model, left_ref.or(right_ref));
        }

        let mut result = PropertyDiffResult::new();
        if let (Some(l), Some(r)) = (left, right) {
            if l != r {
                let mut record = ElProperty::new(
                    format!("{} -> {}", l.type_name(), r.type_name()),
                    Some(RESPONSE_PARENT.to_string()),
                    l.clone(),
                )
                .with_extensions(self.extensions.diff(Some(l), Some(r)));
                record.response_type_changed = true;

                result.classification.record(has_only_cosmetic_changes(l, r));
                result.changed.push(record);
            }
        }
        result
    }
}
