//! Model comparison.
//!
//! Walks two model trees in parallel, following `$ref` properties into the
//! definitions tables. The walk uses an explicit work stack and visits
//! children in the same pre-order a recursive walk would, so records come out
//! in document order regardless of reference depth.
//!
//! Each frame carries its own copy of the visited set. A model pair that is
//! already on the current chain is skipped, which bounds the walk on
//! self-referential and mutually recursive schemas without letting sibling
//! branches hide each other's changes.

use super::extensions::VendorExtensionDiffer;
use super::key_set::diff_keys;
use super::result::{ElProperty, ModelDiffResult};
use crate::model::{Definitions, Model, ModelId, Property};
use std::collections::BTreeSet;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Side {
    Old,
    New,
}

type Visited = BTreeSet<(Side, ModelId)>;

struct Frame<'a> {
    left: Option<&'a Model>,
    right: Option<&'a Model>,
    parent_el: Option<String>,
    parent_model: Option<String>,
    visited: Visited,
}

enum Task<'a> {
    Compare(Frame<'a>),
    Record { property: ElProperty, cosmetic: bool },
}

/// Compares models resolved against the old and new definitions tables.
#[derive(Debug, Clone, Copy)]
pub struct ModelDiffEngine<'a> {
    old_definitions: &'a Definitions,
    new_definitions: &'a Definitions,
    extensions: VendorExtensionDiffer,
}

impl<'a> ModelDiffEngine<'a> {
    #[must_use]
    pub fn new(
        old_definitions: &'a Definitions,
        new_definitions: &'a Definitions,
        extensions: VendorExtensionDiffer,
    ) -> Self {
        Self {
            old_definitions,
            new_definitions,
            extensions,
        }
    }

    /// Compare two models whose property paths start at the model root.
    #[must_use]
    pub fn diff(
        &self,
        left: Option<&'a Model>,
        right: Option<&'a Model>,
        parent_model_name: Option<&str>,
    ) -> ModelDiffResult {
        self.diff_at(left, right, None, parent_model_name)
    }

    /// Compare two models nested under `parent_el`.
    #[must_use]
    pub fn diff_at(
        &self,
        left: Option<&'a Model>,
        right: Option<&'a Model>,
        parent_el: Option<&str>,
        parent_model_name: Option<&str>,
    ) -> ModelDiffResult {
        let mut result = ModelDiffResult::new();
        let mut stack = vec![Task::Compare(Frame {
            left,
            right,
            parent_el: parent_el.map(str::to_string),
            parent_model: parent_model_name.map(str::to_string),
            visited: Visited::new(),
        })];

        while let Some(task) = stack.pop() {
            match task {
                Task::Record { property, cosmetic } => {
                    result.classification.record(cosmetic);
                    result.changed.push(property);
                }
                Task::Compare(frame) => {
                    let children = self.compare_frame(frame, &mut result);
                    stack.extend(children.into_iter().rev());
                }
            }
        }

        result
    }

    /// Resolve a reference name in the old definitions table.
    #[must_use]
    pub fn resolve_old(&self, name: &str) -> Option<&'a Model> {
        resolve(self.old_definitions, name, "old")
    }

    /// Resolve a reference name in the new definitions table.
    #[must_use]
    pub fn resolve_new(&self, name: &str) -> Option<&'a Model> {
        resolve(self.new_definitions, name, "new")
    }

    /// Emit added and removed properties of one frame and return the work for
    /// its shared properties, in key order.
    fn compare_frame(&self, frame: Frame<'a>, result: &mut ModelDiffResult) -> Vec<Task<'a>> {
        let Frame {
            left,
            right,
            parent_el,
            parent_model,
            visited,
        } = frame;

        if left.is_none() && right.is_none() {
            return Vec::new();
        }
        let seen = left.is_some_and(|m| visited.contains(&(Side::Old, m.id)))
            || right.is_some_and(|m| visited.contains(&(Side::New, m.id)));
        if seen {
            trace!(
                path = parent_el.as_deref().unwrap_or("<root>"),
                "Model already on the comparison chain, skipping"
            );
            return Vec::new();
        }

        let parent = parent_el.as_deref();
        let props = diff_keys(left.map(|m| &m.properties), right.map(|m| &m.properties));

        for (key, property) in props.increased {
            result.classification.mark_contract();
            result.increased.push(ElProperty::new(
                child_path(parent, key),
                parent_model.clone(),
                property.clone(),
            ));
        }
        for (key, property) in props.missing {
            result.classification.mark_contract();
            result.missing.push(ElProperty::new(
                child_path(parent, key),
                parent_model.clone(),
                property.clone(),
            ));
        }

        let (Some(left_model), Some(right_model)) = (left, right) else {
            return Vec::new();
        };

        let mut children = Vec::new();
        for key in props.shared_keys {
            let (Some(left_prop), Some(right_prop)) =
                (left_model.properties.get(key), right_model.properties.get(key))
            else {
                continue;
            };

            match (left_prop.ref_name(), right_prop.ref_name()) {
                (Some(left_ref), Some(right_ref)) => {
                    let mut next_visited = visited.clone();
                    next_visited.insert((Side::Old, left_model.id));
                    next_visited.insert((Side::New, right_model.id));
                    children.push(Task::Compare(Frame {
                        left: self.resolve_old(left_ref),
                        right: self.resolve_new(right_ref),
                        parent_el: Some(child_path(parent, key)),
                        parent_model: Some(left_ref.to_string()),
                        visited: next_visited,
                    }));
                }
                _ if left_prop != right_prop => {
                    let cosmetic = has_only_cosmetic_changes(left_prop, right_prop);
                    let property = ElProperty::new(
                        child_path(parent, key),
                        parent_model.clone(),
                        left_prop.clone(),
                    )
                    .with_extensions(self.extensions.diff(Some(left_prop), Some(right_prop)));
                    children.push(Task::Record { property, cosmetic });
                }
                _ => {}
            }
        }
        children
    }
}

/// True when two properties differ only in `description` and/or `example`.
#[must_use]
pub fn has_only_cosmetic_changes(left: &Property, right: &Property) -> bool {
    let docs_differ = left.description != right.description || left.example != right.example;
    docs_differ && left.without_docs() == right.without_docs()
}

fn resolve<'a>(definitions: &'a Definitions, name: &str, side: &str) -> Option<&'a Model> {
    let model = definitions.get(name);
    if model.is_none() {
        warn!(reference = name, side, "Dangling model reference, treating as absent");
    }
    model
}

fn child_path(parent: Option<&str>, key: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}.{key}"),
        None => key.to_string(),
    }
}
