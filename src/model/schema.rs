//! Schema models and properties.

use super::VendorExtensions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named schema models keyed by definition name.
pub type Definitions = IndexMap<String, Model>;

/// Stable identity of a model inside one parsed document.
///
/// Two models with equal contents still have distinct ids, which is what the
/// cycle guard in the model differ relies on. Ids are only unique when they
/// come from the owning document, via [`Specification::new_model`] or
/// [`Specification::add_definition`].
///
/// [`Specification::new_model`]: super::Specification::new_model
/// [`Specification::add_definition`]: super::Specification::add_definition
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ModelId(pub u32);

/// An object schema: a set of named properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip)]
    pub id: ModelId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: IndexMap<String, Property>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub vendor_extensions: VendorExtensions,
}

impl Model {
    /// A model with an explicit id.
    ///
    /// Models that will sit inside a document (inline body schemas in
    /// particular) should be created with [`Specification::new_model`] so
    /// their id cannot collide with a registered definition.
    ///
    /// [`Specification::new_model`]: super::Specification::new_model
    #[must_use]
    pub fn new(id: ModelId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            properties: IndexMap::new(),
            vendor_extensions: VendorExtensions::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, property: Property) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A single schema property.
///
/// References and concrete types share one shape; a property whose
/// `reference` is set points at a named model in `definitions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,
    /// Members of an inline object schema.
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub properties: IndexMap<String, Property>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub vendor_extensions: VendorExtensions,
}

impl Property {
    /// A concrete property of the given Swagger type.
    #[must_use]
    pub fn typed(property_type: impl Into<String>) -> Self {
        Self {
            property_type: Some(property_type.into()),
            ..Self::default()
        }
    }

    /// A property pointing at the named model.
    #[must_use]
    pub fn reference(model_name: impl Into<String>) -> Self {
        Self {
            reference: Some(model_name.into()),
            ..Self::default()
        }
    }

    /// An array property with the given item schema.
    #[must_use]
    pub fn array(items: Self) -> Self {
        Self {
            property_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Name of the referenced model, if this property is a reference.
    #[must_use]
    pub fn ref_name(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Swagger type name; references report `"ref"`, untyped schemas `"object"`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        if self.is_reference() {
            "ref"
        } else {
            self.property_type.as_deref().unwrap_or("object")
        }
    }

    /// A copy with the documentation-only attributes cleared.
    #[must_use]
    pub fn without_docs(&self) -> Self {
        Self {
            description: None,
            example: None,
            ..self.clone()
        }
    }
}
