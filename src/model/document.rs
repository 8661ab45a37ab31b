//! Root Swagger document structures.

use super::{Definitions, Model, ModelId, Path, VendorExtensions};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// A parsed Swagger 2.0 document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specification {
    pub swagger: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    pub paths: IndexMap<String, Path>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub security_definitions: IndexMap<String, SecurityDefinition>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub definitions: Definitions,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub vendor_extensions: VendorExtensions,
    #[serde(skip)]
    next_model_id: u32,
}

impl Default for Specification {
    fn default() -> Self {
        Self::new()
    }
}

impl Specification {
    /// Create an empty Swagger 2.0 document
    #[must_use]
    pub fn new() -> Self {
        Self {
            swagger: "2.0".to_string(),
            info: None,
            host: None,
            base_path: None,
            paths: IndexMap::new(),
            tags: Vec::new(),
            security_definitions: IndexMap::new(),
            definitions: Definitions::new(),
            vendor_extensions: VendorExtensions::new(),
            next_model_id: 0,
        }
    }

    /// Allocate a fresh model identity for this document.
    pub fn allocate_model_id(&mut self) -> ModelId {
        let id = ModelId(self.next_model_id);
        self.next_model_id += 1;
        id
    }

    /// An empty model carrying a fresh identity.
    pub fn new_model(&mut self) -> Model {
        let id = self.allocate_model_id();
        Model::new(id)
    }

    /// Register a named model, assigning it a fresh identity.
    pub fn add_definition(&mut self, name: impl Into<String>, mut model: Model) -> ModelId {
        let id = self.allocate_model_id();
        model.id = id;
        self.definitions.insert(name.into(), model);
        id
    }

    #[must_use]
    pub fn with_path(mut self, url: impl Into<String>, path: Path) -> Self {
        self.paths.insert(url.into(), path);
        self
    }

    #[must_use]
    pub fn with_info(mut self, info: Info) -> Self {
        self.info = Some(info);
        self
    }

    /// Look up a named model
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.definitions.get(name)
    }

    /// `info.version`, if declared
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.info.as_ref().and_then(|info| info.version.as_deref())
    }

    /// Total number of (path, method) pairs
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.paths.values().map(|p| p.operations.len()).sum()
    }

    /// Hash of the document's current content, for quick equality checks.
    ///
    /// Computed from the tree on every call, so it always reflects edits made
    /// after parsing. Model ids are not part of the hash. Returns 0 if the
    /// tree cannot be serialized.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        serde_json::to_vec(self).map_or(0, |bytes| xxh3_64(&bytes))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub vendor_extensions: VendorExtensions,
}

impl Info {
    #[must_use]
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            version: Some(version.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub vendor_extensions: VendorExtensions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDocs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityDefinition {
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub scopes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub vendor_extensions: VendorExtensions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HttpMethod, Operation, Property};

    #[test]
    fn test_model_ids_are_unique() {
        let mut spec = Specification::new();
        let pet = spec.add_definition("Pet", Model::new(ModelId::default()));
        let inline = spec.new_model();
        let tag = spec.add_definition("Tag", Model::new(ModelId::default()));

        assert_ne!(pet, tag);
        assert_ne!(inline.id, pet);
        assert_ne!(inline.id, tag);
        assert_eq!(spec.model("Pet").map(|m| m.id), Some(pet));
    }

    #[test]
    fn test_content_hash_tracks_content() {
        let build = |summary: &str| {
            let mut spec = Specification::new().with_path(
                "/pets",
                Path::default().with_operation(HttpMethod::Get, Operation::default().with_summary(summary)),
            );
            spec.add_definition(
                "Pet",
                Model::new(ModelId::default()).with_property("id", Property::typed("integer")),
            );
            spec
        };

        let a = build("List pets");
        let b = build("List pets");
        let c = build("List all pets");
        assert_ne!(a.content_hash(), 0);
        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
    }

    #[test]
    fn test_content_hash_follows_edits() {
        let mut spec = Specification::new().with_path(
            "/pets",
            Path::default().with_operation(HttpMethod::Get, Operation::default()),
        );
        let before = spec.content_hash();
        spec.paths.shift_remove("/pets");
        assert_ne!(spec.content_hash(), before);
    }

    #[test]
    fn test_endpoint_count_and_version() {
        let spec = Specification::new()
            .with_info(Info::new("Petstore", "1.0.0"))
            .with_path(
                "/pets",
                Path::default()
                    .with_operation(HttpMethod::Get, Operation::default())
                    .with_operation(HttpMethod::Post, Operation::default()),
            );
        assert_eq!(spec.endpoint_count(), 2);
        assert_eq!(spec.version(), Some("1.0.0"));
    }
}
