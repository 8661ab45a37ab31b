//! Vendor extension (`x-*`) comparison.
//!
//! Extension diffing is opt-in. When disabled, every comparison yields an empty
//! [`ChangedExtensionGroup`] and no extension difference can influence the
//! classification.

use super::key_set::diff_keys;
use super::traits::Changed;
use crate::model::{Extensible, Response, SecurityDefinition, Tag};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Old and new value of one extension key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionChange {
    pub old: Value,
    pub new: Value,
}

/// Extension differences on one entity, plus named child groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangedExtensionGroup {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub increased: IndexMap<String, Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub missing: IndexMap<String, Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub changed: IndexMap<String, ExtensionChange>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub sub_groups: IndexMap<String, ChangedExtensionGroup>,
}

impl ChangedExtensionGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Differences on this entity only, ignoring sub-groups.
    #[must_use]
    pub fn is_diff_shallow(&self) -> bool {
        !self.increased.is_empty() || !self.missing.is_empty() || !self.changed.is_empty()
    }

    /// No differences here or in any sub-group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.is_diff()
    }

    pub fn put_sub_group(&mut self, name: impl Into<String>, group: Self) {
        self.sub_groups.insert(name.into(), group);
    }

    #[must_use]
    pub fn sub_group(&self, name: &str) -> Option<&Self> {
        self.sub_groups.get(name)
    }

    #[must_use]
    pub fn has_sub_group(&self, name: &str) -> bool {
        self.sub_groups.contains_key(name)
    }
}

impl Changed for ChangedExtensionGroup {
    /// Differences here or in any sub-group, recursively.
    fn is_diff(&self) -> bool {
        self.is_diff_shallow() || self.sub_groups.values().any(Changed::is_diff)
    }
}

/// Compares vendor extensions when enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct VendorExtensionDiffer {
    enabled: bool,
}

impl VendorExtensionDiffer {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Compare the extensions of two optional entities.
    ///
    /// An absent side contributes no extensions, so `diff(None, Some(x))`
    /// reports every extension of `x` as increased.
    #[must_use]
    pub fn diff<T: Extensible + ?Sized>(
        &self,
        left: Option<&T>,
        right: Option<&T>,
    ) -> ChangedExtensionGroup {
        let mut group = ChangedExtensionGroup::new();
        if !self.enabled {
            return group;
        }

        let left_ext = left.map(Extensible::vendor_extensions);
        let right_ext = right.map(Extensible::vendor_extensions);
        let keys = diff_keys(left_ext, right_ext);

        for (key, value) in keys.increased {
            group.increased.insert(key.clone(), value.clone());
        }
        for (key, value) in keys.missing {
            group.missing.insert(key.clone(), value.clone());
        }
        if let (Some(l), Some(r)) = (left_ext, right_ext) {
            for key in keys.shared_keys {
                if let (Some(old), Some(new)) = (l.get(key), r.get(key)) {
                    if old != new {
                        group.changed.insert(
                            key.clone(),
                            ExtensionChange {
                                old: old.clone(),
                                new: new.clone(),
                            },
                        );
                    }
                }
            }
        }
        group
    }

    /// Per-tag extension groups keyed by tag name.
    #[must_use]
    pub fn diff_tag_group(&self, left: &[Tag], right: &[Tag]) -> ChangedExtensionGroup {
        if !self.enabled {
            return ChangedExtensionGroup::new();
        }
        let left: IndexMap<&str, &Tag> = left.iter().map(|t| (t.name.as_str(), t)).collect();
        let right: IndexMap<&str, &Tag> = right.iter().map(|t| (t.name.as_str(), t)).collect();
        self.diff_named_group(&left, &right)
    }

    /// Per-scheme extension groups keyed by security definition name.
    #[must_use]
    pub fn diff_security_group(
        &self,
        left: &IndexMap<String, SecurityDefinition>,
        right: &IndexMap<String, SecurityDefinition>,
    ) -> ChangedExtensionGroup {
        if !self.enabled {
            return ChangedExtensionGroup::new();
        }
        let left: IndexMap<&str, &SecurityDefinition> =
            left.iter().map(|(k, v)| (k.as_str(), v)).collect();
        let right: IndexMap<&str, &SecurityDefinition> =
            right.iter().map(|(k, v)| (k.as_str(), v)).collect();
        self.diff_named_group(&left, &right)
    }

    /// Per-status-code extension groups for an operation's responses.
    #[must_use]
    pub fn diff_response_group(
        &self,
        left: Option<&IndexMap<String, Response>>,
        right: Option<&IndexMap<String, Response>>,
    ) -> ChangedExtensionGroup {
        if !self.enabled {
            return ChangedExtensionGroup::new();
        }
        fn by_code<'m>(
            map: Option<&'m IndexMap<String, Response>>,
        ) -> IndexMap<&'m str, &'m Response> {
            map.into_iter()
                .flatten()
                .map(|(k, v)| (k.as_str(), v))
                .collect()
        }
        let (left, right) = (by_code(left), by_code(right));
        self.diff_named_group(&left, &right)
    }

    fn diff_named_group<T: Extensible>(
        &self,
        left: &IndexMap<&str, &T>,
        right: &IndexMap<&str, &T>,
    ) -> ChangedExtensionGroup {
        let mut group = ChangedExtensionGroup::new();
        let keys = diff_keys(Some(left), Some(right));

        for (name, entity) in keys.increased {
            put_if_diff(&mut group, name, self.diff(None, Some(*entity)));
        }
        for (name, entity) in keys.missing {
            put_if_diff(&mut group, name, self.diff(Some(*entity), None));
        }
        for name in keys.shared_keys {
            let sub = self.diff(left.get(name).copied(), right.get(name).copied());
            put_if_diff(&mut group, name, sub);
        }
        group
    }
}

fn put_if_diff(group: &mut ChangedExtensionGroup, name: &str, sub: ChangedExtensionGroup) {
    if sub.is_diff() {
        group.put_sub_group(name, sub);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Info;
    use serde_json::json;

    fn info_with(ext: &[(&str, Value)]) -> Info {
        let mut info = Info::new("Petstore", "1.0");
        for (k, v) in ext {
            info.vendor_extensions.insert((*k).to_string(), v.clone());
        }
        info
    }

    fn tag_with(name: &str, ext: &[(&str, Value)]) -> Tag {
        let mut tag = Tag {
            name: name.to_string(),
            ..Tag::default()
        };
        for (k, v) in ext {
            tag.vendor_extensions.insert((*k).to_string(), v.clone());
        }
        tag
    }

    #[test]
    fn test_disabled_differ_reports_nothing() {
        let differ = VendorExtensionDiffer::default();
        let left = info_with(&[]);
        let right = info_with(&[("x-audience", json!("public"))]);
        assert!(!differ.diff(Some(&left), Some(&right)).is_diff());
    }

    #[test]
    fn test_increased_missing_changed() {
        let differ = VendorExtensionDiffer::new(true);
        let left = info_with(&[("x-a", json!(1)), ("x-b", json!("keep")), ("x-c", json!(true))]);
        let right = info_with(&[("x-b", json!("keep")), ("x-c", json!(false)), ("x-d", json!([]))]);
        let group = differ.diff(Some(&left), Some(&right));

        assert!(group.is_diff_shallow());
        assert_eq!(group.increased.keys().collect::<Vec<_>>(), ["x-d"]);
        assert_eq!(group.missing.keys().collect::<Vec<_>>(), ["x-a"]);
        assert_eq!(group.changed["x-c"].old, json!(true));
        assert_eq!(group.changed["x-c"].new, json!(false));
    }

    #[test]
    fn test_absent_side() {
        let differ = VendorExtensionDiffer::new(true);
        let right = info_with(&[("x-new", json!(1))]);
        let group = differ.diff(None, Some(&right));
        assert_eq!(group.increased.len(), 1);
        assert!(!differ.diff::<Info>(None, None).is_diff());
    }

    #[test]
    fn test_tag_group_sub_groups() {
        let differ = VendorExtensionDiffer::new(true);
        let left = vec![tag_with("pets", &[("x-owner", json!("team-a"))]), tag_with("store", &[])];
        let right = vec![
            tag_with("pets", &[("x-owner", json!("team-b"))]),
            tag_with("store", &[]),
            tag_with("users", &[("x-owner", json!("team-c"))]),
        ];
        let group = differ.diff_tag_group(&left, &right);

        assert!(!group.is_diff_shallow());
        assert!(group.is_diff());
        assert!(group.has_sub_group("pets"));
        assert!(group.has_sub_group("users"));
        assert!(!group.has_sub_group("store"));
        assert_eq!(group.sub_group("users").map(|g| g.increased.len()), Some(1));
    }

    #[test]
    fn test_security_group_sub_groups() {
        let differ = VendorExtensionDiffer::new(true);
        let scheme = |ext: &[(&str, Value)]| {
            let mut definition = SecurityDefinition {
                scheme_type: "oauth2".to_string(),
                ..SecurityDefinition::default()
            };
            for (k, v) in ext {
                definition.vendor_extensions.insert((*k).to_string(), v.clone());
            }
            definition
        };
        let left: IndexMap<String, SecurityDefinition> = [
            ("oauth".to_string(), scheme(&[("x-issuer", json!("a"))])),
            ("legacy".to_string(), scheme(&[("x-sunset", json!(true))])),
        ]
        .into_iter()
        .collect();
        let right: IndexMap<String, SecurityDefinition> = [
            ("oauth".to_string(), scheme(&[("x-issuer", json!("b"))])),
            ("plain".to_string(), scheme(&[])),
        ]
        .into_iter()
        .collect();

        let group = differ.diff_security_group(&left, &right);
        assert!(!group.is_diff_shallow());
        assert!(group.sub_group("oauth").is_some_and(|g| g.changed.contains_key("x-issuer")));
        assert!(group.sub_group("legacy").is_some_and(|g| g.missing.contains_key("x-sunset")));
        assert!(!group.has_sub_group("plain"));

        assert!(!VendorExtensionDiffer::default()
            .diff_security_group(&left, &right)
            .is_diff());
    }

    #[test]
    fn test_response_group_handles_absent_maps() {
        let differ = VendorExtensionDiffer::new(true);
        let mut ok = Response::new("ok");
        ok.vendor_extensions.insert("x-cache".to_string(), json!(60));
        let right: IndexMap<String, Response> = [("200".to_string(), ok)].into_iter().collect();

        let group = differ.diff_response_group(None, Some(&right));
        assert!(group.is_diff());
        assert!(group.has_sub_group("200"));
    }
}
