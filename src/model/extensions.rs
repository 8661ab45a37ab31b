//! Vendor extension (`x-*`) storage shared by every extensible Swagger entity.

use indexmap::IndexMap;
use serde_json::Value;

/// Ordered `x-*` key/value pairs attached to an entity.
pub type VendorExtensions = IndexMap<String, Value>;

/// Returns true for keys that carry vendor extension data.
#[must_use]
pub fn is_vendor_extension(key: &str) -> bool {
    key.starts_with("x-")
}

/// Entities that may carry vendor extensions.
pub trait Extensible {
    fn vendor_extensions(&self) -> &VendorExtensions;
}

macro_rules! impl_extensible {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Extensible for $ty {
                fn vendor_extensions(&self) -> &VendorExtensions {
                    &self.vendor_extensions
                }
            }
        )+
    };
}

impl_extensible!(
    super::Specification,
    super::Info,
    super::Tag,
    super::SecurityDefinition,
    super::Path,
    super::Operation,
    super::Response,
    super::Parameter,
    super::Model,
    super::Property,
);
