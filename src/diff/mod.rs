//! Structural diff engine for Swagger 2.0 documents.
//!
//! The engine compares two [`Specification`](crate::model::Specification)
//! trees and classifies every difference as either contract-breaking or
//! cosmetic (documentation-only).
//!
//! # Architecture
//!
//! Comparison is layered, each level delegating to the one below:
//!
//! - [`SpecificationDiffEngine`]: paths, document extensions, info metadata
//! - [`OperationDiffEngine`]: methods of one path
//! - [`ParameterDiffEngine`] and [`PropertyDiffEngine`]: request parameters
//!   and the success response schema
//! - [`ModelDiffEngine`]: model properties, following `$ref` links with a
//!   cycle guard
//!
//! Map comparisons go through [`diff_keys`] and vendor extensions through
//! [`VendorExtensionDiffer`], which is inert unless enabled.
//!
//! # Example
//!
//! ```ignore
//! use swagger_diff::diff::SpecificationDiffEngine;
//!
//! let engine = SpecificationDiffEngine::new().with_extensions(true);
//! let result = engine.diff(&old_spec, &new_spec)?;
//!
//! if result.has_contract_changes() {
//!     println!("{} endpoints changed", result.changed_endpoints.len());
//! }
//! ```

mod engine;
mod extensions;
mod key_set;
mod model;
mod operation;
mod parameter;
mod property;
mod result;
pub mod traits;

pub use engine::{
    SpecificationDiffEngine, INFO_GROUP, SECURITY_DEFINITIONS_GROUP, TAGS_GROUP,
};
pub use extensions::{ChangedExtensionGroup, ExtensionChange, VendorExtensionDiffer};
pub use key_set::{diff_keys, KeySetDiff};
pub use model::{has_only_cosmetic_changes, ModelDiffEngine};
pub use operation::{OperationDiffEngine, RESPONSES_GROUP};
pub use parameter::ParameterDiffEngine;
pub use property::{PropertyDiffEngine, RESPONSE_PARENT};
pub use result::{
    ChangedEndpoint, ChangedOperation, ChangedParameter, ElProperty, Endpoint, ModelDiffResult,
    OperationsDiffResult, ParameterDiffResult, PropertyDiffResult, SpecificationDiffResult,
};
pub use traits::{Changed, Classification};
