//! Specification-level diff engine.

use super::extensions::VendorExtensionDiffer;
use super::key_set::diff_keys;
use super::model::ModelDiffEngine;
use super::operation::OperationDiffEngine;
use super::parameter::ParameterDiffEngine;
use super::property::PropertyDiffEngine;
use super::result::{ChangedEndpoint, Endpoint, SpecificationDiffResult};
use super::traits::{Changed, Classification};
use crate::error::{ErrorContext, Result, SwaggerDiffError};
use crate::model::{HttpMethod, Info, Operation, Path, Specification};
use crate::parsers::parse_spec;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::path::Path as FsPath;
use tracing::debug;

/// Sub-group names under the root extension group.
pub const INFO_GROUP: &str = "info";
pub const TAGS_GROUP: &str = "tags";
pub const SECURITY_DEFINITIONS_GROUP: &str = "securityDefinitions";

/// Diff engine for comparing two Swagger specifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificationDiffEngine {
    extensions: VendorExtensionDiffer,
}

/// Outcome of comparing one path present in both documents.
struct PathOutcome {
    endpoint: ChangedEndpoint,
    new_endpoints: Vec<Endpoint>,
    missing_endpoints: Vec<Endpoint>,
    classification: Classification,
}

impl SpecificationDiffEngine {
    /// Create an engine with vendor extension diffing disabled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable vendor extension diffing
    #[must_use]
    pub fn with_extensions(mut self, enabled: bool) -> Self {
        self.extensions = VendorExtensionDiffer::new(enabled);
        self
    }

    #[must_use]
    pub fn extensions_enabled(&self) -> bool {
        self.extensions.is_enabled()
    }

    /// Compare two optional specifications, failing if either is absent.
    pub fn diff_optional(
        &self,
        old: Option<&Specification>,
        new: Option<&Specification>,
    ) -> Result<SpecificationDiffResult> {
        match (old, new) {
            (Some(old), Some(new)) => self.diff(old, new),
            (None, _) => Err(SwaggerDiffError::invalid_argument(
                "cannot diff: old specification is absent",
            )),
            (_, None) => Err(SwaggerDiffError::invalid_argument(
                "cannot diff: new specification is absent",
            )),
        }
    }

    /// Parse two documents from disk and compare them.
    ///
    /// Parse failures carry the path of the offending document as context.
    pub fn diff_files(&self, old_path: &FsPath, new_path: &FsPath) -> Result<SpecificationDiffResult> {
        let old = parse_spec(old_path)
            .with_context(|| format!("parsing old specification {}", old_path.display()))?;
        let new = parse_spec(new_path)
            .with_context(|| format!("parsing new specification {}", new_path.display()))?;
        self.diff(&old, &new)
    }

    /// Compare two specifications and return the diff result
    pub fn diff(&self, old: &Specification, new: &Specification) -> Result<SpecificationDiffResult> {
        let mut result = SpecificationDiffResult::new();
        result.old_version = old.version().map(str::to_string);
        result.new_version = new.version().map(str::to_string);

        // Quick check: if content hashes match, the documents are identical
        let (old_hash, new_hash) = rayon::join(|| old.content_hash(), || new.content_hash());
        if old_hash == new_hash && old_hash != 0 {
            debug!("Content hashes match, skipping structural diff");
            return Ok(result);
        }

        let mut classification = Classification::new();
        let paths = diff_keys(Some(&old.paths), Some(&new.paths));

        for (url, path) in &paths.increased {
            result.new_endpoints.extend(endpoints_of(url, &path.operations));
        }
        for (url, path) in &paths.missing {
            result.missing_endpoints.extend(endpoints_of(url, &path.operations));
        }
        if !result.new_endpoints.is_empty() || !result.missing_endpoints.is_empty() {
            classification.mark_contract();
        }

        self.diff_document_extensions(old, new, &mut result, &mut classification);

        debug!(
            shared = paths.shared_keys.len(),
            added = paths.increased.len(),
            removed = paths.missing.len(),
            "Comparing paths"
        );

        let operations = self.operation_engine(old, new);
        let outcomes: Vec<PathOutcome> = paths
            .shared_keys
            .par_iter()
            .filter_map(|url| {
                let (old_path, new_path) = (old.paths.get(*url)?, new.paths.get(*url)?);
                Some(self.diff_path(&operations, url, old_path, new_path))
            })
            .collect();

        for outcome in outcomes {
            classification.merge(outcome.classification);
            result.new_endpoints.extend(outcome.new_endpoints);
            result.missing_endpoints.extend(outcome.missing_endpoints);
            if outcome.endpoint.is_diff() {
                result.changed_endpoints.push(outcome.endpoint);
            }
        }

        result.classification = classification;
        debug!(
            new = result.new_endpoints.len(),
            missing = result.missing_endpoints.len(),
            changed = result.changed_endpoints.len(),
            contract = result.has_contract_changes(),
            cosmetic_only = result.has_only_cosmetic_changes(),
            "Specification diff complete"
        );
        Ok(result)
    }

    fn operation_engine<'a>(
        &self,
        old: &'a Specification,
        new: &'a Specification,
    ) -> OperationDiffEngine<'a> {
        let models = ModelDiffEngine::new(&old.definitions, &new.definitions, self.extensions);
        OperationDiffEngine::new(
            ParameterDiffEngine::new(models, self.extensions),
            PropertyDiffEngine::new(models, self.extensions),
            self.extensions,
        )
    }

    /// Root, info, tag and security definition extensions, plus info metadata.
    fn diff_document_extensions(
        &self,
        old: &Specification,
        new: &Specification,
        result: &mut SpecificationDiffResult,
        classification: &mut Classification,
    ) {
        let mut root = self.extensions.diff(Some(old), Some(new));
        let info = self.extensions.diff(old.info.as_ref(), new.info.as_ref());
        let tags = self.extensions.diff_tag_group(&old.tags, &new.tags);
        let security = self
            .extensions
            .diff_security_group(&old.security_definitions, &new.security_definitions);

        if root.is_diff_shallow() || info.is_diff() || tags.is_diff() || security.is_diff() {
            classification.mark_contract();
        }
        if info_has_changes(old.info.as_ref(), new.info.as_ref()) {
            classification.mark_cosmetic();
        }

        root.put_sub_group(INFO_GROUP, info);
        root.put_sub_group(TAGS_GROUP, tags);
        root.put_sub_group(SECURITY_DEFINITIONS_GROUP, security);
        result.extensions = root;
    }

    fn diff_path<'a>(
        &self,
        operations: &OperationDiffEngine<'a>,
        url: &str,
        old_path: &'a Path,
        new_path: &'a Path,
    ) -> PathOutcome {
        let mut classification = Classification::new();
        let mut endpoint = ChangedEndpoint::new(url);

        endpoint.extensions = self.extensions.diff(Some(old_path), Some(new_path));
        if endpoint.extensions.is_diff() {
            classification.mark_contract();
        }

        let ops = operations.diff(&old_path.operations, &new_path.operations);
        classification.merge(ops.classification);

        let new_endpoints = endpoints_of(url, &ops.increased);
        let missing_endpoints = endpoints_of(url, &ops.missing);
        endpoint.new_operations = ops.increased;
        endpoint.missing_operations = ops.missing;
        endpoint.changed_operations = ops.changed;

        debug!(
            path = url,
            changed = endpoint.changed_operations.len(),
            added = endpoint.new_operations.len(),
            removed = endpoint.missing_operations.len(),
            "Compared path"
        );

        PathOutcome {
            endpoint,
            new_endpoints,
            missing_endpoints,
            classification,
        }
    }
}

/// One endpoint per operation of a path.
fn endpoints_of(url: &str, operations: &IndexMap<HttpMethod, Operation>) -> Vec<Endpoint> {
    operations
        .iter()
        .map(|(method, operation)| Endpoint::new(url, *method, operation))
        .collect()
}

/// Info metadata whose change counts as cosmetic.
fn info_has_changes(old: Option<&Info>, new: Option<&Info>) -> bool {
    match (old, new) {
        (None, None) => false,
        (Some(old), Some(new)) => {
            old.description != new.description
                || old.version != new.version
                || old.title != new.title
                || old.contact != new.contact
                || old.license != new.license
                || old.terms_of_service != new.terms_of_service
        }
        _ => true,
    }
}
