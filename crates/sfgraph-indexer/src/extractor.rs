//! Extractor trait and the name-lookup capability threaded into every call

use crate::error::ExtractError;
use crate::scanner::MetadataFile;
use sfgraph_core::{Component, Dependency};

/// One file's contribution to the graph.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub component: Component,
    pub dependencies: Vec<Dependency>,
}

/// Name-resolution predicates backed by the registry and the scan indexes.
///
/// Extractors only see this trait, so tests can hand them synthetic indexes.
pub trait Lookups {
    /// Canonical casing for an object name, registering it if unseen.
    fn resolve(&self, name: &str) -> String;

    /// Registered object (any casing) that is not also a known field name.
    fn is_object_name(&self, name: &str) -> bool;

    fn is_apex_class(&self, name: &str) -> bool;

    fn is_field_name(&self, name: &str) -> bool;

    fn is_flow_name(&self, name: &str) -> bool;

    /// Whether `is_apex_class` is backed by a real index. When it is not,
    /// extractors keep every candidate class instead of filtering.
    fn has_class_index(&self) -> bool {
        true
    }

    /// `is_apex_class`, or `true` when no class index is available.
    fn accepts_apex_class(&self, name: &str) -> bool {
        !self.has_class_index() || self.is_apex_class(name)
    }
}

/// Turns one metadata file into a component and its outgoing edges.
pub trait MetadataExtractor: Send + Sync {
    fn extract(
        &self,
        file: &MetadataFile,
        content: &str,
        lookups: &dyn Lookups,
    ) -> Result<ExtractionResult, ExtractError>;
}
