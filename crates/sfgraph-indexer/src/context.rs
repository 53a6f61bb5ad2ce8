//! Per-run lookup state shared by every extractor call

use crate::extractor::Lookups;
use crate::scanner::MetadataIndexes;
use sfgraph_core::ObjectRegistry;

/// Object registry plus the scan indexes for one analysis run.
///
/// Built fresh by every run, so concurrent runs never see each other's names.
#[derive(Debug)]
pub struct AnalysisContext {
    registry: ObjectRegistry,
    indexes: MetadataIndexes,
}

impl AnalysisContext {
    /// Seed the registry with `standard_objects`, then every indexed object.
    pub fn new<I, S>(indexes: MetadataIndexes, standard_objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = ObjectRegistry::new();
        registry.seed(standard_objects);
        registry.seed(&indexes.objects);
        Self { registry, indexes }
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }
}

impl Lookups for AnalysisContext {
    fn resolve(&self, name: &str) -> String {
        self.registry.resolve(name)
    }

    fn is_object_name(&self, name: &str) -> bool {
        self.registry.contains(name) && !self.indexes.fields.contains(name)
    }

    fn is_apex_class(&self, name: &str) -> bool {
        self.indexes.apex_classes.contains(name)
    }

    fn is_field_name(&self, name: &str) -> bool {
        self.indexes.fields.contains(name)
    }

    fn is_flow_name(&self, name: &str) -> bool {
        self.indexes.flows.contains(name)
    }
}
