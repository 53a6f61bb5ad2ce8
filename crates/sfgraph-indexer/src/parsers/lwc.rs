//! Lightning Web Component extractor

use super::push_unique;
use crate::error::ExtractError;
use crate::extractor::{ExtractionResult, Lookups, MetadataExtractor};
use crate::scanner::MetadataFile;
use regex::Regex;
use sfgraph_core::{component_id, Component, ComponentType, Dependency, EdgeType};
use std::sync::LazyLock;

static APEX_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"from\s+['"]@salesforce/apex/([A-Za-z_][A-Za-z0-9_]*)\."#).expect("valid regex")
});

/// Collects the Apex classes a bundle's main JS imports methods from.
pub struct LwcParser;

impl MetadataExtractor for LwcParser {
    fn extract(
        &self,
        file: &MetadataFile,
        content: &str,
        lookups: &dyn Lookups,
    ) -> Result<ExtractionResult, ExtractError> {
        let component = Component::new(ComponentType::LightningWebComponent, file.name.as_str(), &file.path);

        let mut classes = Vec::new();
        for cap in APEX_IMPORT.captures_iter(content) {
            let class = cap.get(1).map_or("", |m| m.as_str());
            if lookups.accepts_apex_class(class) {
                push_unique(&mut classes, class);
            }
        }

        let dependencies = classes
            .into_iter()
            .map(|class| {
                Dependency::new(component.id.as_str(), component_id(ComponentType::ApexClass, class), EdgeType::Uses)
                    .with_source("lwc_apex_import")
                    .weighted()
            })
            .collect();

        Ok(ExtractionResult { component, dependencies })
    }
}
