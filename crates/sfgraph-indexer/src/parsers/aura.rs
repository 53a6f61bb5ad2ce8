//! Aura component / application extractor

use super::push_unique;
use crate::error::ExtractError;
use crate::extractor::{ExtractionResult, Lookups, MetadataExtractor};
use crate::scanner::MetadataFile;
use regex::Regex;
use sfgraph_core::{component_id, Component, ComponentType, Dependency, EdgeType};
use std::sync::LazyLock;

static CONTROLLER_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:controller|provider)\s*=\s*["']([^"']+)["']"#).expect("valid regex")
});

pub struct AuraParser;

impl MetadataExtractor for AuraParser {
    fn extract(
        &self,
        file: &MetadataFile,
        content: &str,
        lookups: &dyn Lookups,
    ) -> Result<ExtractionResult, ExtractError> {
        let component = Component::new(ComponentType::AuraComponent, file.name.as_str(), &file.path);

        // `controller` and `provider` naming the same class yield one edge.
        let mut classes = Vec::new();
        for cap in CONTROLLER_ATTR.captures_iter(content) {
            let class = cap.get(1).map_or("", |m| m.as_str().trim());
            if !class.is_empty() && lookups.accepts_apex_class(class) {
                push_unique(&mut classes, class);
            }
        }

        let dependencies = classes
            .into_iter()
            .map(|class| {
                Dependency::new(component.id.as_str(), component_id(ComponentType::ApexClass, class), EdgeType::Uses)
                    .with_source("aura_controller")
                    .weighted()
            })
            .collect();

        Ok(ExtractionResult { component, dependencies })
    }
}
