//! CustomObject extractor
//!
//! Reads the object XML for its label/description, relationship fields and
//! formula fields. Formulas are scanned for object-looking tokens rather than
//! parsed, so they both over- and under-match.

use super::push_unique;
use crate::error::ExtractError;
use crate::extractor::{ExtractionResult, Lookups, MetadataExtractor};
use crate::scanner::MetadataFile;
use regex::Regex;
use serde::Deserialize;
use sfgraph_core::{component_id, Component, ComponentType, Dependency, EdgeType};
use std::sync::LazyLock;

static FORMULA_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][A-Za-z0-9_]*__c|Account|Contact|Opportunity)\b").expect("valid regex")
});

const RELATIONSHIP_TYPES: [&str; 2] = ["Lookup", "MasterDetail"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomObjectDoc {
    label: Option<String>,
    description: Option<String>,
    #[serde(default)]
    fields: Vec<FieldDoc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldDoc {
    full_name: Option<String>,
    #[serde(rename = "type")]
    field_type: Option<String>,
    #[serde(default)]
    reference_to: Vec<String>,
    formula: Option<String>,
}

pub struct CustomObjectParser;

impl MetadataExtractor for CustomObjectParser {
    fn extract(
        &self,
        file: &MetadataFile,
        content: &str,
        lookups: &dyn Lookups,
    ) -> Result<ExtractionResult, ExtractError> {
        let doc: CustomObjectDoc =
            quick_xml::de::from_str(content).map_err(|source| ExtractError::Xml {
                path: file.path.clone(),
                source,
            })?;

        let component = Component::new(ComponentType::CustomObject, file.name.as_str(), &file.path)
            .with_label(doc.label)
            .with_description(doc.description);
        let from = component.id.clone();
        let mut dependencies = Vec::new();

        for field in &doc.fields {
            let field_name = field.full_name.as_deref().unwrap_or_default();

            if let Some(kind) = field
                .field_type
                .as_deref()
                .filter(|t| RELATIONSHIP_TYPES.contains(t))
            {
                for target in &field.reference_to {
                    let to = component_id(ComponentType::CustomObject, &lookups.resolve(target.trim()));
                    dependencies.push(
                        Dependency::new(from.as_str(), to, EdgeType::References)
                            .with_meta("fieldName", field_name)
                            .with_meta("relationshipType", kind)
                            .weighted(),
                    );
                }
            }

            if let Some(formula) = field.formula.as_deref().filter(|f| !f.trim().is_empty()) {
                let mut tokens = Vec::new();
                for cap in FORMULA_TOKEN.captures_iter(formula) {
                    push_unique(&mut tokens, cap[1].to_string());
                }
                for token in tokens {
                    let to = component_id(ComponentType::CustomObject, &lookups.resolve(&token));
                    dependencies.push(
                        Dependency::new(from.as_str(), to, EdgeType::References)
                            .with_meta("fieldName", field_name)
                            .with_source("formula")
                            .weighted(),
                    );
                }
            }
        }

        tracing::debug!("{}: {} relationship edges", component.id, dependencies.len());
        Ok(ExtractionResult { component, dependencies })
    }
}
