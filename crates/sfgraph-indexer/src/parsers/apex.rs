//! Apex class and trigger extractor
//!
//! Pattern-based, not a grammar: DML and SOQL object access, typed
//! declarations of custom objects, constructor calls, `Flow.Interview`
//! references, and for triggers the `trigger X on Object` header.

use super::{push_unique, SOBJECT_TOKEN};
use crate::error::ExtractError;
use crate::extractor::{ExtractionResult, Lookups, MetadataExtractor};
use crate::scanner::{MetadataFile, MetadataKind};
use regex::Regex;
use sfgraph_core::{component_id, Component, ComponentType, Dependency, EdgeType};
use std::sync::LazyLock;

static DML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i:\b(?:insert|update|delete|upsert))\s+({SOBJECT_TOKEN})\b"))
        .expect("valid regex")
});

static SOQL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i:\bfrom)\s+({SOBJECT_TOKEN})\b")).expect("valid regex")
});

static TYPE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z][A-Za-z0-9_]*__(?:c|mdt))\b").expect("valid regex")
});

static INSTANTIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bnew\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("valid regex")
});

static TRIGGER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:\btrigger)\s+\w+\s+(?i:on)\s+(\w+)").expect("valid regex")
});

static FLOW_INTERVIEW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bFlow\.Interview\.(?:createInterview\s*\(\s*'([A-Za-z_][A-Za-z0-9_]*)'|([A-Za-z_][A-Za-z0-9_]*))",
    )
    .expect("valid regex")
});

/// Built-in types whose constructors never point at metadata.
const BUILTIN_TYPES: [&str; 11] = [
    "String", "Integer", "List", "Set", "Map", "Date", "Datetime", "Boolean", "Decimal", "Long",
    "Double",
];

/// Words that open a SOQL clause after a SELECT-list field.
const SOQL_CLAUSES: [&str; 7] = ["from", "where", "order", "group", "limit", "offset", "having"];

/// How a file touches an object. DML wins over SOQL for the same object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Dml,
    Soql,
}

impl Access {
    fn source(self) -> &'static str {
        match self {
            Access::Dml => "dml",
            Access::Soql => "soql",
        }
    }
}

/// Per-file object-access record in first-seen order.
#[derive(Debug, Default)]
struct ObjectAccess {
    entries: Vec<(String, Access)>,
}

impl ObjectAccess {
    fn record(&mut self, object: String, access: Access) {
        match self.entries.iter_mut().find(|(name, _)| *name == object) {
            Some(entry) if access == Access::Dml => entry.1 = Access::Dml,
            Some(_) => {}
            None => self.entries.push((object, access)),
        }
    }

    fn contains(&self, object: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == object)
    }
}

pub struct ApexParser;

impl ApexParser {
    fn object_access(content: &str, lookups: &dyn Lookups) -> ObjectAccess {
        let mut access = ObjectAccess::default();
        for cap in DML.captures_iter(content) {
            access.record(lookups.resolve(&cap[1]), Access::Dml);
        }
        for cap in SOQL.captures_iter(content) {
            access.record(lookups.resolve(&cap[1]), Access::Soql);
        }
        access
    }

    /// Custom object / custom metadata types in declaration position.
    fn type_references(content: &str, lookups: &dyn Lookups, covered: &ObjectAccess) -> Vec<String> {
        let mut objects = Vec::new();
        for m in TYPE_TOKEN.find_iter(content) {
            if content[..m.start()].ends_with('.') {
                continue;
            }
            let rest = &content[m.end()..];
            if !is_declaration_position(rest) || starts_with_soql_clause(rest) {
                continue;
            }
            let object = lookups.resolve(m.as_str());
            if covered.contains(&object) {
                continue;
            }
            push_unique(&mut objects, object);
        }
        objects
    }

    fn instantiations(content: &str) -> Vec<&str> {
        let mut names = Vec::new();
        for cap in INSTANTIATION.captures_iter(content) {
            let name = cap.get(1).map_or("", |m| m.as_str());
            if BUILTIN_TYPES.contains(&name) {
                continue;
            }
            push_unique(&mut names, name);
        }
        names
    }

    fn flow_references<'c>(content: &'c str, lookups: &dyn Lookups) -> Vec<&'c str> {
        let mut flows = Vec::new();
        for cap in FLOW_INTERVIEW.captures_iter(content) {
            let Some(name) = cap.get(1).or_else(|| cap.get(2)).map(|m| m.as_str()) else {
                continue;
            };
            if lookups.is_flow_name(name) {
                push_unique(&mut flows, name);
            }
        }
        flows
    }
}

/// The token is followed by a generic bracket, a constructor paren or a
/// lowercase identifier.
fn is_declaration_position(rest: &str) -> bool {
    match rest.trim_start().chars().next() {
        Some('<' | '>' | '(') => true,
        Some(c) => c.is_ascii_lowercase(),
        None => false,
    }
}

fn starts_with_soql_clause(rest: &str) -> bool {
    let trimmed = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    let word: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    SOQL_CLAUSES.contains(&word.to_ascii_lowercase().as_str())
}

impl MetadataExtractor for ApexParser {
    fn extract(
        &self,
        file: &MetadataFile,
        content: &str,
        lookups: &dyn Lookups,
    ) -> Result<ExtractionResult, ExtractError> {
        let component_type = file.kind.component_type();
        let component = Component::new(component_type, file.name.as_str(), &file.path);
        let from = component.id.as_str();
        let mut dependencies = Vec::new();

        if file.kind == MetadataKind::ApexTrigger {
            if let Some(cap) = TRIGGER_HEADER.captures(content) {
                let object = lookups.resolve(&cap[1]);
                dependencies.push(
                    Dependency::new(from, component_id(ComponentType::CustomObject, &object), EdgeType::TriggersOn)
                        .weighted(),
                );
            }
        }

        let access = Self::object_access(content, lookups);
        for (object, kind) in &access.entries {
            dependencies.push(
                Dependency::new(from, component_id(ComponentType::CustomObject, object), EdgeType::Uses)
                    .with_source(kind.source())
                    .weighted(),
            );
        }

        for object in Self::type_references(content, lookups, &access) {
            dependencies.push(
                Dependency::new(from, component_id(ComponentType::CustomObject, &object), EdgeType::References)
                    .with_source("type_reference")
                    .weighted(),
            );
        }

        for name in Self::instantiations(content) {
            let dependency = if lookups.is_object_name(name) {
                let object = lookups.resolve(name);
                Dependency::new(from, component_id(ComponentType::CustomObject, &object), EdgeType::Uses)
                    .with_source("sobject_instantiation")
            } else if lookups.accepts_apex_class(name) {
                Dependency::new(from, component_id(ComponentType::ApexClass, name), EdgeType::Uses)
                    .with_source("instantiation")
            } else {
                continue;
            };
            dependencies.push(dependency.weighted());
        }

        for flow in Self::flow_references(content, lookups) {
            dependencies.push(
                Dependency::new(from, component_id(ComponentType::Flow, flow), EdgeType::Uses)
                    .with_source("flow_interview")
                    .weighted(),
            );
        }

        Ok(ExtractionResult { component, dependencies })
    }
}
