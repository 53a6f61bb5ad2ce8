//! Core data structures for the metadata dependency graph

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::weight::calculate_weight;

/// Discriminates what kind of Salesforce artifact a component represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentType {
    // ── Declarative ─────────────────────────────────────────
    CustomObject,
    CustomField,
    Flow,
    ValidationRule,
    Layout,
    PermissionSet,
    Profile,

    // ── Code ────────────────────────────────────────────────
    ApexClass,
    ApexTrigger,
    LightningWebComponent,
    AuraComponent,

    // ── Fallback (placeholders with an unrecognised id prefix) ──
    Unknown,
}

impl ComponentType {
    pub const ALL: [ComponentType; 12] = [
        ComponentType::CustomObject,
        ComponentType::CustomField,
        ComponentType::Flow,
        ComponentType::ValidationRule,
        ComponentType::Layout,
        ComponentType::PermissionSet,
        ComponentType::Profile,
        ComponentType::ApexClass,
        ComponentType::ApexTrigger,
        ComponentType::LightningWebComponent,
        ComponentType::AuraComponent,
        ComponentType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::CustomObject => "CustomObject",
            ComponentType::CustomField => "CustomField",
            ComponentType::Flow => "Flow",
            ComponentType::ValidationRule => "ValidationRule",
            ComponentType::Layout => "Layout",
            ComponentType::PermissionSet => "PermissionSet",
            ComponentType::Profile => "Profile",
            ComponentType::ApexClass => "ApexClass",
            ComponentType::ApexTrigger => "ApexTrigger",
            ComponentType::LightningWebComponent => "LightningWebComponent",
            ComponentType::AuraComponent => "AuraComponent",
            ComponentType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an id prefix names no known component type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component type: {0}")]
pub struct UnknownComponentType(pub String);

impl FromStr for ComponentType {
    type Err = UnknownComponentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownComponentType(s.to_string()))
    }
}

/// What kind of relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    Uses,
    References,
    TriggersOn,
    Contains,
    Extends,
    Implements,
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeType::Uses => write!(f, "uses"),
            EdgeType::References => write!(f, "references"),
            EdgeType::TriggersOn => write!(f, "triggers_on"),
            EdgeType::Contains => write!(f, "contains"),
            EdgeType::Extends => write!(f, "extends"),
            EdgeType::Implements => write!(f, "implements"),
        }
    }
}

/// Build the globally unique `<type>:<name>` id.
pub fn component_id(kind: ComponentType, name: &str) -> String {
    format!("{}:{}", kind, name)
}

/// Split an id on its first `:` into a type and a name.
///
/// Ids without a colon, or with a prefix that names no known type, come back
/// as `Unknown`. For a colon-less id the whole id is the name.
pub fn split_id(id: &str) -> (ComponentType, &str) {
    match id.split_once(':') {
        Some((prefix, name)) => (prefix.parse().unwrap_or(ComponentType::Unknown), name),
        None => (ComponentType::Unknown, id),
    }
}

/// One discovered metadata artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub file_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Component {
    pub fn new(kind: ComponentType, name: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            id: component_id(kind, &name),
            name,
            kind,
            file_path: file_path.into(),
            label: None,
            description: None,
            namespace: None,
        }
    }

    /// Minimal node synthesized for an edge endpoint nobody declared.
    pub fn placeholder(id: &str) -> Self {
        let (kind, name) = split_id(id);
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            file_path: PathBuf::new(),
            label: None,
            description: None,
            namespace: None,
        }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// A directed, typed and weighted reference between two components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: EdgeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u8>,
    /// Extraction provenance (`source`, `fieldName`, `relationshipType`, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Dependency {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: EdgeType) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            weight: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Tag the edge with its extraction source.
    pub fn with_source(self, source: &str) -> Self {
        self.with_meta("source", source)
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get("source").map(String::as_str)
    }

    /// Score the edge from the types encoded in its endpoint ids.
    pub fn weighted(mut self) -> Self {
        let (from_type, _) = split_id(&self.from);
        let (to_type, _) = split_id(&self.to);
        self.weight = Some(calculate_weight(from_type, to_type, self.kind, self.source()));
        self
    }
}
