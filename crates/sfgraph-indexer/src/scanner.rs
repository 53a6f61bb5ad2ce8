//! Metadata tree scanner
//!
//! Walks a source directory once, classifies every file into one of the
//! metadata categories below and builds the per-category name indexes the
//! extractors use to disambiguate bare identifiers.

use crate::error::ScanError;
use ignore::WalkBuilder;
use sfgraph_core::ComponentType;
use std::collections::HashSet;
use std::path::{Component as PathComponent, Path, PathBuf};
use tracing::{debug, info};

const OBJECT_SUFFIX: &str = ".object-meta.xml";
const FIELD_SUFFIX: &str = ".field-meta.xml";
const FLOW_SUFFIX: &str = ".flow-meta.xml";
const META_SUFFIX: &str = "-meta.xml";

/// The metadata categories that become components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    CustomObject,
    ApexClass,
    ApexTrigger,
    Flow,
    LightningWebComponent,
    AuraComponent,
}

impl MetadataKind {
    pub fn component_type(self) -> ComponentType {
        match self {
            MetadataKind::CustomObject => ComponentType::CustomObject,
            MetadataKind::ApexClass => ComponentType::ApexClass,
            MetadataKind::ApexTrigger => ComponentType::ApexTrigger,
            MetadataKind::Flow => ComponentType::Flow,
            MetadataKind::LightningWebComponent => ComponentType::LightningWebComponent,
            MetadataKind::AuraComponent => ComponentType::AuraComponent,
        }
    }
}

/// A file that represents one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFile {
    pub path: PathBuf,
    pub kind: MetadataKind,
    /// Component name derived from the path (parent folder for objects,
    /// stripped file name otherwise).
    pub name: String,
}

/// Known names per category, built in one pass and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataIndexes {
    pub objects: HashSet<String>,
    pub fields: HashSet<String>,
    pub apex_classes: HashSet<String>,
    pub apex_triggers: HashSet<String>,
    pub lwc: HashSet<String>,
    pub aura: HashSet<String>,
    pub flows: HashSet<String>,
}

impl MetadataIndexes {
    fn record(&mut self, kind: MetadataKind, name: &str) {
        let set = match kind {
            MetadataKind::CustomObject => &mut self.objects,
            MetadataKind::ApexClass => &mut self.apex_classes,
            MetadataKind::ApexTrigger => &mut self.apex_triggers,
            MetadataKind::Flow => &mut self.flows,
            MetadataKind::LightningWebComponent => &mut self.lwc,
            MetadataKind::AuraComponent => &mut self.aura,
        };
        set.insert(name.to_string());
    }
}

/// Output of a scan: the component files in walk order plus the indexes.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files: Vec<MetadataFile>,
    pub indexes: MetadataIndexes,
}

/// How a single path was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The file represents a component.
    Component(MetadataKind, String),
    /// The file only contributes a name to the field index.
    Field(String),
}

/// Classify one file. `root` is used to find the `lwc`/`aura` path segments:
/// the root's own name counts, directories above it do not.
///
/// First match wins, in this order: object, Apex class, Apex trigger, flow,
/// LWC main module, Aura markup, field.
pub fn classify(root: &Path, path: &Path) -> Option<Classification> {
    let file_name = path.file_name()?.to_str()?;
    let parent_name = || path.parent()?.file_name()?.to_str();

    if file_name.ends_with(OBJECT_SUFFIX) {
        let object = parent_name()?;
        return Some(Classification::Component(MetadataKind::CustomObject, object.to_string()));
    }
    if let Some(name) = file_name.strip_suffix(".cls") {
        return Some(Classification::Component(MetadataKind::ApexClass, name.to_string()));
    }
    if let Some(name) = file_name.strip_suffix(".trigger") {
        return Some(Classification::Component(MetadataKind::ApexTrigger, name.to_string()));
    }
    if let Some(name) = file_name.strip_suffix(FLOW_SUFFIX) {
        return Some(Classification::Component(MetadataKind::Flow, name.to_string()));
    }
    if let Some(name) = file_name.strip_suffix(".js") {
        if has_segment(root, path, "lwc") && parent_name() == Some(name) {
            return Some(Classification::Component(
                MetadataKind::LightningWebComponent,
                name.to_string(),
            ));
        }
    }
    if has_segment(root, path, "aura") && !file_name.ends_with(META_SUFFIX) {
        if let Some(name) = file_name
            .strip_suffix(".cmp")
            .or_else(|| file_name.strip_suffix(".app"))
        {
            return Some(Classification::Component(MetadataKind::AuraComponent, name.to_string()));
        }
    }
    if let Some(name) = file_name.strip_suffix(FIELD_SUFFIX) {
        return Some(Classification::Field(name.to_string()));
    }
    None
}

/// Whether the root itself, or any directory between it and the file, is
/// named `segment`.
fn has_segment(root: &Path, path: &Path, segment: &str) -> bool {
    if root.file_name().is_some_and(|name| name == segment) {
        return true;
    }
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .parent()
        .map(|dir| {
            dir.components()
                .any(|c| matches!(c, PathComponent::Normal(s) if s == segment))
        })
        .unwrap_or(false)
}

/// Directory walker for metadata trees.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    follow_links: bool,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    /// Visit every file under `root` once. Any listing error aborts the scan.
    pub fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::MissingRoot(root.to_path_buf()));
        }

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(self.follow_links)
            .build();

        let mut result = ScanResult::default();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.into_path();

            match classify(root, &path) {
                Some(Classification::Component(kind, name)) => {
                    debug!("Classified {} as {:?} ({})", path.display(), kind, name);
                    result.indexes.record(kind, &name);
                    result.files.push(MetadataFile { path, kind, name });
                }
                Some(Classification::Field(name)) => {
                    result.indexes.fields.insert(name);
                }
                None => {}
            }
        }

        info!(
            "Scanned {}: {} metadata files, {} objects, {} classes, {} fields",
            root.display(),
            result.files.len(),
            result.indexes.objects.len(),
            result.indexes.apex_classes.len(),
            result.indexes.fields.len()
        );
        Ok(result)
    }
}

/// Scan with default options.
pub fn scan(root: &Path) -> Result<ScanResult, ScanError> {
    Scanner::new().scan(root)
}
