//! Test utilities for the indexer

use crate::context::AnalysisContext;
use crate::scanner::{MetadataFile, MetadataIndexes, MetadataKind};
use sfgraph_core::STANDARD_OBJECTS;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary metadata tree from `(relative path, content)` pairs
pub fn create_repo_with_structure(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for (path, content) in structure {
        let full_path = root.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&full_path, content).unwrap();
    }

    temp_dir
}

/// Lookups over synthetic indexes, seeded like a real run
pub fn lookups_with(indexes: MetadataIndexes) -> AnalysisContext {
    AnalysisContext::new(indexes, STANDARD_OBJECTS)
}

pub fn metadata_file(kind: MetadataKind, name: &str, path: &str) -> MetadataFile {
    MetadataFile {
        path: PathBuf::from(path),
        kind,
        name: name.to_string(),
    }
}
