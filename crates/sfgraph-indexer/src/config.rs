//! Analyzer configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use sfgraph_core::STANDARD_OBJECTS;

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Object names registered before any file is read
    pub standard_objects: Vec<String>,
    /// Drop Apex classes annotated `@isTest`
    pub skip_test_classes: bool,
    /// Follow symlinks while walking the source tree
    pub follow_links: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            standard_objects: STANDARD_OBJECTS.iter().map(|s| s.to_string()).collect(),
            skip_test_classes: true,
            follow_links: false,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}
