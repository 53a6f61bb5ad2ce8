//! Error types for scanning, extraction and configuration

use std::path::PathBuf;

/// Directory walking failed. Always fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to walk metadata tree: {0}")]
    Walk(#[from] ignore::Error),

    #[error("source directory {0} does not exist or is not a directory")]
    MissingRoot(PathBuf),
}

/// A single file could not be turned into a component. Recovered by the
/// analyzer: the file is dropped and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML in {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },
}

/// Analyzer configuration could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid analyzer config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level error returned by an analysis run.
#[derive(Debug, thiserror::Error)]
pub enum IndexerError {
    #[error(transparent)]
    Scan(#[from] ScanError),
}

pub type Result<T, E = IndexerError> = std::result::Result<T, E>;
