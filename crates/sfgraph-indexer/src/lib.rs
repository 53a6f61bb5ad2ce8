//! Metadata scanning, extraction and analysis

pub mod analyzer;
pub mod config;
pub mod context;
pub mod error;
pub mod extractor;
pub mod parsers;
pub mod scanner;

#[cfg(test)]
pub mod test_utils;

pub use analyzer::{analyze, AnalysisResult, AnalysisStats, Analyzer, ProgressFuture, ProgressSink};
pub use config::AnalyzerConfig;
pub use context::AnalysisContext;
pub use error::{ConfigError, ExtractError, IndexerError, Result, ScanError};
pub use extractor::{ExtractionResult, Lookups, MetadataExtractor};
pub use scanner::{scan, MetadataFile, MetadataIndexes, MetadataKind, ScanResult, Scanner};
