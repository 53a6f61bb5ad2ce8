//! Analysis orchestrator
//!
//! scan → seed the registry → extract every file in scan order → build the
//! graph and per-type stats. One file is fully processed before the next
//! starts; the optional progress sink is the only suspension point.

use crate::config::AnalyzerConfig;
use crate::context::AnalysisContext;
use crate::error::{ExtractError, Result};
use crate::extractor::ExtractionResult;
use crate::parsers::get_extractor;
use crate::scanner::{MetadataFile, MetadataKind, Scanner};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sfgraph_core::{ComponentType, DependencyGraph, GraphBuilder};
use std::collections::BTreeMap;
use std::fs;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static TEST_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@\s*istest").expect("valid regex"));

/// Pending work a progress sink hands back; the analyzer awaits it before
/// moving to the next file.
pub type ProgressFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Receives `(processed, total)` after every file, at 0 and at completion.
pub trait ProgressSink {
    fn report(&mut self, processed: usize, total: usize) -> Option<ProgressFuture>;
}

impl<F> ProgressSink for F
where
    F: FnMut(usize, usize) -> Option<ProgressFuture>,
{
    fn report(&mut self, processed: usize, total: usize) -> Option<ProgressFuture> {
        self(processed, total)
    }
}

/// Summary counts over the built graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub total_components: usize,
    pub components_by_type: BTreeMap<ComponentType, usize>,
    pub total_dependencies: usize,
}

impl AnalysisStats {
    fn of(graph: &DependencyGraph) -> Self {
        Self {
            total_components: graph.component_count(),
            components_by_type: graph.counts_by_type(),
            total_dependencies: graph.dependency_count(),
        }
    }
}

/// Output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub graph: DependencyGraph,
    pub stats: AnalysisStats,
}

/// Runs analyses with a fixed configuration. Holds no per-run state.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Analyze the metadata tree under `root`.
    ///
    /// Only a failure to walk the tree is returned as an error; files that
    /// cannot be read or parsed are logged and left out of the graph.
    pub fn analyze(&self, root: &Path) -> Result<AnalysisResult> {
        let mut run = self.start(root)?;
        for index in 0..run.files.len() {
            run.step(index);
        }
        Ok(run.finish())
    }

    /// [`Analyzer::analyze`], reporting progress to `progress` and awaiting
    /// any future it returns before continuing.
    pub async fn analyze_with_progress<P>(&self, root: &Path, mut progress: P) -> Result<AnalysisResult>
    where
        P: ProgressSink,
    {
        let mut run = self.start(root)?;
        let total = run.files.len();

        if let Some(pending) = progress.report(0, total) {
            pending.await;
        }
        for index in 0..total {
            run.step(index);
            if let Some(pending) = progress.report(index + 1, total) {
                pending.await;
            }
        }

        Ok(run.finish())
    }

    fn start(&self, root: &Path) -> Result<Run> {
        let scan = Scanner::new()
            .follow_links(self.config.follow_links)
            .scan(root)?;
        let context = AnalysisContext::new(scan.indexes, &self.config.standard_objects);
        debug!("Registry seeded with {} object names", context.registry().len());

        Ok(Run {
            files: scan.files,
            context,
            builder: GraphBuilder::new(),
            skip_test_classes: self.config.skip_test_classes,
            skipped: 0,
            failed: 0,
        })
    }
}

/// State for one analysis run.
struct Run {
    files: Vec<MetadataFile>,
    context: AnalysisContext,
    builder: GraphBuilder,
    skip_test_classes: bool,
    skipped: usize,
    failed: usize,
}

impl Run {
    fn step(&mut self, index: usize) {
        let file = &self.files[index];
        match extract_file(file, &self.context, self.skip_test_classes) {
            Ok(Some(extraction)) => {
                self.builder.add_component(extraction.component);
                for dependency in extraction.dependencies {
                    self.builder.add_dependency(dependency);
                }
            }
            Ok(None) => self.skipped += 1,
            Err(e) => {
                warn!("Skipping {}: {}", file.path.display(), e);
                self.failed += 1;
            }
        }
    }

    fn finish(self) -> AnalysisResult {
        let graph = self.builder.build();
        let stats = AnalysisStats::of(&graph);
        info!(
            "Analysis complete: {} components, {} dependencies ({} test classes skipped, {} files failed)",
            stats.total_components, stats.total_dependencies, self.skipped, self.failed
        );
        AnalysisResult { graph, stats }
    }
}

/// Read and extract one file. `Ok(None)` means the file was gated out.
fn extract_file(
    file: &MetadataFile,
    context: &AnalysisContext,
    skip_test_classes: bool,
) -> Result<Option<ExtractionResult>, ExtractError> {
    let content = fs::read_to_string(&file.path).map_err(|source| ExtractError::Io {
        path: file.path.clone(),
        source,
    })?;

    if skip_test_classes && file.kind == MetadataKind::ApexClass && TEST_ANNOTATION.is_match(&content) {
        debug!("Skipping test class {}", file.name);
        return Ok(None);
    }

    debug!("Extracting {:?} {}", file.kind, file.path.display());
    get_extractor(file.kind).extract(file, &content, context).map(Some)
}

/// Analyze `root` with the default configuration.
pub fn analyze(root: &Path) -> Result<AnalysisResult> {
    Analyzer::default().analyze(root)
}
