//! CLI command implementations

use anyhow::Context;
use sfgraph_core::GraphView;
use sfgraph_indexer::{AnalysisResult, Analyzer, AnalyzerConfig, ProgressFuture};
use std::path::{Path, PathBuf};

/// Files between progress log lines.
const PROGRESS_EVERY: usize = 100;

pub async fn analyze(root: PathBuf, config: Option<PathBuf>, pretty: bool) -> anyhow::Result<()> {
    let result = run_analysis(&root, config.as_deref()).await?;

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");
    Ok(())
}

pub async fn hotspots(root: PathBuf, config: Option<PathBuf>, limit: usize) -> anyhow::Result<()> {
    let result = run_analysis(&root, config.as_deref()).await?;
    let view = GraphView::new(&result.graph);

    let ranked: Vec<serde_json::Value> = view
        .hotspots(limit)
        .into_iter()
        .map(|(component, weight)| {
            serde_json::json!({
                "id": component.id,
                "type": component.kind,
                "incomingWeight": weight,
                "incomingEdges": view.incoming(&component.id).len(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}

async fn run_analysis(root: &Path, config: Option<&Path>) -> anyhow::Result<AnalysisResult> {
    let config = load_config(config)?;
    tracing::info!("Analyzing metadata in {}", root.display());

    let analyzer = Analyzer::new(config);
    let result = analyzer
        .analyze_with_progress(root, |processed: usize, total: usize| -> Option<ProgressFuture> {
            if processed == total || processed % PROGRESS_EVERY == 0 {
                tracing::info!("Processed {}/{} files", processed, total);
            }
            // Let other tasks on the runtime make progress between files.
            Some(Box::pin(tokio::task::yield_now()))
        })
        .await
        .with_context(|| format!("failed to analyze {}", root.display()))?;

    tracing::info!(
        "Found {} components and {} dependencies",
        result.stats.total_components,
        result.stats.total_dependencies
    );
    Ok(result)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AnalyzerConfig> {
    let Some(path) = path else {
        return Ok(AnalyzerConfig::default());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = AnalyzerConfig::from_toml_str(&source)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}
