//! sfgraph CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sfgraph")]
#[command(about = "Weighted dependency graphs for Salesforce metadata", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Metadata source directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Analyzer config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the source tree and print the graph as JSON
    Analyze {
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print the components with the highest incoming weight
    Hotspots {
        /// Number of components to list
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "sfgraph={log_level},sfgraph_core={log_level},sfgraph_indexer={log_level}"
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("sfgraph v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Analyze { pretty } => {
            commands::analyze(cli.root, cli.config, pretty).await
        }
        Commands::Hotspots { limit } => {
            commands::hotspots(cli.root, cli.config, limit).await
        }
        Commands::Version => {
            println!("sfgraph v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
