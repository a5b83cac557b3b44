use std::path::{Path, PathBuf};

use archgraph_core::ontology::{EdgeCategory, NodeCategory};
use archgraph_core::sink::GraphSink;
use archgraph_core::{
    load_graph, resolve_output_dir, AnalysisConfig, ArchitectureAnalyzer, ArchitectureGraph,
    JsonFileSink, JsonModelSource, ModelSource,
};
use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const REACHABILITY_NOTE: &str = "note: controller attribution follows calls within the same class only; \
dispatches behind calls into other classes are attributed to the calling method";

#[derive(Parser)]
#[command(name = "archgraph")]
#[command(about = "Extract architecture graphs from typed program models", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./archgraph.toml, then the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze program models and write nodes.json / rels.json
    Analyze {
        /// Program model JSON files, one per module
        #[arg(required = true)]
        models: Vec<PathBuf>,

        /// Write a single merged graph here instead of each module's build directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Merge previously written graphs
    Merge {
        /// Directories holding nodes.json / rels.json
        #[arg(required = true)]
        dirs: Vec<PathBuf>,

        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the effective configuration
    Config {
        /// Print the built-in defaults instead
        #[arg(long)]
        default: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Config { default: true } = cli.command {
        print!("{}", AnalysisConfig::default_config_string());
        return Ok(());
    }

    let analyzer =
        ArchitectureAnalyzer::load(cli.config.as_deref()).wrap_err("failed to load configuration")?;

    match cli.command {
        Commands::Analyze { models, out } => analyze(&analyzer, &models, out.as_deref()),
        Commands::Merge { dirs, out } => merge(&dirs, &out),
        Commands::Config { .. } => {
            let text = toml::to_string_pretty(analyzer.config())
                .wrap_err("failed to render configuration")?;
            print!("{text}");
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn analyze(analyzer: &ArchitectureAnalyzer, models: &[PathBuf], out: Option<&Path>) -> Result<()> {
    let mut merged = ArchitectureGraph::new();

    for path in models {
        let source = JsonModelSource::new(path);
        let model = source
            .load()
            .wrap_err_with(|| format!("failed to load {}", source.describe()))?;
        let graph = analyzer.analyze(&model);

        if out.is_some() {
            merged.merge(graph);
            continue;
        }

        let dir = resolve_output_dir(&model.source_files(), &analyzer.config().output);
        write_graph(&graph, &dir)?;
        println!("{}: {}", path.display(), summary(&graph));
        println!("  -> {}", dir.display());
    }

    if let Some(dir) = out {
        write_graph(&merged, dir)?;
        println!("{}", summary(&merged));
        println!("  -> {}", dir.display());
    }

    println!("{REACHABILITY_NOTE}");
    Ok(())
}

fn merge(dirs: &[PathBuf], out: &Path) -> Result<()> {
    let mut merged = ArchitectureGraph::new();
    for dir in dirs {
        let graph = load_graph(dir).wrap_err_with(|| format!("failed to read graph from {}", dir.display()))?;
        info!(dir = %dir.display(), nodes = graph.nodes().len(), "graph loaded");
        merged.merge(graph);
    }

    let dangling = merged.dangling_relationships().len();
    if dangling > 0 {
        warn!(dangling, "merged graph has relationships without endpoints");
    }

    write_graph(&merged, out)?;
    println!("{}", summary(&merged));
    println!("  -> {}", out.display());
    Ok(())
}

fn write_graph(graph: &ArchitectureGraph, dir: &Path) -> Result<()> {
    JsonFileSink::new(dir)
        .write(graph.nodes(), graph.relationships())
        .wrap_err_with(|| format!("failed to write graph to {}", dir.display()))?;
    debug!(dir = %dir.display(), "graph written\n{}", graph.stats());
    Ok(())
}

/// Totals, then the non-empty node and edge categories.
fn summary(graph: &ArchitectureGraph) -> String {
    let stats = graph.stats();
    let nodes: Vec<String> = NodeCategory::ALL
        .iter()
        .map(|c| (c.label(), stats.nodes_in(*c)))
        .filter(|(_, n)| *n > 0)
        .map(|(label, n)| format!("{label} {n}"))
        .collect();
    let edges: Vec<String> = EdgeCategory::ALL
        .iter()
        .map(|c| (c.label(), stats.relationships_in(*c)))
        .filter(|(_, n)| *n > 0)
        .map(|(label, n)| format!("{label} {n}"))
        .collect();

    let mut line = format!(
        "{} nodes, {} relationships",
        stats.total_nodes, stats.total_relationships
    );
    if !nodes.is_empty() {
        line.push_str(&format!("; nodes: {}", nodes.join(", ")));
    }
    if !edges.is_empty() {
        line.push_str(&format!("; edges: {}", edges.join(", ")));
    }
    line
}
