use std::path::Path;

use anyhow::{anyhow, Result};
use clap::Parser;

use pcst_subgraph::config::{PruningStrategy, SolverConfig, DEFAULT_TOLERANCE};
use pcst_subgraph::{data, pcst, storage, viz};

#[derive(Parser, Debug)]
#[clap(
    name = "pcst-subgraph",
    about = "Extract the most relevant connected subgraph with a prize-collecting Steiner tree"
)]
struct Cli {
    /// Path to the input graph (.json or .parquet edge list)
    #[clap(long)]
    graph: String,

    /// JSON file mapping node ids to prizes
    #[clap(long, required_unless_present = "queries")]
    prizes: Option<String>,

    /// JSON file with a list of {prizes, root} queries solved in parallel
    #[clap(long, conflicts_with_all = ["prizes", "root"])]
    queries: Option<String>,

    /// Root node; omit for forest mode
    #[clap(long)]
    root: Option<String>,

    /// Pruning strategy applied after growth
    #[clap(long, value_enum, default_value_t = PruningStrategy::Strong)]
    pruning: PruningStrategy,

    /// Tolerance for near-equality comparisons
    #[clap(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Output directory for results
    #[clap(long, default_value = "pcst_results")]
    output_dir: String,

    /// Also export the selected tree as GraphML and a node table
    #[clap(long)]
    graphml: bool,

    /// Number of worker threads for batch queries (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = SolverConfig::new(args.pruning, args.tolerance);
    config.validate()?;

    log::info!("Starting PCST extraction");
    log::info!("Graph: {}", args.graph);
    log::info!("Output: {}", args.output_dir);
    log::info!("Pruning: {}, tolerance: {}", config.pruning, config.tolerance);

    std::fs::create_dir_all(&args.output_dir)?;

    let graph = data::load_graph(&args.graph)?;

    if let Some(queries_path) = &args.queries {
        let num_threads = if args.threads > 0 {
            args.threads
        } else {
            num_cpus::get()
        };
        log::info!("Using {} worker threads", num_threads);
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;

        let queries = data::json::load_queries(queries_path)?;
        let results = pcst::solve_batch(&graph, &queries, &config);
        storage::save_batch_results(&results, &config, &args.output_dir)?;

        log::info!("Batch complete. Results saved to {}", args.output_dir);
        return Ok(());
    }

    let prizes_path = args
        .prizes
        .as_deref()
        .ok_or_else(|| anyhow!("--prizes is required without --queries"))?;
    let prizes = data::json::load_prizes(prizes_path)?;

    let solution = pcst::solve(&graph, &prizes, args.root.as_deref(), &config)?;

    log::info!(
        "Selected {} nodes and {} edges (net value {:.4})",
        solution.nodes.len(),
        solution.edges.len(),
        solution.metrics.net_value
    );

    storage::save_results(&solution, &graph, &config, &args.output_dir)?;

    if args.graphml {
        let out = Path::new(&args.output_dir);
        viz::write_graphml(&solution, &graph, &prizes, &out.join("solution.graphml"))?;
        viz::write_node_csv(&solution, &prizes, args.root.as_deref(), &out.join("nodes.csv"))?;
    }

    log::info!("Extraction complete. Results saved to {}", args.output_dir);

    Ok(())
}
