//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, to_string_pretty};

use crate::config::SolverConfig;
use crate::error::PcstResult;
use crate::graph::Graph;
use crate::pcst::PcstSolution;

/// Save a solution and its summary to the specified directory
pub fn save_results(
    solution: &PcstSolution,
    graph: &Graph,
    config: &SolverConfig,
    output_dir: &str,
) -> Result<()> {
    log::info!(
        "Saving solution with {} nodes and {} edges to {}",
        solution.nodes.len(),
        solution.edges.len(),
        output_dir
    );

    fs::create_dir_all(output_dir)?;

    save_solution(solution, Path::new(output_dir).join("solution.json").as_path())?;
    save_summary(solution, graph, config, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save the results of a batch run, one file per query plus an index
pub fn save_batch_results(
    results: &[PcstResult<PcstSolution>],
    config: &SolverConfig,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} batch results to {}", results.len(), output_dir);

    let solutions_dir = Path::new(output_dir).join("solutions");
    fs::create_dir_all(&solutions_dir)?;

    let mut index = Vec::with_capacity(results.len());
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(solution) => {
                let path = solutions_dir.join(format!("query_{}.json", i));
                save_solution(solution, &path)?;
                index.push(json!({
                    "query": i,
                    "status": "ok",
                    "node_count": solution.metrics.node_count,
                    "edge_count": solution.metrics.edge_count,
                    "net_value": solution.metrics.net_value,
                }));
            }
            Err(err) => {
                log::warn!("Query {} failed: {}", i, err);
                index.push(json!({
                    "query": i,
                    "status": "error",
                    "error": err.to_string(),
                }));
            }
        }
    }

    let summary = json!({
        "config": config,
        "query_count": results.len(),
        "failed": results.iter().filter(|r| r.is_err()).count(),
        "queries": index,
    });

    let mut file = File::create(Path::new(output_dir).join("batch_summary.json"))?;
    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

fn save_solution(solution: &PcstSolution, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(solution)?.as_bytes())?;
    Ok(())
}

/// Save summary information
fn save_summary(
    solution: &PcstSolution,
    graph: &Graph,
    config: &SolverConfig,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let node_share = if graph.node_count() == 0 {
        0.0
    } else {
        solution.nodes.len() as f64 / graph.node_count() as f64
    };

    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
        },
        "config": config,
        "normalization": solution.normalization,
        "solution_stats": {
            "node_count": solution.metrics.node_count,
            "edge_count": solution.metrics.edge_count,
            "component_count": solution.metrics.component_count,
            "total_prize": solution.metrics.total_prize,
            "total_cost": solution.metrics.total_cost,
            "net_value": solution.metrics.net_value,
            "node_share": node_share,
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}
