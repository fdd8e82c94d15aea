//! Parquet edge lists

use anyhow::{anyhow, Result};
use polars::prelude::*;

use crate::graph::{Graph, GraphBuilder};

/// Load an edge list with `source`, `target` and `cost` columns.
///
/// An optional `id` column names the edges; rows without one are named
/// `e<row>`. Nodes are the union of all endpoints. Rows with a missing
/// endpoint are skipped.
pub fn load_edge_list(path: &str) -> Result<Graph> {
    log::info!("Reading parquet file: {}", path);

    if !std::path::Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let df = LazyFrame::scan_parquet(path, Default::default())?.collect()?;
    log::info!("File schema: {:?}", df.schema());

    let source = df.column("source")?.cast(&DataType::String)?;
    let target = df.column("target")?.cast(&DataType::String)?;
    let cost = df.column("cost")?.cast(&DataType::Float64)?;
    let ids = match df.column("id") {
        Ok(column) => Some(column.cast(&DataType::String)?),
        Err(_) => None,
    };

    let source = source.str()?;
    let target = target.str()?;
    let cost = cost.f64()?;
    let ids = match &ids {
        Some(column) => Some(column.str()?),
        None => None,
    };

    let row_count = df.height();
    log::info!("Processing {} edge rows", row_count);

    let mut builder = GraphBuilder::with_capacity(row_count);
    let mut skipped = 0;
    for i in 0..row_count {
        let (Some(src), Some(dst)) = (source.get(i), target.get(i)) else {
            skipped += 1;
            continue;
        };
        let edge_cost = cost
            .get(i)
            .ok_or_else(|| anyhow!("Row {} has no cost", i))?;
        let id = ids
            .and_then(|column| column.get(i))
            .map(str::to_string)
            .unwrap_or_else(|| format!("e{}", i));

        builder.add_edge(&id, src, dst, edge_cost);
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows with a missing endpoint", skipped);
    }

    let graph = builder.build();
    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}
