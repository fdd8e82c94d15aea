//! Loading graphs and prizes from disk

pub mod json;
pub mod parquet;

use std::path::Path;

use anyhow::Result;

use crate::graph::Graph;

/// Load a graph, choosing the format from the file extension
pub fn load_graph(path: &str) -> Result<Graph> {
    let is_parquet = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("parquet"))
        .unwrap_or(false);

    if is_parquet {
        parquet::load_edge_list(path)
    } else {
        json::load_graph(path)
    }
}
