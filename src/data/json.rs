//! JSON input files

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::graph::Graph;
use crate::pcst::PrizeQuery;

fn open(path: &str) -> Result<BufReader<File>> {
    if !Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }
    let file = File::open(path).with_context(|| format!("opening {}", path))?;
    Ok(BufReader::new(file))
}

/// Load a graph stored as `{"nodes": [{"id": ..}], "edges": [{"id", "source", "target", "cost"}]}`
pub fn load_graph(path: &str) -> Result<Graph> {
    log::info!("Reading graph JSON: {}", path);
    let graph: Graph = serde_json::from_reader(open(path)?)
        .with_context(|| format!("parsing graph from {}", path))?;
    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Load a `{"node id": prize}` mapping
pub fn load_prizes(path: &str) -> Result<HashMap<String, f64>> {
    log::info!("Reading prizes: {}", path);
    let prizes: HashMap<String, f64> = serde_json::from_reader(open(path)?)
        .with_context(|| format!("parsing prizes from {}", path))?;
    log::info!("Loaded {} prizes", prizes.len());
    Ok(prizes)
}

/// Load a list of `{"prizes": {..}, "root": ..}` queries
pub fn load_queries(path: &str) -> Result<Vec<PrizeQuery>> {
    log::info!("Reading queries: {}", path);
    let queries: Vec<PrizeQuery> = serde_json::from_reader(open(path)?)
        .with_context(|| format!("parsing queries from {}", path))?;
    log::info!("Loaded {} queries", queries.len());
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn loads_graph_and_prizes() {
        let dir = tempfile::tempdir().unwrap();
        let graph_path = write_temp(
            &dir,
            "graph.json",
            r#"{"nodes":[{"id":"a"}],"edges":[{"id":"ab","source":"a","target":"b","cost":2}]}"#,
        );
        let prize_path = write_temp(&dir, "prizes.json", r#"{"a": 1.5, "b": 0}"#);

        let graph = load_graph(&graph_path).unwrap();
        assert_eq!(graph.edges[0].cost, 2.0);

        let prizes = load_prizes(&prize_path).unwrap();
        assert_eq!(prizes.get("a"), Some(&1.5));
    }

    #[test]
    fn loads_queries_with_optional_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "queries.json",
            r#"[{"prizes": {"a": 1}}, {"prizes": {}, "root": "a"}]"#,
        );

        let queries = load_queries(&path).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].root, None);
        assert_eq!(queries[1].root.as_deref(), Some("a"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_prizes("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
