//! Export of selected subgraphs for visualization tools

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;

use crate::graph::GraphSource;
use crate::pcst::PcstSolution;

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Quote a CSV field when it holds a separator, a quote or a line break
fn csv_field(text: &str) -> Cow<'_, str> {
    if text.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(text)
    }
}

/// Write the selected tree as GraphML, with node prizes and edge costs
pub fn write_graphml<G: GraphSource + ?Sized>(
    solution: &PcstSolution,
    graph: &G,
    prizes: &HashMap<String, f64>,
    path: &Path,
) -> Result<()> {
    log::info!("Writing GraphML to {}", path.display());

    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(file, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">")?;
    writeln!(file, "  <key id=\"prize\" for=\"node\" attr.name=\"prize\" attr.type=\"double\"/>")?;
    writeln!(file, "  <key id=\"cost\" for=\"edge\" attr.name=\"cost\" attr.type=\"double\"/>")?;
    writeln!(file, "  <graph id=\"G\" edgedefault=\"undirected\">")?;

    for node in &solution.nodes {
        let prize = prizes.get(node).copied().unwrap_or(0.0);
        writeln!(
            file,
            "    <node id=\"{}\">\n      <data key=\"prize\">{}</data>\n    </node>",
            escape_xml(node),
            prize
        )?;
    }

    // Edge ids may repeat in noisy input; write each selected id once
    let mut written = 0;
    let mut seen = HashSet::new();
    for edge in graph.edges() {
        if !solution.edges.contains(&*edge.id) || !seen.insert(edge.id.to_string()) {
            continue;
        }
        writeln!(
            file,
            "    <edge id=\"{}\" source=\"{}\" target=\"{}\">\n      <data key=\"cost\">{}</data>\n    </edge>",
            escape_xml(&edge.id),
            escape_xml(edge.source),
            escape_xml(edge.target),
            edge.cost
        )?;
        written += 1;
    }

    writeln!(file, "  </graph>")?;
    writeln!(file, "</graphml>")?;
    file.flush()?;

    log::info!("Wrote {} nodes and {} edges", solution.nodes.len(), written);

    Ok(())
}

/// Write a `id,prize,is_root` CSV of the selected nodes
pub fn write_node_csv(
    solution: &PcstSolution,
    prizes: &HashMap<String, f64>,
    root: Option<&str>,
    path: &Path,
) -> Result<()> {
    log::info!("Writing node table to {}", path.display());

    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "id,prize,is_root")?;
    for node in &solution.nodes {
        let prize = prizes.get(node).copied().unwrap_or(0.0);
        writeln!(
            file,
            "{},{},{}",
            csv_field(node),
            prize,
            root == Some(node.as_str())
        )?;
    }
    file.flush()?;

    Ok(())
}
