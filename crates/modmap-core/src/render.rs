//! Render an import graph as Graphviz dot text or JSON.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ImportEdge;
use crate::graph::ImportGraph;

/// Render the graph as a `digraph { ... }` block.
///
/// Every node referenced by an edge is declared first (sorted, quoted, one
/// per line), followed by the edges. An empty graph still renders a
/// well-formed empty block. With `clusters`, nodes sharing a top-level
/// package are grouped into a subgraph cluster.
pub fn render_dot(graph: &ImportGraph, clusters: bool) -> String {
    let mut nodes = graph.nodes();
    nodes.sort();
    let mut edges = graph.edges();
    edges.sort();

    let mut out = String::from("digraph {\n");
    if clusters {
        render_clustered_nodes(&nodes, &mut out);
    } else {
        for node in &nodes {
            out.push_str(&format!("    \"{node}\";\n"));
        }
    }
    for (source, target) in &edges {
        out.push_str(&format!("    \"{source}\" -> \"{target}\";\n"));
    }
    out.push('}');
    out
}

fn render_clustered_nodes(nodes: &[String], out: &mut String) {
    let mut groups: BTreeMap<&str, Vec<&String>> = BTreeMap::new();
    for node in nodes {
        let top = node.split('.').next().unwrap_or("");
        groups.entry(top).or_default().push(node);
    }

    for (top, members) in groups {
        if members.len() < 2 {
            for node in members {
                out.push_str(&format!("    \"{node}\";\n"));
            }
            continue;
        }
        out.push_str(&format!("    subgraph \"cluster_{top}\" {{\n"));
        out.push_str(&format!("        label = \"{top}\";\n"));
        for node in members {
            out.push_str(&format!("        \"{node}\";\n"));
        }
        out.push_str("    }\n");
    }
}

#[derive(Debug, Serialize)]
struct GraphOutput {
    nodes: Vec<String>,
    edges: Vec<ImportEdge>,
}

/// Render the graph as a pretty-printed JSON object with sorted nodes/edges.
pub fn render_json(graph: &ImportGraph) -> serde_json::Result<String> {
    let mut nodes = graph.nodes();
    nodes.sort();
    let mut edges: Vec<ImportEdge> = graph
        .edges()
        .into_iter()
        .map(|(source, target)| ImportEdge { source, target })
        .collect();
    edges.sort();

    serde_json::to_string_pretty(&GraphOutput { nodes, edges })
}
