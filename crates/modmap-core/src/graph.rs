//! Deduplicated import graph backed by petgraph::DiGraph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

/// Directed module-dependency graph with set semantics on edges.
///
/// Nodes are module names and exist only because some edge references them,
/// so every node in the graph appears in at least one edge.
#[derive(Debug, Default)]
pub struct ImportGraph {
    graph: DiGraph<String, ()>,
    /// O(1) module name → NodeIndex lookup.
    index: HashMap<String, NodeIndex>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            idx
        } else {
            let idx = self.graph.add_node(name.to_string());
            self.index.insert(name.to_string(), idx);
            idx
        }
    }

    /// Insert an edge; returns false when it was already present.
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        let s = self.ensure_node(source);
        let t = self.ensure_node(target);
        if self.graph.contains_edge(s, t) {
            return false;
        }
        self.graph.add_edge(s, t, ());
        true
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&s), Some(&t)) => self.graph.contains_edge(s, t),
            _ => false,
        }
    }

    pub fn nodes(&self) -> Vec<String> {
        self.graph.node_weights().cloned().collect()
    }

    pub fn edges(&self) -> Vec<(String, String)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].clone(),
                    self.graph[e.target()].clone(),
                )
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
