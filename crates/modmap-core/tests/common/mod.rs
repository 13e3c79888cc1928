//! Shared test helpers for integration tests.

use std::path::{Path, PathBuf};

use modmap_core::config::AnalysisConfig;
use modmap_core::diagnostics::{Diagnostics, Event};
use modmap_core::error::AnalysisError;
use modmap_core::graph::ImportGraph;
use modmap_core::resolve::Resolver;

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

#[derive(Debug)]
pub struct AnalysisRun {
    pub graph: ImportGraph,
    pub diags: Diagnostics,
}

/// Build a config for a fixture tree.
pub fn fixture_config(
    name: &str,
    depth: usize,
    include: &[&str],
    exclude: &[&str],
) -> AnalysisConfig {
    AnalysisConfig {
        path: fixture_path(name).to_string_lossy().into_owned(),
        depth,
        include: include.iter().map(|s| s.to_string()).collect(),
        exclude: exclude.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

/// Run the full analysis over a fixture tree.
pub fn try_analyze(
    name: &str,
    depth: usize,
    include: &[&str],
    exclude: &[&str],
) -> Result<AnalysisRun, AnalysisError> {
    let config = fixture_config(name, depth, include, exclude);
    let mut diags = Diagnostics::new();
    let resolver = Resolver::new(&config, &mut diags);
    let graph = resolver.find_imports(&mut diags)?;
    Ok(AnalysisRun { graph, diags })
}

/// Run the full analysis over a fixture tree, panicking on fatal errors.
pub fn analyze(name: &str, depth: usize, include: &[&str], exclude: &[&str]) -> AnalysisRun {
    try_analyze(name, depth, include, exclude).expect("analysis failed")
}

/// Edges as sorted (source, target) pairs.
pub fn edge_set(graph: &ImportGraph) -> Vec<(String, String)> {
    let mut edges = graph.edges();
    edges.sort();
    edges
}

/// Convenience constructor for expected edge lists.
pub fn edges_of(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut edges: Vec<(String, String)> = pairs
        .iter()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect();
    edges.sort();
    edges
}

/// Whether any recorded event satisfies the predicate.
pub fn has_event(diags: &Diagnostics, predicate: impl Fn(&Event) -> bool) -> bool {
    diags.events().iter().any(predicate)
}
