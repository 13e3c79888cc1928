//! Core data types and configuration for an analysis run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A source file paired with the module name inferred from its path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFile {
    pub module: String,
    pub path: PathBuf,
}

/// A directed dependency between two (depth-shortened) modules.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImportEdge {
    pub source: String,
    pub target: String,
}

/// Configuration for an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Root directory of the code tree to analyse.
    #[serde(default = "default_path")]
    pub path: String,
    /// Number of dotted components (beyond the first) kept per module.
    #[serde(default)]
    pub depth: usize,
    /// External module patterns to include in the graph if imported.
    #[serde(default)]
    pub include: Vec<String>,
    /// Directory / submodule names whose files are not analysed.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub quiet: bool,
}

fn default_path() -> String {
    ".".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            depth: 0,
            include: Vec::new(),
            exclude: Vec::new(),
            verbose: false,
            quiet: false,
        }
    }
}
