//! Error taxonomy for analysis runs.
//!
//! Syntax errors are recovered per file by the resolution engine; resolution
//! and IO errors abort the run, since they mean the root-module guess (and
//! everything resolved against it) is unreliable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The file could not be parsed as valid Python.
    #[error("syntax error in {path}")]
    Syntax { path: String },

    /// A module or root path could not be located by upward search.
    #[error("{0}")]
    Resolution(String),

    /// The tree-sitter grammar could not be loaded.
    #[error("failed to initialise parser: {0}")]
    Parser(#[from] tree_sitter::LanguageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub fn is_syntax(&self) -> bool {
        matches!(self, AnalysisError::Syntax { .. })
    }
}
