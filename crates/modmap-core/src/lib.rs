//! Modmap Core — static import analysis for Python module trees.
//!
//! This crate contains all analysis logic: root-module inference, module
//! enumeration, tree-sitter import extraction, relative-import resolution,
//! and construction of the deduplicated dependency graph.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod imports;
pub mod modules;
pub mod render;
pub mod resolve;
pub mod roots;
