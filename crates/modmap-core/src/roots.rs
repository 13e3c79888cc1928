//! Locate the root module and root path of a source tree.

use std::path::{Path, PathBuf};

use crate::error::AnalysisError;

/// Files that mark a directory as the top of a package tree.
const ROOT_MARKERS: &[&str] = &["setup.py", "setup.cfg", "pyproject.toml"];

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Guess the root module a path belongs to.
///
/// Climbs parent directories collecting their names until one contains a
/// package-boundary marker file; the marker directory itself is not consumed.
/// A file path contributes its extension-less stem. Returns the reversed,
/// dot-joined names — empty when the starting directory already holds a
/// marker or the filesystem root is reached immediately.
pub fn find_root_module(path: &Path) -> String {
    let mut path = absolute(path);
    if path.is_file() {
        path = path.with_extension("");
    }

    let mut parts: Vec<String> = Vec::new();
    loop {
        if ROOT_MARKERS.iter().any(|m| path.join(m).exists()) {
            break;
        }
        let Some(name) = path.file_name() else {
            break;
        };
        parts.push(name.to_string_lossy().into_owned());
        match path.parent() {
            Some(parent) => path = parent.to_path_buf(),
            None => break,
        }
    }

    parts.reverse();
    parts.join(".")
}

/// Find the canonical root path for a known root module.
///
/// Walks upward from `path` until the trailing path components match the
/// root module's slash-joined form, and returns the parent of that matching
/// directory. Reaching the filesystem root without a match means the root
/// module guess does not correspond to `path` at all.
pub fn find_root_path(path: &Path, root_module: &str) -> Result<PathBuf, AnalysisError> {
    if root_module.is_empty() {
        return Err(AnalysisError::Resolution(format!(
            "no root module to locate from {}",
            path.display()
        )));
    }

    let suffix: PathBuf = root_module.split('.').collect();
    let mut current = absolute(path);
    loop {
        if current.ends_with(&suffix) {
            return Ok(current
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("/")));
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => {
                return Err(AnalysisError::Resolution(format!(
                    "could not find root path for {root_module} from {}",
                    path.display()
                )))
            }
        }
    }
}
