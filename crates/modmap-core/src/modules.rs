//! Enumerate module files in a source tree.

use std::path::Path;

use walkdir::WalkDir;

use crate::config::ModuleFile;
use crate::diagnostics::{Diagnostics, Event};

/// The file that stands for "this directory as a module".
const PACKAGE_INIT: &str = "__init__";

const SOURCE_EXTENSION: &str = "py";

/// Keep the first `depth + 1` dot-separated components of a module name.
pub fn shorten_module(module: &str, depth: usize) -> String {
    module
        .split('.')
        .take(depth + 1)
        .collect::<Vec<_>>()
        .join(".")
}

/// Find all Python files under `root_path` and derive their module names.
///
/// Directories whose name starts with `.` or appears in `exclude` are pruned
/// before recursion, so excluded trees are never walked. Order follows
/// filesystem traversal order.
pub fn find_module_files(
    root_path: &Path,
    root_module: &str,
    exclude: &[String],
    diags: &mut Diagnostics,
) -> Vec<ModuleFile> {
    let mut found = Vec::new();

    let walker = WalkDir::new(root_path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            // Prune directories only; the root entry itself is exempt.
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !exclude.iter().any(|x| name == *x)
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().map(|e| e == SOURCE_EXTENSION) != Some(true) {
            continue;
        }

        let rel = path.strip_prefix(root_path).unwrap_or(path);
        let Some(module) = module_from_relpath(rel, root_module, diags) else {
            continue;
        };
        diags.emit(Event::ModuleResolved {
            path: rel.display().to_string(),
            module: module.clone(),
        });
        found.push(ModuleFile {
            module,
            path: path.to_path_buf(),
        });
    }

    found
}

/// Derive a module name from a root-relative file path.
///
/// Strips the extension, joins path components with dots, and drops a
/// trailing `.__init__`. A bare `__init__` is the root package itself: it
/// maps to the root module, or is skipped with a warning when none is known.
fn module_from_relpath(rel: &Path, root_module: &str, diags: &mut Diagnostics) -> Option<String> {
    let stem = rel.with_extension("");
    let parts: Vec<String> = stem
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let mut module = parts.join(".");

    if let Some(short) = module.strip_suffix(".__init__") {
        module = short.to_string();
    }
    if module == PACKAGE_INIT {
        if root_module.is_empty() {
            diags.emit(Event::UnknownModule {
                path: rel.display().to_string(),
            });
            return None;
        }
        return Some(root_module.to_string());
    }

    if root_module.is_empty() {
        Some(module)
    } else {
        Some(format!("{root_module}.{module}"))
    }
}
