//! Extract imported module names from Python source.
//!
//! Parsing goes through tree-sitter; every node in the tree is visited, so
//! imports nested in functions, classes, or `try` blocks are found. Relative
//! imports are resolved to absolute module names when the importing file's
//! path and the tree's root module are known, and kept in their literal
//! dotted form otherwise.

use std::path::Path;

use tree_sitter::{Node, Parser};

use crate::error::AnalysisError;
use crate::roots;

/// Split a literal relative-import string into its dot level and suffix.
///
/// `"..util"` → `(2, "util")`, `"."` → `(1, "")`.
pub fn split_relative(module: &str) -> (usize, &str) {
    let level = module.chars().take_while(|&c| c == '.').count();
    (level, &module[level..])
}

/// Resolve a relative import against a known root path.
///
/// The importing file's containing directory, taken relative to `root_path`
/// and dot-joined, is truncated by `level - 1` trailing components; the
/// remainder is joined with `module` (which may be empty). One dot level
/// means "this package"; each additional dot climbs one directory.
pub fn resolve_relative_module(
    path: &Path,
    module: &str,
    level: usize,
    root_path: &Path,
) -> Result<String, AnalysisError> {
    let importing_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let rel = importing_dir.strip_prefix(root_path).map_err(|_| {
        AnalysisError::Resolution(format!(
            "{} is not under root path {}",
            path.display(),
            root_path.display()
        ))
    })?;

    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let keep = level
        .checked_sub(1)
        .and_then(|climb| parts.len().checked_sub(climb))
        .filter(|&k| k > 0)
        .ok_or_else(|| {
            AnalysisError::Resolution(
                "attempted relative import beyond top-level package".to_string(),
            )
        })?;

    let base = parts[..keep].join(".");
    Ok(if module.is_empty() {
        base
    } else {
        format!("{base}.{module}")
    })
}

/// Resolve a relative import given only the root module name.
///
/// The root path is located by upward search from the importing file.
pub fn resolve_relative_module_by_root(
    path: &Path,
    module: &str,
    level: usize,
    root_module: &str,
) -> Result<String, AnalysisError> {
    let root_path = roots::find_root_path(path, root_module)?;
    resolve_relative_module(path, module, level, &root_path)
}

/// Parse a Python file and return every imported module name.
pub fn find_imports_in_file(
    path: &Path,
    root_module: Option<&str>,
) -> Result<Vec<String>, AnalysisError> {
    let code = std::fs::read_to_string(path)?;
    find_imports_in_code(&code, Some(path), root_module)
}

/// Parse Python source text and return every imported module name.
///
/// `path` and `root_module` are only needed to resolve relative imports;
/// without them, relative imports are yielded in literal dotted form.
pub fn find_imports_in_code(
    code: &str,
    path: Option<&Path>,
    root_module: Option<&str>,
) -> Result<Vec<String>, AnalysisError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_python::LANGUAGE.into())?;

    let label = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<code>".to_string());
    let tree = parser
        .parse(code, None)
        .ok_or_else(|| AnalysisError::Syntax {
            path: label.clone(),
        })?;
    if tree.root_node().has_error() {
        return Err(AnalysisError::Syntax { path: label });
    }

    let mut imports = Vec::new();
    collect_imports(
        &tree.root_node(),
        code.as_bytes(),
        path,
        root_module,
        &mut imports,
    )?;
    Ok(imports)
}

fn collect_imports(
    node: &Node,
    source: &[u8],
    path: Option<&Path>,
    root_module: Option<&str>,
    out: &mut Vec<String>,
) -> Result<(), AnalysisError> {
    match node.kind() {
        "import_statement" => collect_plain_import(node, source, out),
        "import_from_statement" => collect_from_import(node, source, path, root_module, out)?,
        _ => {}
    }

    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            collect_imports(&child, source, path, root_module, out)?;
        }
    }
    Ok(())
}

/// `import a, b.c`: yield each named module verbatim.
fn collect_plain_import(node: &Node, source: &[u8], out: &mut Vec<String>) {
    let mut cursor = node.walk();
    let names: Vec<Node> = node.children_by_field_name("name", &mut cursor).collect();
    for name in names {
        if let Some(target) = import_target(&name, source) {
            out.push(target);
        }
    }
}

/// `from a import b, c`: yield `a.b`, `a.c`; `from a import *` yields `a`.
fn collect_from_import(
    node: &Node,
    source: &[u8],
    path: Option<&Path>,
    root_module: Option<&str>,
    out: &mut Vec<String>,
) -> Result<(), AnalysisError> {
    let Some(module_node) = node.child_by_field_name("module_name") else {
        return Ok(());
    };
    let literal = module_node.utf8_text(source).unwrap_or("").to_string();

    let module = if module_node.kind() == "relative_import" {
        let (level, suffix) = split_relative(&literal);
        match (path, root_module) {
            (Some(path), Some(root)) if !root.is_empty() => {
                resolve_relative_module_by_root(path, suffix, level, root)?
            }
            // No resolution context: keep the literal dotted form, which can
            // never match a real module downstream.
            _ => literal,
        }
    } else {
        literal
    };

    let mut cursor = node.walk();
    let names: Vec<Node> = node.children_by_field_name("name", &mut cursor).collect();
    if names.is_empty() {
        // Only the wildcard form has no name fields. There is no way to know
        // what `*` pulls in, so the statement counts as importing the module.
        out.push(module);
        return Ok(());
    }

    for name in names {
        if let Some(target) = import_target(&name, source) {
            out.push(format!("{module}.{target}"));
        }
    }
    Ok(())
}

/// The real imported name of a `dotted_name` or `aliased_import` node.
fn import_target(node: &Node, source: &[u8]) -> Option<String> {
    let target = if node.kind() == "aliased_import" {
        node.child_by_field_name("name")?
    } else {
        *node
    };
    target.utf8_text(source).ok().map(|s| s.to_string())
}
