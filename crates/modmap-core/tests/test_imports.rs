//! Import extraction and relative-resolution tests.

mod common;

use std::path::Path;

use common::fixture_path;
use modmap_core::error::AnalysisError;
use modmap_core::imports::{
    find_imports_in_code, find_imports_in_file, resolve_relative_module,
    resolve_relative_module_by_root, split_relative,
};

fn imports(code: &str) -> Vec<String> {
    find_imports_in_code(code, None, None).expect("parse failed")
}

// ---------------------------------------------------------------------------
// Plain imports
// ---------------------------------------------------------------------------

#[test]
fn single_import() {
    assert_eq!(imports("import abc"), vec!["abc"]);
}

#[test]
fn multiple_imports_in_one_statement() {
    assert_eq!(imports("import abc, bcd"), vec!["abc", "bcd"]);
}

#[test]
fn dotted_import() {
    assert_eq!(imports("import os.path"), vec!["os.path"]);
}

#[test]
fn aliased_import_yields_real_module() {
    assert_eq!(imports("import numpy as np"), vec!["numpy"]);
}

// ---------------------------------------------------------------------------
// From imports
// ---------------------------------------------------------------------------

#[test]
fn from_import_yields_module_dot_name() {
    assert_eq!(imports("from abc import bcd, cde"), vec!["abc.bcd", "abc.cde"]);
}

#[test]
fn from_import_with_alias() {
    assert_eq!(imports("from abc import bcd as b"), vec!["abc.bcd"]);
}

#[test]
fn wildcard_import_yields_module_once() {
    assert_eq!(imports("from abc import *"), vec!["abc"]);
}

#[test]
fn parenthesized_import_list() {
    assert_eq!(
        imports("from abc import (bcd,\n    cde)"),
        vec!["abc.bcd", "abc.cde"]
    );
}

// ---------------------------------------------------------------------------
// Nested imports — every node is walked
// ---------------------------------------------------------------------------

#[test]
fn import_inside_function_is_found() {
    assert_eq!(imports("def f():\n    import abc\n"), vec!["abc"]);
}

#[test]
fn imports_inside_try_blocks_are_found() {
    let code = "try:\n    import ujson\nexcept ImportError:\n    import json\n";
    assert_eq!(imports(code), vec!["ujson", "json"]);
}

// ---------------------------------------------------------------------------
// Relative imports without resolution context
// ---------------------------------------------------------------------------

#[test]
fn relative_import_without_context_stays_literal() {
    assert_eq!(imports("from ..util import paths"), vec!["..util.paths"]);
}

#[test]
fn dot_only_relative_import_stays_literal() {
    assert_eq!(imports("from . import x"), vec!["..x"]);
}

#[test]
fn relative_import_with_context_resolves() {
    let path = fixture_path("pkg_project/myapp/core/engine.py");
    let found = find_imports_in_code("from ..util import paths", Some(&path), Some("myapp"))
        .expect("parse failed");
    assert_eq!(found, vec!["myapp.util.paths"]);
}

// ---------------------------------------------------------------------------
// Syntax and IO failures
// ---------------------------------------------------------------------------

#[test]
fn syntax_error_is_reported() {
    let err = find_imports_in_code("def broken(:", None, None).unwrap_err();
    assert!(err.is_syntax());
}

#[test]
fn unreadable_file_propagates_io_error() {
    let err = find_imports_in_file(Path::new("/no/such/file.py"), None).unwrap_err();
    assert!(matches!(err, AnalysisError::Io(_)));
}

// ---------------------------------------------------------------------------
// split_relative
// ---------------------------------------------------------------------------

#[test]
fn split_relative_counts_leading_dots() {
    assert_eq!(split_relative("..bar"), (2, "bar"));
    assert_eq!(split_relative("."), (1, ""));
    assert_eq!(split_relative("...x.y"), (3, "x.y"));
    assert_eq!(split_relative("plain"), (0, "plain"));
}

// ---------------------------------------------------------------------------
// Relative resolution by root path
// ---------------------------------------------------------------------------

#[test]
fn resolves_two_levels_up() {
    let path = Path::new("/path/to/foo/bar/baz.py");
    let root = Path::new("/path/to");
    assert_eq!(
        resolve_relative_module(path, "bar", 2, root).unwrap(),
        "foo.bar"
    );
    assert_eq!(
        resolve_relative_module(path, "baz", 2, root).unwrap(),
        "foo.baz"
    );
    assert_eq!(
        resolve_relative_module(path, "baz.bar", 2, root).unwrap(),
        "foo.baz.bar"
    );
}

#[test]
fn one_level_means_this_package() {
    let path = Path::new("/path/to/foo/bar/baz.py");
    let root = Path::new("/path/to");
    assert_eq!(
        resolve_relative_module(path, "bar", 1, root).unwrap(),
        "foo.bar.bar"
    );
    assert_eq!(resolve_relative_module(path, "", 1, root).unwrap(), "foo.bar");
}

#[test]
fn too_many_levels_is_a_resolution_error() {
    let err = resolve_relative_module(
        Path::new("/path/to/foo/bar.py"),
        "foo",
        3,
        Path::new("/path/to"),
    )
    .unwrap_err();
    assert!(matches!(err, AnalysisError::Resolution(_)));
    assert!(err
        .to_string()
        .contains("relative import beyond top-level package"));
}

#[test]
fn path_outside_root_is_a_resolution_error() {
    let err = resolve_relative_module(
        Path::new("/elsewhere/foo/bar.py"),
        "x",
        1,
        Path::new("/path/to"),
    )
    .unwrap_err();
    assert!(matches!(err, AnalysisError::Resolution(_)));
}

// ---------------------------------------------------------------------------
// Relative resolution by root module
// ---------------------------------------------------------------------------

#[test]
fn root_module_constructor_finds_root_by_upward_search() {
    let path = Path::new("/path/to/foo/bar/baz.py");
    assert_eq!(
        resolve_relative_module_by_root(path, "bar", 2, "foo").unwrap(),
        "foo.bar"
    );
    assert_eq!(
        resolve_relative_module_by_root(path, "", 1, "foo").unwrap(),
        "foo.bar"
    );
}

#[test]
fn root_module_constructor_fails_on_unlocatable_root() {
    let err =
        resolve_relative_module_by_root(Path::new("/path/to/foo/bar.py"), "x", 1, "nope")
            .unwrap_err();
    assert!(matches!(err, AnalysisError::Resolution(_)));
}
