//! Import resolution engine.
//!
//! Orchestrates root location, module enumeration, and import extraction,
//! then decides per import whether it is a real project (or whitelisted
//! external) dependency or noise: a name imported from a module, a module
//! that does not exist on disk, or an import of the module itself.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::{AnalysisConfig, ModuleFile};
use crate::diagnostics::{Diagnostics, Event};
use crate::error::AnalysisError;
use crate::graph::ImportGraph;
use crate::imports;
use crate::modules::{self, shorten_module};
use crate::roots;

/// Check if a module corresponds to a file or package on disk.
///
/// When a root module is known, the search starts one directory level up per
/// root-module component, since `path` points inside the root package. The
/// module exists if `<module-path>.py` is a file or the module directory
/// holds an `__init__.py`.
pub fn module_exists_on_filesystem(module: &str, path: &Path, root_module: &str) -> bool {
    let mut base = path.to_path_buf();
    if !root_module.is_empty() {
        for _ in 0..root_module.split('.').count() {
            base.push("..");
        }
    }

    let module_path = base.join(module.replace('.', "/"));
    module_path.with_extension("py").is_file() || module_path.join("__init__.py").is_file()
}

/// Check if a module matches any of the given search terms.
///
/// A term matches exactly or as a dotted prefix; with `allow_glob`, terms are
/// additionally tried as glob patterns.
pub fn module_matches<'a, I>(module: &str, searches: I, allow_glob: bool) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    searches.into_iter().any(|search| {
        module == search
            || module.starts_with(&format!("{search}."))
            || (allow_glob
                && glob::Pattern::new(search)
                    .map(|p| p.matches(module))
                    .unwrap_or(false))
    })
}

/// Context for one analysis run, immutable after construction.
pub struct Resolver {
    root_path: PathBuf,
    root_module: String,
    depth: usize,
    include: Vec<String>,
    exclude: Vec<String>,
    /// All enumerated modules shortened to depth, plus the include patterns.
    search: HashSet<String>,
    module_files: Vec<ModuleFile>,
}

impl Resolver {
    /// Locate the root, enumerate module files, and precompute the search set.
    pub fn new(config: &AnalysisConfig, diags: &mut Diagnostics) -> Self {
        let path = Path::new(&config.path);
        let root_path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let root_module = roots::find_root_module(&root_path);
        diags.emit(Event::RootResolved {
            path: root_path.display().to_string(),
            root_module: root_module.clone(),
        });

        let module_files =
            modules::find_module_files(&root_path, &root_module, &config.exclude, diags);
        diags.emit(Event::ModuleFilesFound {
            count: module_files.len(),
        });

        let mut search: HashSet<String> = module_files
            .iter()
            .map(|mf| shorten_module(&mf.module, config.depth))
            .collect();
        search.extend(config.include.iter().cloned());

        Self {
            root_path,
            root_module,
            depth: config.depth,
            include: config.include.clone(),
            exclude: config.exclude.clone(),
            search,
            module_files,
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn root_module(&self) -> &str {
        &self.root_module
    }

    pub fn module_files(&self) -> &[ModuleFile] {
        &self.module_files
    }

    /// Resolve a module to the form that exists on disk.
    ///
    /// Returns the module itself if it resolves, otherwise its immediate
    /// parent: `from a.b import c` cannot distinguish a submodule import
    /// from a name import, so the parent is the next candidate.
    pub fn find_module(&self, module: &str) -> Option<String> {
        if module_exists_on_filesystem(module, &self.root_path, &self.root_module) {
            return Some(module.to_string());
        }
        let (parent, _) = module.rsplit_once('.')?;
        if module_exists_on_filesystem(parent, &self.root_path, &self.root_module) {
            return Some(parent.to_string());
        }
        None
    }

    /// Analyse every enumerated file and return the deduplicated edge set.
    pub fn find_imports(&self, diags: &mut Diagnostics) -> Result<ImportGraph, AnalysisError> {
        let mut graph = ImportGraph::new();
        for module_file in &self.module_files {
            self.analyze_file(module_file, &mut graph, diags)?;
        }
        Ok(graph)
    }

    /// Scan one file for imports and add the relevant edges.
    ///
    /// Syntax errors are reported and isolate the file; resolution and IO
    /// errors abort the run.
    fn analyze_file(
        &self,
        module_file: &ModuleFile,
        graph: &mut ImportGraph,
        diags: &mut Diagnostics,
    ) -> Result<(), AnalysisError> {
        if self.is_excluded(module_file) {
            diags.emit(Event::FileExcluded {
                module: module_file.module.clone(),
                path: module_file.path.display().to_string(),
            });
            return Ok(());
        }

        let source = shorten_module(&module_file.module, self.depth);
        let raw_imports =
            match imports::find_imports_in_file(&module_file.path, Some(self.root_module.as_str())) {
                Ok(found) => found,
                Err(AnalysisError::Syntax { path }) => {
                    diags.emit(Event::SyntaxError { path });
                    return Ok(());
                }
                Err(err) => return Err(err),
            };

        for import in raw_imports {
            self.analyze_import(&source, &import, graph, diags);
        }
        Ok(())
    }

    fn is_excluded(&self, module_file: &ModuleFile) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let module_hit = module_file
            .module
            .split('.')
            .any(|part| self.exclude.iter().any(|x| x == part));
        let path_hit = module_file.path.components().any(|c| {
            let name = c.as_os_str().to_string_lossy();
            self.exclude.iter().any(|x| *x == name)
        });
        module_hit || path_hit
    }

    /// Decide whether one raw import becomes an edge.
    fn analyze_import(
        &self,
        source: &str,
        raw_import: &str,
        graph: &mut ImportGraph,
        diags: &mut Diagnostics,
    ) {
        let import = shorten_module(raw_import, self.depth);
        if source == import {
            diags.emit(Event::SelfImportSkipped {
                module: source.to_string(),
            });
            return;
        }
        if !module_matches(&import, &self.search, true) {
            diags.emit(Event::ImportNotTracked {
                source: source.to_string(),
                import,
            });
            return;
        }

        let include_match = module_matches(&import, &self.include, true);
        let target = match self.find_module(&import) {
            Some(resolved) => {
                if resolved != import {
                    diags.emit(Event::ParentFallback {
                        import: import.clone(),
                        parent: resolved.clone(),
                    });
                }
                resolved
            }
            None if include_match => import,
            None => {
                diags.emit(Event::ImportUnresolved {
                    source: source.to_string(),
                    import,
                });
                return;
            }
        };

        // A parent fallback can land back on the importing module; that is a
        // self-import in disguise and never becomes an edge.
        if target == source {
            diags.emit(Event::SelfImportSkipped {
                module: source.to_string(),
            });
            return;
        }

        if graph.add_edge(source, &target) {
            diags.emit(Event::EdgeAdded {
                source: source.to_string(),
                target,
            });
        }
    }
}
