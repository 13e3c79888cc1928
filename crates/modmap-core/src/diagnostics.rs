//! Structured diagnostics collected during an analysis run.
//!
//! Every decision the engine makes (file skipped, import skipped, resolution
//! guess) is recorded as an [`Event`] in a [`Diagnostics`] sink passed through
//! the run, so callers and tests can inspect them without capturing process
//! output. Each event is also forwarded through the `log` facade at its level.

use log::Level;
use serde::Serialize;

/// One diagnostic event emitted during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// The root locator mapped a path to a root module name.
    RootResolved { path: String, root_module: String },
    /// The enumerator mapped a file to a module name.
    ModuleResolved { path: String, module: String },
    /// Enumeration finished.
    ModuleFilesFound { count: usize },
    /// A root-level initializer file had no root module to map to.
    UnknownModule { path: String },
    /// A file failed to parse and contributed nothing.
    SyntaxError { path: String },
    /// A file matched the exclude set and was not analysed.
    FileExcluded { module: String, path: String },
    /// An import of the importing module itself was dropped.
    SelfImportSkipped { module: String },
    /// An import matched neither the enumerated modules nor an include pattern.
    ImportNotTracked { source: String, import: String },
    /// An import matched nothing on disk and was dropped.
    ImportUnresolved { source: String, import: String },
    /// An import was treated as its parent module, since a from-import cannot
    /// distinguish a submodule from a name.
    ParentFallback { import: String, parent: String },
    /// An edge entered the result set.
    EdgeAdded { source: String, target: String },
}

impl Event {
    /// Severity used for log forwarding and CLI verbosity filtering.
    pub fn level(&self) -> Level {
        match self {
            Event::UnknownModule { .. } | Event::SyntaxError { .. } => Level::Warn,
            Event::ModuleFilesFound { .. } => Level::Info,
            _ => Level::Debug,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::RootResolved { path, root_module } => {
                write!(f, "resolved path {path:?} to root module {root_module:?}")
            }
            Event::ModuleResolved { path, module } => {
                write!(f, "resolved {path:?} to {module:?}")
            }
            Event::ModuleFilesFound { count } => write!(f, "found {count} module files"),
            Event::UnknownModule { path } => write!(f, "could not guess module of {path:?}"),
            Event::SyntaxError { path } => write!(f, "syntax error in {path:?}, skipping"),
            Event::FileExcluded { module, path } => {
                write!(f, "skipping excluded module {module:?} ({path:?})")
            }
            Event::SelfImportSkipped { module } => {
                write!(f, "skipping self-importing module {module:?}")
            }
            Event::ImportNotTracked { source, import } => {
                write!(f, "skipping {source:?} -> {import:?}, not a tracked module")
            }
            Event::ImportUnresolved { source, import } => {
                write!(f, "skipping {source:?} -> {import:?}, nothing on disk")
            }
            Event::ParentFallback { import, parent } => {
                write!(f, "treating {import:?} as its parent module {parent:?}")
            }
            Event::EdgeAdded { source, target } => write!(f, "adding {source:?} -> {target:?}"),
        }
    }
}

/// Sink accumulating the events of one analysis run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    events: Vec<Event>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and forward it to the `log` facade.
    pub fn emit(&mut self, event: Event) {
        log::log!(event.level(), "{event}");
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events at `max` severity or more severe (log levels order downward).
    pub fn at_level(&self, max: Level) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.level() <= max)
    }

    pub fn warning_count(&self) -> usize {
        self.at_level(Level::Warn).count()
    }
}
