//! Partitioning of a source tree into independently buildable project
//! modules.

pub mod exclude;
pub mod indexer;
pub mod languages;
pub mod source;

pub use exclude::ExcludePatterns;
pub use indexer::{IndexOutcome, ModuleIndexer};
pub use languages::{strategy_for, BuildKind, LanguageRegistry, ModuleStrategy};
pub use source::{Encoding, FileRef};

use std::path::{Path, PathBuf};

/// One module produced by an indexing run. Its file set is disjoint from
/// every other module of the same run.
#[derive(Debug, Clone)]
pub struct ProjectModule {
    identifier: String,
    root_path: PathBuf,
    files: Vec<FileRef>,
}

impl ProjectModule {
    pub(crate) fn new(identifier: String, root_path: PathBuf, files: Vec<FileRef>) -> Self {
        Self {
            identifier,
            root_path,
            files,
        }
    }

    /// Module root relative to the scan root; empty when the module is the
    /// scan root itself.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn files(&self) -> &[FileRef] {
        &self.files
    }

    pub fn line_count(&self) -> usize {
        self.files.iter().map(FileRef::line_count).sum()
    }
}
