#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use cbom_assembler::cbom::CbomDocument;
use cbom_assembler::cli::Language;
use cbom_assembler::indexing::{strategy_for, IndexOutcome, ModuleIndexer};
use cbom_assembler::scanning::{
    AssetKind, CryptoFindingNode, FindingAggregator, FindingOccurrence, NoopEngine,
};

/// A throwaway source tree.
pub struct SourceTree {
    dir: TempDir,
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Creates `relative` with `contents`, including missing parents.
    pub fn file(self, relative: &str, contents: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    pub fn bytes(self, relative: &str, contents: &[u8]) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(relative)).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn index(&self, language: Language) -> IndexOutcome {
        ModuleIndexer::new(strategy_for(language), self.path())
            .unwrap()
            .index(None)
            .unwrap()
    }
}

pub fn identifiers(outcome: &IndexOutcome) -> Vec<&str> {
    outcome.modules.iter().map(|m| m.identifier()).collect()
}

pub fn module_files(outcome: &IndexOutcome, identifier: &str) -> Vec<String> {
    outcome
        .modules
        .iter()
        .find(|m| m.identifier() == identifier)
        .map(|m| {
            m.files()
                .iter()
                .map(|f| f.relative_path().to_string())
                .collect()
        })
        .unwrap_or_default()
}

pub fn finding(name: &str, location: &str, line: u32, offset: u32) -> CryptoFindingNode {
    CryptoFindingNode::new(name, AssetKind::Algorithm)
        .with_occurrence(FindingOccurrence::new(location, line, offset))
}

/// A document with one component per entry, each carrying that many
/// occurrences.
pub fn document_with(occurrence_counts: &[u32]) -> CbomDocument {
    let aggregator = FindingAggregator::new(Path::new("/repo"), Arc::new(NoopEngine));
    for (index, &count) in occurrence_counts.iter().enumerate() {
        let mut node = CryptoFindingNode::new(format!("ALG-{index}"), AssetKind::Algorithm);
        for line in 0..count {
            node = node.with_occurrence(FindingOccurrence::new("/repo/src/a.py", line + 1, 0));
        }
        aggregator.accept(&[node]).unwrap();
    }
    aggregator.finalize()
}
