use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{ClientDisconnected, IndexError};
use crate::indexing::{BuildKind, ExcludePatterns, FileRef, ModuleStrategy, ProjectModule};
use crate::progress::{send_label, ProgressSink};
use crate::utils::{absolutize, relative_slash_path};

const GIT_DIR: &str = ".git";

/// Result of one indexing run.
#[derive(Debug, Default)]
pub struct IndexOutcome {
    /// Modules in depth-first, name-sorted discovery order.
    pub modules: Vec<ProjectModule>,
    /// Build kind of the first module detected during the run.
    pub build_kind: Option<BuildKind>,
}

/// Walks a directory tree once and partitions the files a language cares
/// about into [`ProjectModule`]s.
///
/// A directory holding a build marker becomes a module and absorbs every
/// matching file beneath it, except files under nested marker directories,
/// which become modules of their own. When the walk of a marker-less
/// directory finishes and no module has been produced anywhere in the run
/// yet, that directory becomes a fallback module. The check is run-wide, so
/// among several marker-less sibling trees only the first one explored can
/// receive the fallback.
pub struct ModuleIndexer {
    strategy: Box<dyn ModuleStrategy>,
    base_directory: PathBuf,
    excludes: ExcludePatterns,
    progress: Option<Arc<dyn ProgressSink>>,
}

impl ModuleIndexer {
    /// Creates an indexer using the language's default exclude patterns.
    pub fn new(
        strategy: Box<dyn ModuleStrategy>,
        base_directory: impl Into<PathBuf>,
    ) -> Result<Self, IndexError> {
        let excludes = ExcludePatterns::compile(strategy.default_exclude_patterns())?;
        Ok(Self {
            strategy,
            base_directory: base_directory.into(),
            excludes,
            progress: None,
        })
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Installs exclude patterns; `None` restores the language defaults.
    /// Fails without changing the current patterns if any is malformed.
    pub fn set_exclude_patterns<S: AsRef<str>>(
        &mut self,
        patterns: Option<&[S]>,
    ) -> Result<(), IndexError> {
        self.excludes = match patterns {
            Some(patterns) => ExcludePatterns::compile(patterns)?,
            None => ExcludePatterns::compile(self.strategy.default_exclude_patterns())?,
        };
        Ok(())
    }

    pub fn exclude_patterns(&self) -> &ExcludePatterns {
        &self.excludes
    }

    pub fn strategy(&self) -> &dyn ModuleStrategy {
        self.strategy.as_ref()
    }

    /// Indexes the base directory, or `package_folder` resolved against it.
    /// Identifiers and exclusion paths are relative to that resolved root.
    #[instrument(skip(self), fields(language = %self.strategy.language()))]
    pub fn index(&self, package_folder: Option<&Path>) -> Result<IndexOutcome, IndexError> {
        let root = match package_folder {
            Some(folder) => self.base_directory.join(folder),
            None => self.base_directory.clone(),
        };
        let root = root.canonicalize().unwrap_or_else(|_| absolutize(&root));

        send_label(self.progress.as_deref(), "Indexing projects ...")?;
        info!("Indexing projects ...");

        if !root.is_dir() {
            warn!(root = %root.display(), "Index root is not a directory");
        }

        let walk = Walk {
            indexer: self,
            root: &root,
        };
        let mut outcome = IndexOutcome::default();
        walk.detect_modules(&root, &mut outcome)?;

        debug!(
            modules = outcome.modules.len(),
            build_kind = ?outcome.build_kind,
            "Indexing completed"
        );
        Ok(outcome)
    }
}

/// Per-run view of the indexer; run-wide accumulation lives in the
/// [`IndexOutcome`] threaded through every call.
struct Walk<'a> {
    indexer: &'a ModuleIndexer,
    root: &'a Path,
}

impl Walk<'_> {
    fn is_excluded(&self, path: &Path) -> bool {
        self.indexer
            .excludes
            .is_excluded(&relative_slash_path(self.root, path))
    }

    fn detect_modules(
        &self,
        directory: &Path,
        outcome: &mut IndexOutcome,
    ) -> Result<(), ClientDisconnected> {
        if !directory.is_dir() || self.is_excluded(directory) {
            return Ok(());
        }

        let strategy = self.indexer.strategy.as_ref();
        if strategy.is_module(directory) {
            if outcome.build_kind.is_none() {
                outcome.build_kind = strategy.classify_build_kind(directory);
            }
            return self.add_module(directory, outcome);
        }

        for entry in list_directory(directory) {
            if entry.file_type().is_dir() && entry.file_name() != GIT_DIR {
                self.detect_modules(entry.path(), outcome)?;
            }
        }

        if outcome.modules.is_empty() {
            trace!(directory = %directory.display(), "No module found yet, using fallback");
            self.add_module(directory, outcome)?;
        }
        Ok(())
    }

    fn add_module(
        &self,
        directory: &Path,
        outcome: &mut IndexOutcome,
    ) -> Result<(), ClientDisconnected> {
        if self.is_excluded(directory) {
            return Ok(());
        }

        let identifier = relative_slash_path(self.root, directory);
        let mut files = Vec::new();
        self.collect_input_files(directory, directory, outcome, &mut files)?;

        if files.is_empty() {
            trace!(module = %identifier, "Skipping module without matching files");
            return Ok(());
        }

        let extensions = format!("[{}]", self.indexer.strategy.file_extensions().join(", "));
        send_label(
            self.indexer.progress.as_deref(),
            format!(
                "Found project module '{identifier}' [{} {extensions} files]",
                files.len()
            ),
        )?;
        info!(
            module = %identifier,
            files = files.len(),
            "Found project module"
        );

        outcome.modules.push(ProjectModule::new(
            identifier,
            directory.to_path_buf(),
            files,
        ));
        Ok(())
    }

    fn collect_input_files(
        &self,
        directory: &Path,
        module_root: &Path,
        outcome: &mut IndexOutcome,
        files: &mut Vec<FileRef>,
    ) -> Result<(), ClientDisconnected> {
        let strategy = self.indexer.strategy.as_ref();

        for entry in list_directory(directory) {
            let path = entry.path();

            if entry.file_type().is_dir() {
                if entry.file_name() == GIT_DIR {
                    continue;
                }
                if strategy.is_module(path) {
                    self.add_module(path, outcome)?;
                } else {
                    self.collect_input_files(path, module_root, outcome, files)?;
                }
                continue;
            }

            if !path.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            let matches_extension = strategy
                .file_extensions()
                .iter()
                .any(|ext| name.ends_with(ext));
            if !matches_extension || self.is_excluded(path) {
                continue;
            }

            match FileRef::materialize(module_root, path, strategy.language()) {
                Ok(file) => files.push(file),
                Err(e) => debug!(file = %path.display(), error = %e, "Dropping unreadable file"),
            }
        }
        Ok(())
    }
}

/// Immediate children of `directory`, sorted by file name. Unreadable
/// directories list as empty.
fn list_directory(directory: &Path) -> Vec<DirEntry> {
    WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(directory = %directory.display(), error = %e, "Cannot list directory");
                None
            }
        })
        .collect()
}
