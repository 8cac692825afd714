use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::cbom::CbomDocument;
use crate::error::ScanError;
use crate::indexing::ProjectModule;
use crate::progress::{send_label, ProgressSink};
use crate::scanning::{BuildArtifacts, DetectionContext, Detector, EngineState, FindingAggregator};

#[derive(Debug, Clone)]
pub struct ScanResult {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub scanned_lines: usize,
    pub scanned_files: usize,
    /// `None` when no detector reported anything.
    pub cbom: Option<CbomDocument>,
}

/// Runs one detector over every module of an index and assembles the
/// findings.
pub struct Scanner {
    detector: Box<dyn Detector>,
    engine: Arc<dyn EngineState>,
    scan_root: PathBuf,
    artifacts: BuildArtifacts,
    require_build: bool,
    progress: Option<Arc<dyn ProgressSink>>,
}

impl Scanner {
    pub fn new(
        detector: Box<dyn Detector>,
        engine: Arc<dyn EngineState>,
        scan_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            detector,
            engine,
            scan_root: scan_root.into(),
            artifacts: BuildArtifacts::default(),
            require_build: false,
            progress: None,
        }
    }

    pub fn with_artifacts(mut self, artifacts: BuildArtifacts, require_build: bool) -> Self {
        self.artifacts = artifacts;
        self.require_build = require_build;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn scan_root(&self) -> &Path {
        &self.scan_root
    }

    #[instrument(skip_all, fields(language = %self.detector.language(), modules = modules.len()))]
    pub fn scan(&self, modules: &[ProjectModule]) -> Result<ScanResult, ScanError> {
        let language = self.detector.language();
        if self.detector.requires_build_artifacts() {
            self.artifacts
                .check(language, modules.len(), self.require_build)?;
        }

        let started_at = Utc::now();
        let mut aggregator = FindingAggregator::new(&self.scan_root, Arc::clone(&self.engine));
        if let Some(progress) = &self.progress {
            aggregator = aggregator.with_progress(Arc::clone(progress));
        }

        let mut scanned_files = 0;
        let mut scanned_lines = 0;
        let total = modules.len();
        for (index, module) in modules.iter().enumerate() {
            send_label(
                self.progress.as_deref(),
                format!(
                    "Scanning {language} project {} ({}/{total})",
                    module.identifier(),
                    index + 1
                ),
            )?;
            info!(module = %module.identifier(), files = module.files().len(), "Scanning module");

            scanned_files += module.files().len();
            scanned_lines += module.line_count();

            let context = DetectionContext {
                module,
                scan_root: &self.scan_root,
                artifacts: &self.artifacts,
            };
            self.detector.detect(&context, &aggregator)?;
        }

        let cbom = aggregator.finalize();
        let finished_at = Utc::now();
        info!(
            files = scanned_files,
            lines = scanned_lines,
            findings = cbom.finding_count(),
            "Scan completed"
        );

        Ok(ScanResult {
            started_at,
            finished_at,
            scanned_lines,
            scanned_files,
            cbom: (!cbom.components().is_empty()).then_some(cbom),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Language;
    use crate::indexing::{strategy_for, ModuleIndexer};
    use crate::progress::{ChannelProgressSink, ProgressMessage};
    use crate::scanning::{
        AssetKind, CryptoFindingNode, FindingOccurrence, FindingSink, NoopEngine,
    };
    use std::fs;
    use tempfile::TempDir;

    /// Reports one AES finding at line 1 of every file it is given.
    struct FirstLineDetector {
        language: Language,
        requires_build: bool,
    }

    impl Detector for FirstLineDetector {
        fn language(&self) -> Language {
            self.language
        }

        fn requires_build_artifacts(&self) -> bool {
            self.requires_build
        }

        fn detect(
            &self,
            context: &DetectionContext<'_>,
            sink: &dyn FindingSink,
        ) -> Result<(), ScanError> {
            for file in context.module.files() {
                let node = CryptoFindingNode::new("AES", AssetKind::Algorithm).with_occurrence(
                    FindingOccurrence::new(file.absolute_path().to_string_lossy(), 1, 0),
                );
                sink.accept(&[node])?;
            }
            Ok(())
        }
    }

    fn python_detector() -> Box<dyn Detector> {
        Box::new(FirstLineDetector {
            language: Language::Python,
            requires_build: false,
        })
    }

    fn python_tree() -> (TempDir, Vec<ProjectModule>) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("svc/pkg")).unwrap();
        fs::write(root.join("svc/setup.py"), "setup()\n").unwrap();
        fs::write(root.join("svc/pkg/aes.py"), "import aes\nkey = 1\n").unwrap();

        let indexer = ModuleIndexer::new(strategy_for(Language::Python), root).unwrap();
        let modules = indexer.index(None).unwrap().modules;
        (temp_dir, modules)
    }

    #[test]
    fn test_scan_counts_and_relative_locations() {
        let (temp_dir, modules) = python_tree();
        let scanner = Scanner::new(python_detector(), Arc::new(NoopEngine), temp_dir.path());

        let result = scanner.scan(&modules).unwrap();

        assert_eq!(result.scanned_files, 2);
        assert_eq!(result.scanned_lines, 3);
        assert!(result.started_at <= result.finished_at);
        let cbom = result.cbom.unwrap();
        let mut locations: Vec<_> = cbom
            .components()
            .iter()
            .map(|c| c.occurrences()[0].location.clone())
            .collect();
        locations.sort();
        assert_eq!(locations, vec!["svc/pkg/aes.py", "svc/setup.py"]);
    }

    #[test]
    fn test_scan_without_modules_has_no_cbom() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = Scanner::new(python_detector(), Arc::new(NoopEngine), temp_dir.path());

        let result = scanner.scan(&[]).unwrap();

        assert_eq!(result.scanned_files, 0);
        assert!(result.cbom.is_none());
    }

    #[test]
    fn test_scan_labels_each_module() {
        let (temp_dir, modules) = python_tree();
        let (sink, rx) = ChannelProgressSink::channel();
        let scanner = Scanner::new(python_detector(), Arc::new(NoopEngine), temp_dir.path())
            .with_progress(Arc::new(sink));

        scanner.scan(&modules).unwrap();

        let labels: Vec<_> = rx
            .try_iter()
            .filter_map(|m| match m {
                ProgressMessage::Label(text) => Some(text),
                ProgressMessage::Detection(_) => None,
            })
            .collect();
        assert_eq!(labels, vec!["Scanning python project svc (1/1)"]);
    }

    #[test]
    fn test_strict_policy_refuses_before_scanning() {
        let (temp_dir, modules) = python_tree();
        let (sink, rx) = ChannelProgressSink::channel();
        let detector = Box::new(FirstLineDetector {
            language: Language::Java,
            requires_build: true,
        });
        let scanner = Scanner::new(detector, Arc::new(NoopEngine), temp_dir.path())
            .with_artifacts(BuildArtifacts::default(), true)
            .with_progress(Arc::new(sink));

        let err = scanner.scan(&modules).unwrap_err();

        assert!(matches!(err, ScanError::MissingBuildArtifacts { .. }));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_lenient_policy_scans_anyway() {
        let (temp_dir, modules) = python_tree();
        let detector = Box::new(FirstLineDetector {
            language: Language::Java,
            requires_build: true,
        });
        let scanner = Scanner::new(detector, Arc::new(NoopEngine), temp_dir.path())
            .with_artifacts(BuildArtifacts::default(), false);

        assert!(scanner.scan(&modules).unwrap().cbom.is_some());
    }
}
