use std::path::Path;

use crate::cli::Language;
use crate::error::ScanError;
use crate::indexing::ProjectModule;
use crate::scanning::{BuildArtifacts, CryptoFindingNode};

/// Receives finding batches from a detector while it runs.
pub trait FindingSink: Send + Sync {
    fn accept(&self, nodes: &[CryptoFindingNode]) -> Result<(), ScanError>;
}

/// Process-wide analysis state kept by a detection engine between calls.
pub trait EngineState: Send + Sync {
    fn reset(&self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEngine;

impl EngineState for NoopEngine {
    fn reset(&self) {}
}

/// Everything a detector may look at for one module.
pub struct DetectionContext<'a> {
    pub module: &'a ProjectModule,
    pub scan_root: &'a Path,
    pub artifacts: &'a BuildArtifacts,
}

/// A language-specific crypto detector. Implementations parse the module's
/// files and push what they find into the sink, in as many batches as they
/// like.
pub trait Detector: Send + Sync {
    fn language(&self) -> Language;

    /// Whether results are only trustworthy with compiled output available.
    fn requires_build_artifacts(&self) -> bool {
        false
    }

    fn detect(&self, context: &DetectionContext<'_>, sink: &dyn FindingSink)
        -> Result<(), ScanError>;
}
