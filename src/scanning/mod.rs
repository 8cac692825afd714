//! Driving detectors over indexed modules and folding their findings into
//! one CBOM.

pub mod aggregator;
pub mod artifacts;
pub mod detector;
pub mod finding;
pub mod scanner;

pub use aggregator::FindingAggregator;
pub use artifacts::BuildArtifacts;
pub use detector::{DetectionContext, Detector, EngineState, FindingSink, NoopEngine};
pub use finding::{AssetKind, CryptoFindingNode, FindingKey, FindingOccurrence};
pub use scanner::{ScanResult, Scanner};
