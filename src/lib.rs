/// CBOM Assembler
///
/// Splits a source checkout into independently buildable project modules,
/// drives per-language crypto detectors over them and assembles what they
/// find into a single CycloneDX Cryptography Bill of Materials.
pub mod cbom;
pub mod cli;
pub mod config;
pub mod error;
pub mod indexing;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanning;
pub mod utils;

pub use cbom::CbomDocument;
pub use error::{ClientDisconnected, Error, Result};
pub use indexing::{IndexOutcome, ModuleIndexer, ProjectModule};
pub use progress::{ChannelProgressSink, ProgressMessage, ProgressSink};
pub use scanning::{FindingAggregator, ScanResult, Scanner};
