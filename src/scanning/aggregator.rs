use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

use crate::cbom::{CbomDocument, Component};
use crate::error::{CbomError, ScanError};
use crate::progress::{ProgressMessage, ProgressSink};
use crate::scanning::finding::{derive_components, FindingKey};
use crate::scanning::{CryptoFindingNode, EngineState, FindingSink};
use crate::utils::{absolutize, relative_slash_path};

struct AggregatorState {
    document: CbomDocument,
    seen: HashSet<FindingKey>,
}

/// Collects detector output for one scan into a single CBOM.
///
/// Every accepted finding is stored, duplicates included. When a progress
/// sink is attached each batch is also reported live, minus occurrences
/// this aggregator has already reported before.
pub struct FindingAggregator {
    roots: Vec<PathBuf>,
    engine: Arc<dyn EngineState>,
    progress: Option<Arc<dyn ProgressSink>>,
    state: Mutex<AggregatorState>,
}

impl FindingAggregator {
    pub fn new(scan_root: &Path, engine: Arc<dyn EngineState>) -> Self {
        let given = absolutize(scan_root);
        let mut roots = Vec::with_capacity(2);
        if let Ok(canonical) = scan_root.canonicalize() {
            roots.push(canonical);
        }
        if !roots.contains(&given) {
            roots.push(given);
        }

        Self {
            roots,
            engine,
            progress: None,
            state: Mutex::new(AggregatorState {
                document: CbomDocument::new(),
                seen: HashSet::new(),
            }),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = Some(progress);
        self
    }

    fn lock(&self) -> MutexGuard<'_, AggregatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores the components derived from `nodes` and, with a sink
    /// attached, reports the not yet seen part of each one.
    pub fn accept(&self, nodes: &[CryptoFindingNode]) -> Result<(), ScanError> {
        let (components, dependencies) = derive_components(nodes);
        let mut state = self.lock();
        debug!(
            components = components.len(),
            dependencies = dependencies.len(),
            "Accepted findings"
        );
        // Stored unconditionally, ahead of any live report.
        state.document.extend(components.clone(), dependencies);

        if let Some(progress) = self.progress.as_deref() {
            for component in &components {
                let Some(mut fresh) = unseen_part(component, &mut state.seen) else {
                    trace!(asset = %component.name, "Skipping already reported finding");
                    continue;
                };
                relativize_occurrences(&mut fresh, &self.roots);
                let payload = serde_json::to_string(&fresh).map_err(CbomError::Serialize)?;
                progress.send(ProgressMessage::Detection(payload))?;
            }
        }
        Ok(())
    }

    /// Rewrites stored locations relative to the scan root, resets the
    /// detection engine and returns the accumulated document.
    pub fn finalize(&self) -> CbomDocument {
        let mut state = self.lock();
        for component in state.document.components_mut() {
            relativize_occurrences(component, &self.roots);
        }
        self.engine.reset();

        debug!(
            components = state.document.components().len(),
            findings = state.document.finding_count(),
            "Finalized CBOM"
        );
        state.document.clone()
    }
}

impl FindingSink for FindingAggregator {
    fn accept(&self, nodes: &[CryptoFindingNode]) -> Result<(), ScanError> {
        FindingAggregator::accept(self, nodes)
    }
}

/// Copy of `component` holding only occurrences whose key was not in
/// `seen`, or `None` if nothing new remains. New keys are recorded.
fn unseen_part(component: &Component, seen: &mut HashSet<FindingKey>) -> Option<Component> {
    let mut fresh = component.clone();
    let occurrences = fresh.occurrences_mut()?;
    occurrences.retain(|o| seen.insert(FindingKey::of(&component.name, o)));
    if occurrences.is_empty() {
        return None;
    }
    Some(fresh)
}

fn relativize_occurrences(component: &mut Component, roots: &[PathBuf]) {
    let Some(occurrences) = component.occurrences_mut() else {
        return;
    };
    for occurrence in occurrences {
        let location = Path::new(&occurrence.location);
        if let Some(root) = roots.iter().find(|root| location.starts_with(root)) {
            occurrence.location = relative_slash_path(root, location);
        }
    }
}
