use serde::{Deserialize, Serialize};
use serde_json::Map;
use uuid::Uuid;
use xxhash_rust::xxh3::xxh3_64;

use crate::cbom::model::CRYPTOGRAPHIC_ASSET;
use crate::cbom::{Component, CryptoProperties, Dependency, Evidence, Occurrence};

/// CycloneDX `cryptoProperties.assetType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    Algorithm,
    Certificate,
    Protocol,
    RelatedCryptoMaterial,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Algorithm => "algorithm",
            AssetKind::Certificate => "certificate",
            AssetKind::Protocol => "protocol",
            AssetKind::RelatedCryptoMaterial => "related-crypto-material",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a detector saw an asset. `location` is the absolute file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingOccurrence {
    pub location: String,
    pub line: u32,
    pub offset: u32,
}

impl FindingOccurrence {
    pub fn new(location: impl Into<String>, line: u32, offset: u32) -> Self {
        Self {
            location: location.into(),
            line,
            offset,
        }
    }
}

/// A detector's report of one cryptographic asset. Children are assets
/// the parent is composed of, e.g. the key of a cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoFindingNode {
    pub asset_name: String,
    pub asset_kind: AssetKind,
    pub occurrences: Vec<FindingOccurrence>,
    pub children: Vec<CryptoFindingNode>,
}

impl CryptoFindingNode {
    pub fn new(asset_name: impl Into<String>, asset_kind: AssetKind) -> Self {
        Self {
            asset_name: asset_name.into(),
            asset_kind,
            occurrences: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_occurrence(mut self, occurrence: FindingOccurrence) -> Self {
        self.occurrences.push(occurrence);
        self
    }

    pub fn with_child(mut self, child: CryptoFindingNode) -> Self {
        self.children.push(child);
        self
    }

    fn to_component(&self, bom_ref: String) -> Component {
        let occurrences: Vec<Occurrence> = self
            .occurrences
            .iter()
            .map(|o| Occurrence {
                location: o.location.clone(),
                line: Some(o.line),
                offset: Some(o.offset),
                additional_context: None,
                extra: Map::new(),
            })
            .collect();

        Component {
            component_type: CRYPTOGRAPHIC_ASSET.to_string(),
            bom_ref: Some(bom_ref),
            name: self.asset_name.clone(),
            evidence: (!occurrences.is_empty()).then(|| Evidence {
                occurrences,
                extra: Map::new(),
            }),
            crypto_properties: Some(CryptoProperties {
                asset_type: self.asset_kind.as_str().to_string(),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }
}

/// Flattens finding trees into components, parents before their children,
/// plus one dependency edge per node that has children.
pub(crate) fn derive_components(nodes: &[CryptoFindingNode]) -> (Vec<Component>, Vec<Dependency>) {
    let mut components = Vec::new();
    let mut dependencies = Vec::new();
    for node in nodes {
        derive_node(node, &mut components, &mut dependencies);
    }
    (components, dependencies)
}

fn derive_node(
    node: &CryptoFindingNode,
    components: &mut Vec<Component>,
    dependencies: &mut Vec<Dependency>,
) -> String {
    let bom_ref = Uuid::new_v4().to_string();
    components.push(node.to_component(bom_ref.clone()));

    let child_refs: Vec<String> = node
        .children
        .iter()
        .map(|child| derive_node(child, components, dependencies))
        .collect();
    if !child_refs.is_empty() {
        dependencies.push(Dependency::new(bom_ref.clone(), child_refs));
    }
    bom_ref
}

/// Identity of one occurrence of one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FindingKey(u64);

impl FindingKey {
    pub fn new(asset_name: &str, location: &str, line: Option<u32>, offset: Option<u32>) -> Self {
        let mut input = Vec::with_capacity(asset_name.len() + location.len() + 18);
        input.extend(asset_name.as_bytes());
        input.push(0);
        input.extend(location.as_bytes());
        input.push(0);
        for field in [line, offset] {
            match field {
                Some(value) => {
                    input.push(1);
                    input.extend(value.to_le_bytes());
                }
                None => input.push(0),
            }
        }
        Self(xxh3_64(&input))
    }

    pub fn of(asset_name: &str, occurrence: &Occurrence) -> Self {
        Self::new(
            asset_name,
            &occurrence.location,
            occurrence.line,
            occurrence.offset,
        )
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}
