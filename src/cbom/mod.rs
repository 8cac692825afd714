//! The accumulated CycloneDX document and the operations callers perform on
//! it once scanning is over.

pub mod model;

pub use model::{
    Bom, Component, CryptoProperties, Dependency, Evidence, Metadata, Occurrence, Property,
};

use chrono::{SubsecRound, Utc};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

use crate::error::CbomError;
use model::{OrganizationalEntity, Service, ToolChoice, Tools, BOM_FORMAT, SPEC_VERSION};

pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const TOOL_PROVIDER: &str = "cbom-assembler contributors";

pub const PROPERTY_GIT_URL: &str = "gitUrl";
pub const PROPERTY_REVISION: &str = "revision";
pub const PROPERTY_COMMIT: &str = "commit";
pub const PROPERTY_SUBFOLDER: &str = "subfolder";

#[derive(Debug, Clone, PartialEq)]
pub struct CbomDocument {
    bom: Bom,
}

impl Default for CbomDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CbomDocument {
    /// An empty CycloneDX 1.6 document with a fresh serial number.
    pub fn new() -> Self {
        Self {
            bom: Bom {
                bom_format: BOM_FORMAT.to_string(),
                spec_version: SPEC_VERSION.to_string(),
                serial_number: Some(format!("urn:uuid:{}", Uuid::new_v4())),
                version: Some(1),
                metadata: None,
                components: Vec::new(),
                dependencies: Vec::new(),
                extra: Map::new(),
            },
        }
    }

    pub fn bom(&self) -> &Bom {
        &self.bom
    }

    pub fn components(&self) -> &[Component] {
        &self.bom.components
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.bom.dependencies
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.bom.metadata.as_ref()
    }

    pub(crate) fn components_mut(&mut self) -> &mut Vec<Component> {
        &mut self.bom.components
    }

    pub(crate) fn extend(
        &mut self,
        components: impl IntoIterator<Item = Component>,
        dependencies: impl IntoIterator<Item = Dependency>,
    ) {
        self.bom.components.extend(components);
        self.bom.dependencies.extend(dependencies);
    }

    /// Appends `other`'s components and dependency edges. No deduplication
    /// happens here; edges that reference the same component are kept side
    /// by side.
    pub fn merge(&mut self, other: CbomDocument) {
        debug!(
            components = other.bom.components.len(),
            dependencies = other.bom.dependencies.len(),
            "Merging CBOM"
        );
        let Bom {
            components,
            dependencies,
            ..
        } = other.bom;
        self.extend(components, dependencies);
    }

    /// Replaces the metadata block with a fresh timestamp, this tool's
    /// identity and one property per provided provenance value.
    pub fn add_metadata(
        &mut self,
        git_url: Option<&str>,
        revision: Option<&str>,
        commit: Option<&str>,
        subfolder: Option<&str>,
    ) {
        let properties = [
            (PROPERTY_GIT_URL, git_url),
            (PROPERTY_REVISION, revision),
            (PROPERTY_COMMIT, commit),
            (PROPERTY_SUBFOLDER, subfolder),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| Property::new(name, v)))
        .collect();

        self.bom.metadata = Some(Metadata {
            timestamp: Some(Utc::now().trunc_subsecs(0)),
            tools: Some(Tools::Choice(ToolChoice {
                components: Vec::new(),
                services: vec![tool_service()],
                extra: Map::new(),
            })),
            properties,
            extra: Map::new(),
        });
    }

    /// Total number of occurrences across all components.
    pub fn finding_count(&self) -> usize {
        self.bom
            .components
            .iter()
            .map(|c| c.occurrences().len())
            .sum()
    }

    pub fn to_json(&self) -> Result<Value, CbomError> {
        serde_json::to_value(&self.bom).map_err(CbomError::Serialize)
    }

    pub fn to_json_string(&self) -> Result<String, CbomError> {
        serde_json::to_string_pretty(&self.bom).map_err(CbomError::Serialize)
    }

    pub fn from_json(value: Value) -> Result<Self, CbomError> {
        let bom: Bom = serde_json::from_value(value).map_err(CbomError::Deserialize)?;
        Self::from_bom(bom)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CbomError> {
        let bom: Bom = serde_json::from_str(content).map_err(CbomError::Deserialize)?;
        Self::from_bom(bom)
    }

    fn from_bom(bom: Bom) -> Result<Self, CbomError> {
        if bom.bom_format != BOM_FORMAT {
            return Err(CbomError::non_conforming(format!(
                "bomFormat is '{}'",
                bom.bom_format
            )));
        }
        Ok(Self { bom })
    }

    pub fn write(&self, path: &Path) -> Result<(), CbomError> {
        let content = self.to_json_string()?;
        std::fs::write(path, content).map_err(|e| CbomError::write(path, e))?;
        debug!(path = %path.display(), "Wrote CBOM");
        Ok(())
    }
}

fn tool_service() -> Service {
    Service {
        name: TOOL_NAME.to_string(),
        version: Some(TOOL_VERSION.to_string()),
        provider: Some(OrganizationalEntity {
            name: Some(TOOL_PROVIDER.to_string()),
            extra: Map::new(),
        }),
        extra: Map::new(),
    }
}
