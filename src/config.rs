//! Optional scan configuration file.
//!
//! The `java` section feeds `Scanner::with_artifacts` through
//! [`JavaConfig::artifacts`]. The binary has no scan command, so it only
//! warns when the section is set.
//!
//! ```yaml
//! exclude:
//!   python: ["^vendor/", "tests/"]
//! java:
//!   require_build: false
//!   dependency_jars: ["target/dependency/*.jar"]
//!   class_dirs: ["target/classes"]
//! provenance:
//!   git_url: https://github.com/acme/payments
//!   commit: 4f2a9c1
//! ```

use anyhow::{Context as AnyhowContext, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::Language;
use crate::scanning::BuildArtifacts;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Per-language exclude patterns replacing the language defaults.
    pub exclude: HashMap<Language, Vec<String>>,
    pub java: JavaConfig,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JavaConfig {
    pub require_build: bool,
    pub dependency_jars: Vec<String>,
    pub class_dirs: Vec<PathBuf>,
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            require_build: true,
            dependency_jars: Vec::new(),
            class_dirs: Vec::new(),
        }
    }
}

impl JavaConfig {
    /// True when any field differs from the defaults.
    pub fn is_customized(&self) -> bool {
        *self != Self::default()
    }

    pub fn artifacts(&self) -> BuildArtifacts {
        BuildArtifacts::new(self.dependency_jars.as_slice(), self.class_dirs.as_slice())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Provenance {
    pub git_url: Option<String>,
    pub revision: Option<String>,
    pub commit: Option<String>,
    pub subfolder: Option<String>,
}

impl Provenance {
    /// Values set in `overrides` win over the ones in `self`.
    pub fn overridden_by(&self, overrides: &Provenance) -> Provenance {
        Provenance {
            git_url: overrides.git_url.clone().or_else(|| self.git_url.clone()),
            revision: overrides.revision.clone().or_else(|| self.revision.clone()),
            commit: overrides.commit.clone().or_else(|| self.commit.clone()),
            subfolder: overrides
                .subfolder
                .clone()
                .or_else(|| self.subfolder.clone()),
        }
    }
}

impl ScanConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(content).context("Invalid scan configuration")?;
        Ok(config)
    }

    pub fn exclude_for(&self, language: Language) -> Option<&[String]> {
        self.exclude.get(&language).map(Vec::as_slice)
    }
}

/// Reads a YAML (or JSON) configuration file.
pub fn load(path: &Path) -> Result<ScanConfig> {
    debug!(path = %path.display(), "loading scan configuration");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config file: {}", path.display()))?;
    ScanConfig::from_yaml(&content)
        .with_context(|| format!("Failed to load config file: {}", path.display()))
}
