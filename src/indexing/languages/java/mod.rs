use serde::Serialize;
use std::path::Path;

use crate::cli::Language;
use crate::indexing::languages::{has_any_marker, has_marker, BuildKind, ModuleStrategy};

pub mod config;

use config::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JavaBuildKind {
    Maven,
    Gradle,
}

pub struct JavaModule;

impl ModuleStrategy for JavaModule {
    fn language(&self) -> Language {
        Language::Java
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        FILE_EXTENSIONS
    }

    fn default_exclude_patterns(&self) -> &'static [&'static str] {
        EXCLUDE_PATTERNS
    }

    fn is_module(&self, directory: &Path) -> bool {
        has_marker(directory, MAVEN_MARKER) || has_any_marker(directory, GRADLE_MARKERS)
    }

    fn classify_build_kind(&self, directory: &Path) -> Option<BuildKind> {
        if has_marker(directory, MAVEN_MARKER) {
            Some(BuildKind::Java(JavaBuildKind::Maven))
        } else if has_any_marker(directory, GRADLE_MARKERS) {
            Some(BuildKind::Java(JavaBuildKind::Gradle))
        } else {
            None
        }
    }
}
