use serde::Serialize;
use std::path::Path;

use crate::cli::Language;
use crate::indexing::languages::{has_any_marker, has_marker, BuildKind, ModuleStrategy};

pub mod config;

use config::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PythonBuildKind {
    Toml,
    Setup,
}

pub struct PythonModule;

impl ModuleStrategy for PythonModule {
    fn language(&self) -> Language {
        Language::Python
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        FILE_EXTENSIONS
    }

    fn default_exclude_patterns(&self) -> &'static [&'static str] {
        EXCLUDE_PATTERNS
    }

    fn is_module(&self, directory: &Path) -> bool {
        has_marker(directory, PYPROJECT_MARKER) || has_any_marker(directory, SETUP_MARKERS)
    }

    fn classify_build_kind(&self, directory: &Path) -> Option<BuildKind> {
        if has_marker(directory, PYPROJECT_MARKER) {
            return Some(BuildKind::Python(PythonBuildKind::Toml));
        }
        if has_any_marker(directory, SETUP_MARKERS) {
            return Some(BuildKind::Python(PythonBuildKind::Setup));
        }
        None
    }
}
