use serde::Serialize;
use std::path::Path;

use crate::cli::Language;
use crate::indexing::languages::{has_marker, BuildKind, ModuleStrategy};

pub mod config;

use config::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CppBuildKind {
    Cmake,
    Make,
}

pub struct CppModule;

impl ModuleStrategy for CppModule {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        FILE_EXTENSIONS
    }

    fn default_exclude_patterns(&self) -> &'static [&'static str] {
        EXCLUDE_PATTERNS
    }

    fn is_module(&self, directory: &Path) -> bool {
        directory.is_dir()
            && (has_marker(directory, CMAKE_MARKER) || has_marker(directory, MAKE_MARKER))
    }

    fn classify_build_kind(&self, directory: &Path) -> Option<BuildKind> {
        if has_marker(directory, CMAKE_MARKER) {
            Some(BuildKind::Cpp(CppBuildKind::Cmake))
        } else if has_marker(directory, MAKE_MARKER) {
            Some(BuildKind::Cpp(CppBuildKind::Make))
        } else {
            None
        }
    }
}
