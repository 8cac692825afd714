use serde::Serialize;
use std::path::Path;

use crate::cli::Language;
use crate::indexing::languages::{has_marker, BuildKind, ModuleStrategy};

pub mod config;

use config::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GoBuildKind {
    GoMod,
}

pub struct GoModule;

impl ModuleStrategy for GoModule {
    fn language(&self) -> Language {
        Language::Go
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        FILE_EXTENSIONS
    }

    fn default_exclude_patterns(&self) -> &'static [&'static str] {
        EXCLUDE_PATTERNS
    }

    fn is_module(&self, directory: &Path) -> bool {
        has_marker(directory, GO_MOD_MARKER)
    }

    fn classify_build_kind(&self, directory: &Path) -> Option<BuildKind> {
        self.is_module(directory)
            .then_some(BuildKind::Go(GoBuildKind::GoMod))
    }
}
