use serde::Serialize;

use crate::cli::Language;
use crate::indexing::{BuildKind, ProjectModule};

#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    pub root: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_kind: Option<BuildKind>,
    pub total_modules: usize,
    pub total_files: usize,
    pub modules: Vec<ModuleEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleEntry {
    pub identifier: String,
    pub root_path: String,
    pub file_count: usize,
    pub line_count: usize,
    pub files: Vec<String>,
}

impl ModuleEntry {
    pub fn from_module(module: &ProjectModule) -> Self {
        Self {
            identifier: module.identifier().to_string(),
            root_path: module.root_path().to_string_lossy().into_owned(),
            file_count: module.files().len(),
            line_count: module.line_count(),
            files: module
                .files()
                .iter()
                .map(|f| f.relative_path().to_string())
                .collect(),
        }
    }
}
