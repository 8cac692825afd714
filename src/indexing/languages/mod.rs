use serde::Serialize;
use std::path::Path;

use crate::cli::Language;

pub mod cpp;
pub mod go;
pub mod java;
pub mod python;

pub use cpp::{CppBuildKind, CppModule};
pub use go::{GoBuildKind, GoModule};
pub use java::{JavaBuildKind, JavaModule};
pub use python::{PythonBuildKind, PythonModule};

/// Which build marker identified a module, per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BuildKind {
    Python(PythonBuildKind),
    Cpp(CppBuildKind),
    Java(JavaBuildKind),
    Go(GoBuildKind),
}

impl BuildKind {
    pub fn language(&self) -> Language {
        match self {
            BuildKind::Python(_) => Language::Python,
            BuildKind::Cpp(_) => Language::Cpp,
            BuildKind::Java(_) => Language::Java,
            BuildKind::Go(_) => Language::Go,
        }
    }
}

/// Per-language knowledge the module indexer needs: which files to pick
/// up and which directories count as independently buildable modules.
pub trait ModuleStrategy: Send + Sync {
    fn language(&self) -> Language;

    /// File name suffixes, including the leading dot.
    fn file_extensions(&self) -> &'static [&'static str];

    fn default_exclude_patterns(&self) -> &'static [&'static str];

    fn is_module(&self, directory: &Path) -> bool;

    fn classify_build_kind(&self, directory: &Path) -> Option<BuildKind>;
}

pub(crate) fn has_marker(directory: &Path, marker: &str) -> bool {
    directory.join(marker).is_file()
}

pub(crate) fn has_any_marker(directory: &Path, markers: &[&str]) -> bool {
    markers.iter().any(|m| has_marker(directory, m))
}

pub fn strategy_for(language: Language) -> Box<dyn ModuleStrategy> {
    match language {
        Language::Java => Box::new(JavaModule),
        Language::Python => Box::new(PythonModule),
        Language::Cpp => Box::new(CppModule),
        Language::Go => Box::new(GoModule),
    }
}

pub struct LanguageRegistry {
    modules: Vec<Box<dyn ModuleStrategy>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            modules: Vec::new(),
        };

        for language in [Language::Java, Language::Python, Language::Cpp, Language::Go] {
            registry.register(strategy_for(language));
        }
        registry
    }

    pub fn register(&mut self, module: Box<dyn ModuleStrategy>) {
        self.modules.push(module);
    }

    pub fn get_module(&self, language: Language) -> Option<&dyn ModuleStrategy> {
        self.modules
            .iter()
            .find(|m| m.language() == language)
            .map(|m| m.as_ref())
    }

    /// Languages whose build markers sit directly in `root`.
    pub fn detect_languages(&self, root: &Path) -> Vec<Language> {
        self.modules
            .iter()
            .filter(|m| m.is_module(root))
            .map(|m| m.language())
            .collect()
    }

    pub fn all_modules(&self) -> &[Box<dyn ModuleStrategy>] {
        &self.modules
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_registry_has_every_language() {
        let registry = LanguageRegistry::new();
        assert_eq!(registry.all_modules().len(), 4);
        for language in [Language::Java, Language::Python, Language::Cpp, Language::Go] {
            assert_eq!(registry.get_module(language).unwrap().language(), language);
        }
    }

    #[test]
    fn test_detect_multiple_languages() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("go.mod"), "module example.com/x\n").unwrap();
        fs::write(root.join("CMakeLists.txt"), "project(x)\n").unwrap();

        let registry = LanguageRegistry::new();
        let languages = registry.detect_languages(root);

        assert_eq!(languages, vec![Language::Cpp, Language::Go]);
    }

    #[test]
    fn test_marker_must_be_a_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("pom.xml")).unwrap();
        assert!(!has_marker(temp_dir.path(), "pom.xml"));
        assert!(LanguageRegistry::new()
            .detect_languages(temp_dir.path())
            .is_empty());
    }

    #[test]
    fn test_build_kind_language() {
        assert_eq!(
            BuildKind::Cpp(CppBuildKind::Cmake).language(),
            Language::Cpp
        );
        assert_eq!(
            BuildKind::Python(PythonBuildKind::Setup).language(),
            Language::Python
        );
    }
}
