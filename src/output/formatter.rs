use anyhow::Result;
use std::path::Path;

use crate::cli::Language;
use crate::indexing::IndexOutcome;

use super::{IndexReport, ModuleEntry};

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format_index(root: &Path, language: Language, outcome: &IndexOutcome) -> Result<String> {
        let report = Self::build_index_report(root, language, outcome);
        Ok(serde_json::to_string_pretty(&report)?)
    }

    pub fn build_index_report(
        root: &Path,
        language: Language,
        outcome: &IndexOutcome,
    ) -> IndexReport {
        let modules: Vec<ModuleEntry> = outcome
            .modules
            .iter()
            .map(ModuleEntry::from_module)
            .collect();
        let total_files = modules.iter().map(|m| m.file_count).sum();

        IndexReport {
            root: root.to_string_lossy().into_owned(),
            language,
            build_kind: outcome.build_kind,
            total_modules: modules.len(),
            total_files,
            modules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexing::{strategy_for, ModuleIndexer};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_index_report_json() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("native/src")).unwrap();
        fs::write(root.join("native/CMakeLists.txt"), "project(x)\n").unwrap();
        fs::write(root.join("native/src/aes.c"), "int main() {}\n").unwrap();
        fs::write(root.join("native/src/aes.h"), "").unwrap();

        let outcome = ModuleIndexer::new(strategy_for(Language::Cpp), root)
            .unwrap()
            .index(None)
            .unwrap();
        let output = OutputFormatter::format_index(root, Language::Cpp, &outcome).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["language"], "cpp");
        assert_eq!(json["build_kind"], "cmake");
        assert_eq!(json["total_modules"], 1);
        assert_eq!(json["total_files"], 2);
        assert_eq!(json["modules"][0]["identifier"], "native");
        assert_eq!(
            json["modules"][0]["files"],
            serde_json::json!(["src/aes.c", "src/aes.h"])
        );
    }

    #[test]
    fn test_empty_outcome() {
        let outcome = IndexOutcome::default();
        let report = OutputFormatter::build_index_report(Path::new("/repo"), Language::Go, &outcome);
        assert_eq!(report.total_modules, 0);
        assert_eq!(report.total_files, 0);
        assert!(report.build_kind.is_none());
    }
}
