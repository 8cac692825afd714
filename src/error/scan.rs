use thiserror::Error;

use super::{CbomError, ClientDisconnected};
use crate::cli::Language;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("no {language} build artifacts found; the project must be built prior to scanning")]
    MissingBuildArtifacts { language: Language },

    #[error("detector failed on module '{module}'{}: {message}", file_suffix(.file))]
    Detector {
        module: String,
        file: Option<String>,
        message: String,
    },

    #[error(transparent)]
    Cbom(#[from] CbomError),

    #[error(transparent)]
    ClientDisconnected(#[from] ClientDisconnected),
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" (file '{f}')"))
        .unwrap_or_default()
}

impl ScanError {
    pub fn detector(
        module: impl Into<String>,
        file: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Detector {
            module: module.into(),
            file,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_build_artifacts_display() {
        let err = ScanError::MissingBuildArtifacts {
            language: Language::Java,
        };
        assert_eq!(
            err.to_string(),
            "no java build artifacts found; the project must be built prior to scanning"
        );
    }

    #[test]
    fn test_detector_display_with_file() {
        let err = ScanError::detector(
            "services",
            Some("src/Crypto.java".to_string()),
            "parse failure",
        );
        assert_eq!(
            err.to_string(),
            "detector failed on module 'services' (file 'src/Crypto.java'): parse failure"
        );
    }

    #[test]
    fn test_detector_display_without_file() {
        let err = ScanError::detector("core", None, "engine crashed");
        assert_eq!(
            err.to_string(),
            "detector failed on module 'core': engine crashed"
        );
    }
}
