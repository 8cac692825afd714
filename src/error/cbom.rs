use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CbomError {
    #[error("failed to serialize CBOM: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to deserialize CBOM: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("document is not a CycloneDX BOM: {reason}")]
    NonConforming { reason: String },

    #[error("failed to write CBOM to '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CbomError {
    pub fn non_conforming(reason: impl Into<String>) -> Self {
        Self::NonConforming {
            reason: reason.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_conforming_display() {
        let err = CbomError::non_conforming("bomFormat is 'SPDX'");
        assert_eq!(
            err.to_string(),
            "document is not a CycloneDX BOM: bomFormat is 'SPDX'"
        );
    }

    #[test]
    fn test_write_display() {
        let source = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = CbomError::write("/readonly/cbom.json", source);
        assert!(err
            .to_string()
            .starts_with("failed to write CBOM to '/readonly/cbom.json'"));
    }
}
