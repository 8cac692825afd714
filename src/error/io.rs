use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("file '{path}' is not valid in any supported encoding")]
    UndecodableFile { path: PathBuf },
}

impl IoError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::file_not_found(path);
        }
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn undecodable(path: impl Into<PathBuf>) -> Self {
        Self::UndecodableFile { path: path.into() }
    }
}
