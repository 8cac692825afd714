use thiserror::Error;

use super::ClientDisconnected;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error(transparent)]
    ClientDisconnected(#[from] ClientDisconnected),
}

impl IndexError {
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}
