use regex::Regex;

use crate::error::IndexError;

/// Compiled exclusion rules. A path is excluded when any pattern finds a
/// match anywhere in its scan-root-relative form.
#[derive(Debug, Clone, Default)]
pub struct ExcludePatterns {
    patterns: Vec<Regex>,
}

impl ExcludePatterns {
    /// Compiles every pattern up front; the first malformed one is reported.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, IndexError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|e| IndexError::invalid_pattern(p, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_excluded(&self, relative_path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(relative_path))
    }

    pub fn as_strs(&self) -> Vec<&str> {
        self.patterns.iter().map(Regex::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
