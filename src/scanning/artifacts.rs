use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cli::Language;
use crate::error::ScanError;
use crate::utils::absolutize;

const GLOB_CHARS: [char; 4] = ['*', '?', '[', '{'];

/// Compiled output handed to detectors that resolve types semantically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArtifacts {
    dependency_jars: Vec<String>,
    class_dirs: Vec<PathBuf>,
}

impl BuildArtifacts {
    pub fn new<S: AsRef<str>, P: AsRef<Path>>(dependency_jars: &[S], class_dirs: &[P]) -> Self {
        Self {
            dependency_jars: dependency_jars
                .iter()
                .map(|jar| normalize_jar_pattern(jar.as_ref()))
                .collect(),
            class_dirs: class_dirs
                .iter()
                .map(|dir| absolutize(dir.as_ref()))
                .collect(),
        }
    }

    /// Absolute jar paths; glob patterns keep their wildcard tail.
    pub fn dependency_jars(&self) -> &[String] {
        &self.dependency_jars
    }

    pub fn class_dirs(&self) -> &[PathBuf] {
        &self.class_dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dependency_jars.is_empty() && self.class_dirs.is_empty()
    }

    /// Refuses a scan of `module_count` modules without artifacts when
    /// `require_build` is set; otherwise only warns.
    pub fn check(
        &self,
        language: Language,
        module_count: usize,
        require_build: bool,
    ) -> Result<(), ScanError> {
        if module_count == 0 || !self.is_empty() {
            return Ok(());
        }
        if require_build {
            return Err(ScanError::MissingBuildArtifacts { language });
        }
        warn!(
            %language,
            "No build artifacts provided, scanning with reduced accuracy"
        );
        Ok(())
    }
}

/// Makes the literal part of a jar path absolute and normalized, leaving
/// everything from the first glob character on untouched.
fn normalize_jar_pattern(pattern: &str) -> String {
    let split = pattern.find(&GLOB_CHARS[..]).unwrap_or(pattern.len());
    let (literal, tail) = pattern.split_at(split);

    let base = if literal.is_empty() {
        Path::new(".")
    } else {
        Path::new(literal)
    };
    let mut normalized = absolutize(base).to_string_lossy().into_owned();
    // `deps/bc-*.jar` keeps `bc-` as a file name prefix, not a directory.
    let wants_separator = literal.is_empty() || literal.ends_with('/');
    if wants_separator && !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized.push_str(tail);
    normalized
}
