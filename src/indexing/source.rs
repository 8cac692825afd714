use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::Language;
use crate::error::IoError;
use crate::utils::relative_slash_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Encoding {
    #[serde(rename = "UTF-8")]
    Utf8,
    #[serde(rename = "ISO-8859-1")]
    Iso8859_1,
}

/// Encodings tried, in order, when a source file is materialized.
pub const DECODE_ORDER: &[Encoding] = &[Encoding::Utf8, Encoding::Iso8859_1];

impl Encoding {
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            // every byte is a valid Latin-1 code point
            Encoding::Iso8859_1 => Some(bytes.iter().copied().map(char::from).collect()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Iso8859_1 => "ISO-8859-1",
        }
    }
}

/// A decoded source file belonging to a project module.
#[derive(Debug, Clone)]
pub struct FileRef {
    absolute_path: PathBuf,
    relative_path: String,
    language: Language,
    contents: String,
    encoding: Encoding,
}

impl FileRef {
    /// Reads and decodes `path`. `relative_path` is computed against
    /// `module_root`.
    pub fn materialize(module_root: &Path, path: &Path, language: Language) -> Result<Self, IoError> {
        let bytes = fs::read(path).map_err(|e| IoError::read_error(path, e))?;
        Self::decode_with(module_root, path, language, &bytes, DECODE_ORDER)
    }

    fn decode_with(
        module_root: &Path,
        path: &Path,
        language: Language,
        bytes: &[u8],
        order: &[Encoding],
    ) -> Result<Self, IoError> {
        for &encoding in order {
            match encoding.decode(bytes) {
                Some(contents) => {
                    return Ok(Self {
                        absolute_path: path.to_path_buf(),
                        relative_path: relative_slash_path(module_root, path),
                        language,
                        contents,
                        encoding,
                    })
                }
                None => debug!(
                    file = %path.display(),
                    encoding = encoding.name(),
                    "File is not valid in this encoding"
                ),
            }
        }
        Err(IoError::undecodable(path))
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of lines, counting a trailing unterminated line.
    pub fn line_count(&self) -> usize {
        self.contents.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_materialize_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("pkg")).unwrap();
        let path = root.join("pkg/aes.py");
        fs::write(&path, "from Crypto.Cipher import AES\nkey = b'k' * 16\n").unwrap();

        let file = FileRef::materialize(root, &path, Language::Python).unwrap();

        assert_eq!(file.relative_path(), "pkg/aes.py");
        assert_eq!(file.file_name(), "aes.py");
        assert_eq!(file.encoding(), Encoding::Utf8);
        assert_eq!(file.line_count(), 2);
        assert_eq!(file.language(), Language::Python);
        assert_eq!(file.absolute_path(), path.as_path());
    }

    #[test]
    fn test_materialize_falls_back_to_latin1() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("legacy.c");
        // "caf\xe9" is not valid UTF-8
        fs::write(&path, b"/* caf\xe9 */\nint main() {}\n").unwrap();

        let file = FileRef::materialize(temp_dir.path(), &path, Language::Cpp).unwrap();

        assert_eq!(file.encoding(), Encoding::Iso8859_1);
        assert!(file.contents().contains("café"));
    }

    #[test]
    fn test_decode_fails_when_no_encoding_matches() {
        let result = FileRef::decode_with(
            Path::new("/repo"),
            Path::new("/repo/bad.c"),
            Language::Cpp,
            b"\xff\xfe",
            &[Encoding::Utf8],
        );
        assert!(matches!(result, Err(IoError::UndecodableFile { .. })));
    }

    #[test]
    fn test_materialize_missing_file() {
        let result = FileRef::materialize(
            Path::new("/nonexistent"),
            Path::new("/nonexistent/a.go"),
            Language::Go,
        );
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }
}
