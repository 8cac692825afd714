pub const FILE_EXTENSIONS: &[&str] = &[".py"];

pub const EXCLUDE_PATTERNS: &[&str] = &["src/test/", "tests/"];

pub const PYPROJECT_MARKER: &str = "pyproject.toml";

pub const SETUP_MARKERS: &[&str] = &["setup.cfg", "setup.py"];
