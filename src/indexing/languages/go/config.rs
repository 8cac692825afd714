pub const FILE_EXTENSIONS: &[&str] = &[".go"];

pub const EXCLUDE_PATTERNS: &[&str] = &["_test\\.go$", "testdata/"];

pub const GO_MOD_MARKER: &str = "go.mod";
