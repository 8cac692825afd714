pub const FILE_EXTENSIONS: &[&str] = &[".c", ".cc", ".cpp", ".cxx", ".h", ".hh", ".hpp", ".hxx"];

pub const EXCLUDE_PATTERNS: &[&str] = &["test/"];

pub const CMAKE_MARKER: &str = "CMakeLists.txt";

pub const MAKE_MARKER: &str = "Makefile";
