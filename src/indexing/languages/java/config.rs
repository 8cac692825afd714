pub const FILE_EXTENSIONS: &[&str] = &[".java"];

pub const EXCLUDE_PATTERNS: &[&str] = &["src/test/"];

pub const MAVEN_MARKER: &str = "pom.xml";

pub const GRADLE_MARKERS: &[&str] = &["build.gradle", "build.gradle.kts"];
