use anyhow::{Context as AnyhowContext, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
    Cpp,
    Go,
}

#[derive(Parser, Debug)]
#[command(name = "cbom-assembler")]
#[command(about = "Partition a source tree into project modules and assemble CBOM documents", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Scan configuration file (YAML or JSON)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Partition a directory into project modules and report them as JSON
    Index(IndexArgs),
    /// Union several CBOM files into one and stamp provenance metadata
    Merge(MergeArgs),
}

#[derive(ClapArgs, Debug)]
pub struct IndexArgs {
    /// Directory to index
    #[arg(long, value_name = "PATH")]
    pub path: PathBuf,

    /// Language (auto-detected from build markers if not specified)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Package sub-folder, resolved against --path before indexing
    #[arg(long, value_name = "DIR")]
    pub package: Option<PathBuf>,

    /// Exclude pattern (regex, matched against paths relative to the root).
    /// Replaces the language defaults. Can be specified multiple times.
    #[arg(long, value_name = "REGEX")]
    pub exclude: Vec<String>,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'O', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct MergeArgs {
    /// CBOM files to merge, in order
    #[arg(value_name = "CBOM", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file path
    #[arg(short = 'O', long, value_name = "FILE")]
    pub output_file: PathBuf,

    #[arg(long, value_name = "URL")]
    pub git_url: Option<String>,

    #[arg(long, value_name = "REV")]
    pub revision: Option<String>,

    #[arg(long, value_name = "SHA")]
    pub commit: Option<String>,

    #[arg(long, value_name = "DIR")]
    pub subfolder: Option<String>,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref config_path) = self.config {
            if !config_path.is_file() {
                anyhow::bail!("Config file does not exist: {}", config_path.display());
            }
        }
        match &self.command {
            Command::Index(index) => validate_dir(&index.path),
            Command::Merge(merge) => {
                for input in &merge.inputs {
                    validate_file(input)?;
                }
                Ok(())
            }
        }
    }
}

pub fn validate_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }
    if !path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", path.display());
    }
    std::fs::read_dir(path).with_context(|| format!("Cannot read directory: {}", path.display()))?;
    Ok(())
}

pub fn validate_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    std::fs::metadata(path).with_context(|| format!("Cannot read file: {}", path.display()))?;
    Ok(())
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Python => "python",
            Language::Cpp => "cpp",
            Language::Go => "go",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_language_as_str() {
        assert_eq!(Language::Java.as_str(), "java");
        assert_eq!(Language::Python.as_str(), "python");
        assert_eq!(Language::Cpp.as_str(), "cpp");
        assert_eq!(Language::Go.as_str(), "go");
    }

    #[test]
    fn test_language_deserializes_lowercase() {
        let lang: Language = serde_yaml::from_str("python").unwrap();
        assert_eq!(lang, Language::Python);
    }

    #[test]
    fn test_parse_index_command() {
        let args = parse(&[
            "cbom-assembler",
            "index",
            "--path",
            "/tmp",
            "--language",
            "cpp",
            "--exclude",
            "vendor/",
            "--exclude",
            "third_party/",
        ]);

        match args.command {
            Command::Index(index) => {
                assert_eq!(index.language, Some(Language::Cpp));
                assert_eq!(index.exclude, vec!["vendor/", "third_party/"]);
                assert!(index.package.is_none());
            }
            Command::Merge(_) => panic!("expected index command"),
        }
    }

    #[test]
    fn test_parse_merge_command() {
        let args = parse(&[
            "cbom-assembler",
            "-vv",
            "merge",
            "a.json",
            "b.json",
            "-O",
            "out.json",
            "--commit",
            "abc123",
        ]);

        assert_eq!(args.verbose, 2);
        match args.command {
            Command::Merge(merge) => {
                assert_eq!(merge.inputs.len(), 2);
                assert_eq!(merge.commit.as_deref(), Some("abc123"));
                assert!(merge.git_url.is_none());
            }
            Command::Index(_) => panic!("expected merge command"),
        }
    }

    #[test]
    fn test_merge_requires_inputs() {
        assert!(Args::try_parse_from(["cbom-assembler", "merge", "-O", "out.json"]).is_err());
    }

    #[test]
    fn test_validate_dir_exists() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_dir(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_validate_dir_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("setup.py");
        fs::write(&file_path, "").unwrap();
        assert!(validate_dir(&file_path).is_err());
    }

    #[test]
    fn test_validate_path_not_exists() {
        let path = Path::new("/nonexistent/path/that/does/not/exist");
        assert!(validate_dir(path).is_err());
        assert!(validate_file(path).is_err());
    }

    #[test]
    fn test_args_validate_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_string_lossy().to_string();
        let args = parse(&[
            "cbom-assembler",
            "--config",
            "/nonexistent/config.yaml",
            "index",
            "--path",
            &root,
        ]);
        assert!(args.validate().is_err());
    }
}
