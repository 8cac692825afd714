use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use std::path::Path;
use tracing::{debug, info, warn};

use cbom_assembler::cli::{self, Command, IndexArgs, Language, MergeArgs};
use cbom_assembler::config::{self, Provenance, ScanConfig};
use cbom_assembler::indexing::{strategy_for, LanguageRegistry, ModuleIndexer};
use cbom_assembler::logging::{self, Verbosity};
use cbom_assembler::output::OutputFormatter;
use cbom_assembler::CbomDocument;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    args.validate().context("Invalid arguments")?;

    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => ScanConfig::default(),
    };
    if config.java.is_customized() {
        warn!("The java config section only applies to library scans and is ignored here");
    }

    match &args.command {
        Command::Index(index) => run_index(index, &config),
        Command::Merge(merge) => run_merge(merge, &config),
    }
}

fn run_index(args: &IndexArgs, config: &ScanConfig) -> Result<()> {
    let language = match args.language {
        Some(language) => language,
        None => detect_language(&args.path)?,
    };

    let mut indexer = ModuleIndexer::new(strategy_for(language), &args.path)?;
    if !args.exclude.is_empty() {
        indexer
            .set_exclude_patterns(Some(args.exclude.as_slice()))
            .context("Invalid --exclude pattern")?;
    } else if let Some(patterns) = config.exclude_for(language) {
        indexer
            .set_exclude_patterns(Some(patterns))
            .context("Invalid exclude pattern in config")?;
    }

    let outcome = indexer
        .index(args.package.as_deref())
        .with_context(|| format!("Failed to index {}", args.path.display()))?;
    info!(
        %language,
        modules = outcome.modules.len(),
        "Indexed {}",
        args.path.display()
    );

    let root = match &args.package {
        Some(package) => args.path.join(package),
        None => args.path.clone(),
    };
    let report = OutputFormatter::format_index(&root, language, &outcome)?;
    match &args.output_file {
        Some(path) => std::fs::write(path, report)
            .with_context(|| format!("Cannot write report to {}", path.display()))?,
        None => println!("{report}"),
    }
    Ok(())
}

fn detect_language(path: &Path) -> Result<Language> {
    let detected = LanguageRegistry::new().detect_languages(path);
    debug!(?detected, "Detected languages from build markers");
    match detected.as_slice() {
        [language] => Ok(*language),
        [] => anyhow::bail!("Could not detect language. Please specify --language"),
        several => anyhow::bail!(
            "Found build markers for several languages ({}). Please specify --language",
            several
                .iter()
                .map(Language::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn run_merge(args: &MergeArgs, config: &ScanConfig) -> Result<()> {
    let mut merged: Option<CbomDocument> = None;
    for input in &args.inputs {
        let content = std::fs::read_to_string(input)
            .with_context(|| format!("Cannot read CBOM: {}", input.display()))?;
        let document = CbomDocument::from_json_str(&content)
            .with_context(|| format!("Invalid CBOM: {}", input.display()))?;
        match merged.as_mut() {
            Some(target) => target.merge(document),
            None => merged = Some(document),
        }
    }
    let mut merged = merged.context("No CBOM inputs given")?;

    let cli_provenance = Provenance {
        git_url: args.git_url.clone(),
        revision: args.revision.clone(),
        commit: args.commit.clone(),
        subfolder: args.subfolder.clone(),
    };
    let provenance = config.provenance.overridden_by(&cli_provenance);
    merged.add_metadata(
        provenance.git_url.as_deref(),
        provenance.revision.as_deref(),
        provenance.commit.as_deref(),
        provenance.subfolder.as_deref(),
    );

    merged
        .write(&args.output_file)
        .context("Failed to write merged CBOM")?;
    info!(
        inputs = args.inputs.len(),
        output = %args.output_file.display(),
        "Merged CBOM"
    );
    println!("{}", merged.finding_count());
    Ok(())
}
