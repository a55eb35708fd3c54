//! CLI command implementations

use crate::config::CliConfig;
use crate::input::{resolve_patterns, FileReader};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Subcommand;
use deptrans_engine::{CorpusProcessor, ExecutionMode, Sentence};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub mod evaluate;
pub mod oracle;
pub mod vocab;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay the oracle and print each sentence's transition sequence
    Oracle(oracle::OracleArgs),

    /// Score system parses against gold parses
    Evaluate(evaluate::EvaluateArgs),

    /// Build the transition label vocabulary from oracle output
    Vocab(vocab::VocabArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Oracle(args) => args.execute(),
            Commands::Evaluate(args) => args.execute(),
            Commands::Vocab(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        // a second initialisation in the same process is not an error here
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}

/// Resolve patterns and load every matching corpus into one sentence list
pub(crate) fn load_corpora(patterns: &[String], quiet: bool) -> Result<Vec<Sentence>> {
    let files = resolve_patterns(patterns)?;
    log::info!("Loading {} corpus file(s)", files.len());

    let mut progress = ProgressReporter::new(quiet);
    progress.init_files(files.len() as u64);

    let mut sentences = Vec::new();
    for path in &files {
        let corpus = FileReader::read_corpus(path)?;
        progress.file_completed(&path.display().to_string(), corpus.len());
        sentences.extend(corpus);
    }
    progress.finish();

    Ok(sentences)
}

/// Build the corpus processor from file configuration and flag overrides
pub(crate) fn build_processor(
    config: &CliConfig,
    parallel: bool,
    threads: Option<usize>,
) -> Result<CorpusProcessor> {
    let mut engine = config.engine_config();
    if parallel {
        engine.execution_mode = ExecutionMode::Parallel;
    }
    if threads.is_some() {
        engine.threads = threads;
    }
    CorpusProcessor::with_config(engine).context("Invalid processing options")
}

/// Open the output destination, stdout when no path is given
pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send + Sync>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
