//! Vocab command implementation

use super::{build_processor, init_logging, load_corpora, open_output};
use crate::config::CliConfig;
use crate::output::{create_formatter, OutputFormat};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the vocab command
#[derive(Debug, Args)]
pub struct VocabArgs {
    /// Input corpora or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl VocabArgs {
    /// Execute the vocab command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let processor = build_processor(&config, false, None)?;
        let sentences = load_corpora(&self.input, self.quiet)?;
        let vocabulary = processor.build_vocabulary(&sentences)?;

        let format = self.format.unwrap_or(config.output.default_format);
        let writer = open_output(self.output.as_deref())?;
        let mut formatter = create_formatter(format, writer, config.output.pretty_json);
        for (index, entry) in vocabulary.entries().iter().enumerate() {
            formatter.format_label(index, entry)?;
        }
        formatter.finish()?;

        Ok(())
    }
}
