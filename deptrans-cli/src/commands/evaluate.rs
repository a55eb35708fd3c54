//! Evaluate command implementation

use super::{build_processor, init_logging, open_output};
use crate::config::CliConfig;
use crate::input::FileReader;
use crate::output::{create_formatter, OutputFormat};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the evaluate command
#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Gold-standard corpus
    #[arg(short, long, value_name = "FILE")]
    pub gold: PathBuf,

    /// System output aligned with the gold corpus
    #[arg(short, long, value_name = "FILE")]
    pub system: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl EvaluateArgs {
    /// Execute the evaluate command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let processor = build_processor(&config, false, None)?;

        let gold = FileReader::read_corpus(&self.gold)?;
        let system = FileReader::read_corpus(&self.system)?;
        let score = processor.evaluate(&gold, &system)?;

        let format = self.format.unwrap_or(config.output.default_format);
        let writer = open_output(self.output.as_deref())?;
        let mut formatter = create_formatter(format, writer, config.output.pretty_json);
        formatter.format_score(&score)?;
        formatter.finish()?;

        Ok(())
    }
}
