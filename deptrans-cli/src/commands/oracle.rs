//! Oracle command implementation

use super::{build_processor, init_logging, load_corpora, open_output};
use crate::config::CliConfig;
use crate::output::{create_formatter, OutputFormat};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the oracle command
#[derive(Debug, Args)]
pub struct OracleArgs {
    /// Input corpora or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Force parallel processing even for small corpora
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl OracleArgs {
    /// Execute the oracle command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let processor = build_processor(&config, self.parallel, self.threads)?;
        let sentences = load_corpora(&self.input, self.quiet)?;

        let output = processor.replay(&sentences)?;

        let format = self.format.unwrap_or(config.output.default_format);
        let writer = open_output(self.output.as_deref())?;
        let mut formatter = create_formatter(format, writer, config.output.pretty_json);
        for trace in &output.traces {
            formatter.format_trace(trace)?;
        }
        formatter.finish()?;

        if !self.quiet {
            eprintln!(
                "Sentences: {} replayed, {} skipped ({:?}, {:.1} ms)",
                output.traces.len(),
                output.skipped.len(),
                output.metadata.execution_mode,
                output.metadata.processing_time_ms
            );
            eprintln!(
                "LAS: {:.2}% UAS: {:.2}%",
                output.score.las(),
                output.score.uas()
            );
        }

        Ok(())
    }
}
