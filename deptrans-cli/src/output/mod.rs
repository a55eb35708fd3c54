//! Output formatting module

use anyhow::Result;
use deptrans_core::VocabularyEntry;
use deptrans_engine::{AttachmentScore, SentenceTrace};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format the oracle transitions of one sentence
    fn format_trace(&mut self, trace: &SentenceTrace) -> Result<()>;

    /// Format one vocabulary entry
    fn format_label(&mut self, index: usize, entry: &VocabularyEntry) -> Result<()>;

    /// Format an attachment score report
    fn format_score(&mut self, score: &AttachmentScore) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, one record per line
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Build the formatter for `format` over `writer`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
    }
}
