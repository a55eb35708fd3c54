//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use deptrans_core::VocabularyEntry;
use deptrans_engine::{AttachmentScore, SentenceTrace};
use std::io::Write;

/// Plain text formatter
///
/// Traces come out as one line of space-separated labels per sentence,
/// vocabulary entries as `index<TAB>label<TAB>count`.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_trace(&mut self, trace: &SentenceTrace) -> Result<()> {
        let labels: Vec<String> = trace.transitions.iter().map(|l| l.to_string()).collect();
        writeln!(self.writer, "{}", labels.join(" "))?;
        Ok(())
    }

    fn format_label(&mut self, index: usize, entry: &VocabularyEntry) -> Result<()> {
        writeln!(self.writer, "{}\t{}\t{}", index, entry.label, entry.count)?;
        Ok(())
    }

    fn format_score(&mut self, score: &AttachmentScore) -> Result<()> {
        writeln!(self.writer, "Sentences: {}", score.sentences)?;
        writeln!(self.writer, "Tokens: {}", score.total)?;
        writeln!(self.writer, "Labeled: {}", score.labeled)?;
        writeln!(self.writer, "Unlabeled: {}", score.unlabeled)?;
        writeln!(self.writer, "LAS: {:.2}%", score.las())?;
        writeln!(self.writer, "UAS: {:.2}%", score.uas())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
