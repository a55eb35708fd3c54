//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use deptrans_core::VocabularyEntry;
use deptrans_engine::{AttachmentScore, SentenceTrace};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;

/// JSON formatter
///
/// Traces and vocabulary entries are collected into one array; a score
/// report on its own is written as a single object.
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<Value>,
    score: Option<ScoreData>,
    pretty: bool,
}

/// Data structure for a vocabulary entry
#[derive(Debug, Serialize, Deserialize)]
pub struct LabelData {
    /// Index in the vocabulary
    pub index: usize,
    /// Compound label
    pub label: String,
    /// Occurrences in the oracle output
    pub count: usize,
}

/// Data structure for an attachment score report
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreData {
    /// Sentences scored
    pub sentences: usize,
    /// Tokens scored
    pub total: usize,
    /// Tokens with correct head and relation
    pub labeled: usize,
    /// Tokens with correct head
    pub unlabeled: usize,
    /// Labeled attachment score in percent
    pub las: f64,
    /// Unlabeled attachment score in percent
    pub uas: f64,
}

impl From<&AttachmentScore> for ScoreData {
    fn from(score: &AttachmentScore) -> Self {
        Self {
            sentences: score.sentences,
            total: score.total,
            labeled: score.labeled,
            unlabeled: score.unlabeled,
            las: score.las(),
            uas: score.uas(),
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            records: Vec::new(),
            score: None,
            pretty,
        }
    }

    fn write_value<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_trace(&mut self, trace: &SentenceTrace) -> Result<()> {
        self.records.push(serde_json::to_value(trace)?);
        Ok(())
    }

    fn format_label(&mut self, index: usize, entry: &VocabularyEntry) -> Result<()> {
        self.records.push(serde_json::to_value(LabelData {
            index,
            label: entry.label.to_string(),
            count: entry.count,
        })?);
        Ok(())
    }

    fn format_score(&mut self, score: &AttachmentScore) -> Result<()> {
        self.score = Some(ScoreData::from(score));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        match self.score.take() {
            Some(score) if self.records.is_empty() => self.write_value(&score)?,
            _ => {
                let records = std::mem::take(&mut self.records);
                self.write_value(&records)?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
