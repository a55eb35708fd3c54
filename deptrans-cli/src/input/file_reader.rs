//! Corpus file loading

use crate::error::CliError;
use anyhow::Result;
use deptrans_engine::{read_corpus_file, Sentence};
use std::path::Path;

/// Reads CoNLL-U / CoNLL-X files into sentences
pub struct FileReader;

impl FileReader {
    /// Read every sentence of a corpus file
    pub fn read_corpus(path: &Path) -> Result<Vec<Sentence>> {
        let sentences = read_corpus_file(path).map_err(|e| CliError::CorpusError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!("{}: {} sentences", path.display(), sentences.len());
        Ok(sentences)
    }
}
