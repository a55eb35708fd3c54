//! CoNLL-U / CoNLL-X corpus reading and writing
//!
//! Only the columns the transition system needs are interpreted:
//!
//! | column | CoNLL-U | CoNLL-X  | used as       |
//! |--------|---------|----------|---------------|
//! | 1      | ID      | ID       | token id      |
//! | 2      | FORM    | FORM     | form          |
//! | 3      | LEMMA   | LEMMA    | lemma         |
//! | 4      | UPOS    | CPOSTAG  | pos           |
//! | 5      | XPOS    | POSTAG   | pos fallback  |
//! | 7      | HEAD    | HEAD     | gold head     |
//! | 8      | DEPREL  | DEPREL   | gold relation |
//!
//! Comment lines, multiword token ranges (`1-2`) and empty nodes (`1.1`) are
//! skipped. A `_` head leaves the token headless.

use crate::error::{EngineError, Result};
use deptrans_core::{Node, Sentence};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::Path;

const MIN_COLUMNS: usize = 8;
const EMPTY: &str = "_";

/// Streaming sentence reader over any buffered source
pub struct CorpusReader<R> {
    lines: Lines<R>,
    line: usize,
}

struct Row {
    line: usize,
    id: usize,
    form: String,
    lemma: Option<String>,
    pos: Option<String>,
    head: Option<usize>,
    deprel: String,
}

impl<R: BufRead> CorpusReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for CorpusReader<R> {
    type Item = Result<Sentence>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rows = Vec::new();

        for line in self.lines.by_ref() {
            self.line += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            let line = line.trim_end();

            if line.trim_start().is_empty() {
                if rows.is_empty() {
                    continue;
                }
                break;
            }
            if line.starts_with('#') {
                continue;
            }
            match parse_row(line, self.line) {
                Ok(Some(row)) => rows.push(row),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }

        if rows.is_empty() {
            None
        } else {
            Some(build_sentence(rows))
        }
    }
}

fn corpus_error(line: usize, reason: impl Into<String>) -> EngineError {
    EngineError::Corpus {
        line,
        reason: reason.into(),
    }
}

fn optional(field: &str) -> Option<String> {
    (field != EMPTY).then(|| field.to_string())
}

fn parse_row(line: &str, line_no: usize) -> Result<Option<Row>> {
    let mut fields: Vec<&str> = line.split('\t').collect();
    if fields.len() == 1 {
        fields = line.split_whitespace().collect();
    }
    if fields.len() < MIN_COLUMNS {
        return Err(corpus_error(
            line_no,
            format!("expected at least {MIN_COLUMNS} columns, found {}", fields.len()),
        ));
    }

    let id_field = fields[0];
    if id_field.contains('-') || id_field.contains('.') {
        return Ok(None);
    }
    let id = id_field
        .parse::<usize>()
        .map_err(|_| corpus_error(line_no, format!("invalid token id '{id_field}'")))?;

    let head = match fields[6] {
        EMPTY => None,
        raw => Some(
            raw.parse::<usize>()
                .map_err(|_| corpus_error(line_no, format!("invalid head '{raw}'")))?,
        ),
    };

    Ok(Some(Row {
        line: line_no,
        id,
        form: fields[1].to_string(),
        lemma: optional(fields[2]),
        pos: optional(fields[3]).or_else(|| optional(fields[4])),
        head,
        deprel: optional(fields[7]).unwrap_or_default(),
    }))
}

fn build_sentence(rows: Vec<Row>) -> Result<Sentence> {
    let mut sentence = Sentence::new();

    for (expected, row) in (1..).zip(&rows) {
        if row.id != expected {
            return Err(corpus_error(
                row.line,
                format!("expected token id {expected}, found {}", row.id),
            ));
        }
        let mut node = Node::new(row.id, row.form.clone());
        node.lemma = row.lemma.clone();
        node.pos = row.pos.clone();
        sentence.push_node(node);
    }

    for row in &rows {
        let Some(head) = row.head else {
            continue;
        };
        if head >= sentence.len() {
            return Err(corpus_error(
                row.line,
                format!("head {head} out of range for {} tokens", rows.len()),
            ));
        }
        if head == row.id {
            return Err(corpus_error(row.line, format!("token {head} is its own head")));
        }
        sentence.set_head(row.id, head, row.deprel.as_str())?;
    }

    Ok(sentence)
}

/// Parse every sentence from an in-memory corpus
pub fn parse_corpus(text: &str) -> Result<Vec<Sentence>> {
    CorpusReader::new(text.as_bytes()).collect()
}

/// Read every sentence from a buffered source
pub fn read_corpus<R: BufRead>(reader: R) -> Result<Vec<Sentence>> {
    CorpusReader::new(reader).collect()
}

/// Read every sentence from a file
pub fn read_corpus_file(path: impl AsRef<Path>) -> Result<Vec<Sentence>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| EngineError::Io(format!("{}: {}", path.display(), e)))?;
    read_corpus(BufReader::new(file))
}

/// Write one sentence in CoNLL-U layout, followed by a blank line
pub fn write_sentence<W: Write>(writer: &mut W, sentence: &Sentence) -> Result<()> {
    for node in sentence.tokens() {
        let head = node.head().map_or_else(|| EMPTY.to_string(), |h| h.to_string());
        let deprel = if node.label().is_empty() {
            EMPTY
        } else {
            node.label()
        };
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t_\t_\t{}\t{}\t_\t_",
            node.id,
            node.form,
            node.lemma.as_deref().unwrap_or(EMPTY),
            node.pos.as_deref().unwrap_or(EMPTY),
            head,
            deprel
        )?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write a whole corpus
pub fn write_corpus<W: Write>(mut writer: W, sentences: &[Sentence]) -> Result<()> {
    for sentence in sentences {
        write_sentence(&mut writer, sentence)?;
    }
    writer.flush()?;
    Ok(())
}
