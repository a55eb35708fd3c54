//! Corpus orchestration for the deptrans transition system
//!
//! This crate reads CoNLL-U / CoNLL-X corpora, replays the static oracle over
//! every sentence, decodes with an external scorer and aggregates attachment
//! scores. Sentences are independent, so every corpus-level operation runs
//! through an [`Executor`] that is either sequential or backed by rayon.

#![warn(missing_docs)]

pub mod config;
pub mod corpus;
pub mod decode;
pub mod error;
pub mod executor;
pub mod processor;
pub mod replay;
pub mod scorer;

// Re-export key types
pub use config::EngineConfig;
pub use corpus::{parse_corpus, read_corpus, read_corpus_file, write_corpus, CorpusReader};
pub use decode::{ActionScorer, FrequencyScorer, GreedyDecoder};
pub use error::{EngineError, Result};
pub use executor::{ExecutionMode, Executor};
pub use processor::{CorpusProcessor, CorpusProcessorBuilder, ProcessingMetadata, ReplayOutput};
pub use replay::{replay_sentence, SentenceTrace};
pub use scorer::AttachmentScore;

// Re-export from core for convenience
pub use deptrans_core::{DepLabel, LabelVocabulary, ParserState, Sentence};
