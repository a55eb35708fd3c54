//! Engine error types

use deptrans_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Transition system error
    #[error("transition system error: {0}")]
    Core(#[from] CoreError),

    /// Malformed corpus input
    #[error("corpus error at line {line}: {reason}")]
    Corpus {
        /// 1-based line number in the input
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Parallel execution error
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    Parallel(String),

    /// Decoding ran past the transition bound
    #[error("sentence {sentence} exceeded {limit} transitions")]
    TransitionLimit {
        /// Index of the sentence in the corpus
        sentence: usize,
        /// The bound that was hit
        limit: usize,
    },

    /// Oracle replay did not rebuild the gold tree
    #[error("oracle replay of sentence {sentence} does not reproduce its gold tree")]
    ReplayMismatch {
        /// Index of the sentence in the corpus
        sentence: usize,
    },

    /// Gold and system corpora are not aligned
    #[error("{what} mismatch: gold has {gold}, system has {system}")]
    LengthMismatch {
        /// What was compared
        what: String,
        /// Count on the gold side
        gold: usize,
        /// Count on the system side
        system: usize,
    },
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
