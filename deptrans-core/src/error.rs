//! Core error types (deterministic only)

use thiserror::Error;

/// Contract violations raised by the transition system
///
/// None of these are recoverable inside a single sentence: they signal that
/// a caller drove the state machine outside its defined transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A node id does not exist in the sentence
    #[error("node {id} out of bounds for sentence of length {len}")]
    NodeOutOfBounds {
        /// The requested node id
        id: usize,
        /// Number of nodes in the sentence, root included
        len: usize,
    },

    /// A node was assigned itself as head
    #[error("node {0} cannot be its own head")]
    SelfHead(usize),

    /// Walking up the head chain took more steps than there are nodes
    #[error("head cycle detected while walking up from node {0}")]
    HeadCycle(usize),

    /// A transition or oracle query needs a stack top but the stack is empty
    #[error("stack is empty")]
    EmptyStack,

    /// A transition or oracle query needs an input node but the cursor is past the end
    #[error("input is exhausted at position {0}")]
    InputExhausted(usize),

    /// The oracle, restore or evaluation was used before the gold tree was saved
    #[error("gold tree has not been saved")]
    GoldNotSaved,

    /// A compound transition string could not be decoded
    #[error("invalid transition label '{0}'")]
    InvalidLabel(String),

    /// A vocabulary index does not name a known label
    #[error("label index {index} out of range for vocabulary of size {size}")]
    UnknownLabelIndex {
        /// The requested index
        index: usize,
        /// Vocabulary size
        size: usize,
    },

    /// A node sequence does not start with the root or its ids are out of order
    #[error("malformed sentence: {0}")]
    MalformedSentence(String),

    /// A ranked candidate list was empty
    #[error("no candidate labels to apply")]
    NoCandidates,
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
