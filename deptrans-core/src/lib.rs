//! List-based transition system for dependency parsing
//!
//! This crate implements the state machine at the heart of a transition-based
//! dependency parser. A [`ParserState`] tracks a stack, a pass-list and an
//! input cursor over a [`Sentence`]. Two modes drive it:
//!
//! - **Oracle mode**: with the gold tree saved, [`ParserState::derive_label`]
//!   returns the single correct next transition, producing training labels.
//! - **Decoding mode**: [`ParserState::apply`] executes a predicted
//!   transition, assigning heads and moving nodes between stack, pass-list
//!   and input.
//!
//! The pass-list lets the system build non-projective trees: nodes are set
//! aside so that an arc can reach past them, then returned to the stack on
//! the next shift.
//!
//! # Example
//!
//! ```rust
//! use deptrans_core::{AttachmentCounts, ParserState, Sentence};
//!
//! let mut sentence = Sentence::from_forms(["The", "dog", "barks"]);
//! sentence.set_head(1, 2, "det").unwrap();
//! sentence.set_head(2, 3, "nsubj").unwrap();
//! sentence.set_head(3, 0, "root").unwrap();
//!
//! let mut state = ParserState::new(sentence);
//! assert!(state.save_gold().unwrap());
//!
//! while !state.is_terminal() {
//!     let label = state.derive_label().unwrap();
//!     state.apply(&label).unwrap();
//! }
//!
//! let mut counts = AttachmentCounts::default();
//! state.evaluate(&mut counts).unwrap();
//! assert_eq!((counts.labeled, counts.unlabeled, counts.total), (3, 3, 3));
//! ```

#![warn(missing_docs)]

pub mod arc;
pub mod error;
pub mod eval;
pub mod feature;
pub mod label;
pub mod node;
pub mod oracle;
pub mod state;
pub mod transition;
pub mod vocabulary;

pub use arc::{GoldArc, GoldTable};
pub use error::{CoreError, Result};
pub use eval::{AttachmentCounts, EvalSink};
pub use feature::{FeatureItem, Relation, Source};
pub use label::{ArcDirection, DepLabel, ListAction};
pub use node::{Node, Sentence, ROOT_FORM};
pub use state::ParserState;
pub use vocabulary::{LabelVocabulary, VocabularyBuilder, VocabularyEntry};

/// Upper bound on the number of transitions for a sentence of `len` nodes
///
/// Every transition other than shift pops the stack, and the stack holds at
/// most `len` nodes between two shifts.
pub fn max_transitions(len: usize) -> usize {
    len.saturating_mul(len + 1)
}
