//! Per-sentence oracle replay
//!
//! Replay turns a gold tree into the transition sequence the oracle would
//! teach, applying each label as it goes so the next query sees the updated
//! state.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use deptrans_core::{max_transitions, AttachmentCounts, DepLabel, ParserState, Sentence};
use serde::Serialize;

/// Oracle output for one sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceTrace {
    /// Position of the sentence in the corpus
    pub sentence: usize,
    /// Number of tokens, root excluded
    pub tokens: usize,
    /// Transitions in the order the oracle produced them
    pub transitions: Vec<DepLabel>,
    /// Rebuilt tree scored against the gold tree
    #[serde(skip)]
    pub counts: AttachmentCounts,
}

/// Replay the oracle over one gold sentence
///
/// Returns `None` when the sentence has no gold arc and the configuration
/// skips such sentences.
pub fn replay_sentence(
    index: usize,
    gold: &Sentence,
    config: &EngineConfig,
) -> Result<Option<SentenceTrace>> {
    let mut state = ParserState::new(gold.clone());
    if !state.save_gold()? && config.skip_degenerate {
        log::warn!("sentence {index} has no gold arcs, skipping");
        return Ok(None);
    }

    let limit = max_transitions(gold.len());
    let mut transitions = Vec::with_capacity(2 * gold.len());

    while !state.is_terminal() {
        if transitions.len() >= limit {
            return Err(EngineError::TransitionLimit {
                sentence: index,
                limit,
            });
        }
        let label = state.derive_label()?;
        state.apply(&label)?;
        transitions.push(label);
    }

    let counts = state.attachment_counts()?;
    if config.verify_replay && !counts.is_exact() {
        return Err(EngineError::ReplayMismatch { sentence: index });
    }

    Ok(Some(SentenceTrace {
        sentence: index,
        tokens: gold.len().saturating_sub(1),
        transitions,
        counts,
    }))
}
