//! Greedy decoding with an external action scorer
//!
//! The scorer never touches the state: it ranks vocabulary indices and the
//! decoder applies the best one the state can legally take, falling back to
//! a plain shift when nothing ranked is applicable.

use crate::error::{EngineError, Result};
use deptrans_core::{
    max_transitions, ArcDirection, DepLabel, LabelVocabulary, ListAction, ParserState, Sentence,
};

/// Ranks transitions for a parser state
///
/// Implementations are shared across worker threads during corpus decoding.
pub trait ActionScorer: Send + Sync {
    /// Vocabulary indices, best first
    fn rank(&self, state: &ParserState, vocabulary: &LabelVocabulary) -> Vec<usize>;
}

impl<F> ActionScorer for F
where
    F: Fn(&ParserState, &LabelVocabulary) -> Vec<usize> + Send + Sync,
{
    fn rank(&self, state: &ParserState, vocabulary: &LabelVocabulary) -> Vec<usize> {
        self(state, vocabulary)
    }
}

/// Baseline that ranks labels by their training frequency
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyScorer;

impl ActionScorer for FrequencyScorer {
    fn rank(&self, _state: &ParserState, vocabulary: &LabelVocabulary) -> Vec<usize> {
        (0..vocabulary.len()).collect()
    }
}

/// Whether `label` keeps the live edges a forest of single-headed trees
pub fn is_permitted(state: &ParserState, label: &DepLabel) -> Result<bool> {
    let Some(input) = state.input_id() else {
        return Ok(false);
    };
    let sentence = state.sentence();
    let has_head = |id: usize| sentence.get(id).is_some_and(|n| n.has_head());

    let permitted = match (label.arc(), label.list(), state.top_id()) {
        (ArcDirection::No, ListAction::Shift, _) => true,
        (_, _, None) => false,
        (ArcDirection::No, ListAction::Reduce, Some(top)) => top != 0 && has_head(top),
        (ArcDirection::No, ListAction::Pass, Some(_)) => true,
        (ArcDirection::Left, _, Some(top)) => {
            top != 0 && !has_head(top) && !sentence.is_descendant_of(input, top)?
        }
        (ArcDirection::Right, _, Some(top)) => {
            !has_head(input) && !sentence.is_descendant_of(top, input)?
        }
    };
    Ok(permitted)
}

/// Greedy left-to-right decoder
pub struct GreedyDecoder<'a, S: ?Sized> {
    scorer: &'a S,
    vocabulary: &'a LabelVocabulary,
}

impl<'a, S: ActionScorer + ?Sized> GreedyDecoder<'a, S> {
    /// Pair a scorer with the vocabulary its indices refer to
    pub fn new(scorer: &'a S, vocabulary: &'a LabelVocabulary) -> Self {
        Self { scorer, vocabulary }
    }

    /// Parse one sentence; any heads already present are discarded
    pub fn decode(&self, index: usize, sentence: &Sentence) -> Result<Sentence> {
        let mut input = sentence.clone();
        for id in 0..input.len() {
            input.clear_head(id)?;
        }

        let mut state = ParserState::new(input);
        let limit = max_transitions(state.sentence().len());
        let fallback = DepLabel::no_arc(ListAction::Shift);
        let mut steps = 0;

        while !state.is_terminal() {
            if steps >= limit {
                return Err(EngineError::TransitionLimit {
                    sentence: index,
                    limit,
                });
            }

            match self.best_permitted(&state)? {
                Some(best) => {
                    state.apply_ranked(self.vocabulary, &[best])?;
                }
                None => state.apply(&fallback)?,
            }
            steps += 1;
        }

        log::trace!("sentence {index} decoded in {steps} transitions");
        Ok(state.into_sentence())
    }

    fn best_permitted(&self, state: &ParserState) -> Result<Option<usize>> {
        for index in self.scorer.rank(state, self.vocabulary) {
            let Some(label) = self.vocabulary.get(index) else {
                log::debug!("scorer ranked unknown label index {index}");
                continue;
            };
            if is_permitted(state, label)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}
