//! Transition executor

use crate::error::{CoreError, Result};
use crate::label::{ArcDirection, DepLabel, ListAction};
use crate::state::ParserState;
use crate::vocabulary::LabelVocabulary;

impl ParserState {
    /// Apply a transition to the state
    ///
    /// - left arc: head(top) = input, then reduce (or pass for any other list action)
    /// - right arc: head(input) = top, then shift (or pass for any other list action)
    /// - no arc: shift, reduce or pass as given
    ///
    /// Nothing is validated against the gold tree: this is the decoding path.
    pub fn apply(&mut self, label: &DepLabel) -> Result<()> {
        log::trace!(
            "apply {} (stack: {:?}, pass: {:?}, input: {})",
            label,
            self.stack(),
            self.pass_list(),
            self.input_cursor()
        );

        match label.arc() {
            ArcDirection::Left => {
                let top = self.require_top()?;
                let input = self.require_input()?;
                self.sentence.set_head(top, input, label.deprel())?;
                match label.list() {
                    ListAction::Reduce => self.reduce(),
                    ListAction::Shift | ListAction::Pass => self.pass(),
                }
            }
            ArcDirection::Right => {
                let top = self.require_top()?;
                let input = self.require_input()?;
                self.sentence.set_head(input, top, label.deprel())?;
                match label.list() {
                    ListAction::Shift => self.shift(),
                    ListAction::Reduce | ListAction::Pass => self.pass(),
                }
            }
            ArcDirection::No => match label.list() {
                ListAction::Shift => self.shift(),
                ListAction::Reduce => self.reduce(),
                ListAction::Pass => self.pass(),
            },
        }
    }

    /// Apply the top-ranked candidate from a scorer
    ///
    /// `ranked` holds vocabulary indices, best first. Returns the label that
    /// was applied.
    pub fn apply_ranked(&mut self, vocabulary: &LabelVocabulary, ranked: &[usize]) -> Result<DepLabel> {
        let best = *ranked.first().ok_or(CoreError::NoCandidates)?;
        let label = vocabulary
            .get(best)
            .cloned()
            .ok_or(CoreError::UnknownLabelIndex {
                index: best,
                size: vocabulary.len(),
            })?;
        self.apply(&label)?;
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Sentence;
    use crate::vocabulary::VocabularyBuilder;

    fn fresh(n: usize) -> ParserState {
        ParserState::new(Sentence::from_forms((1..=n).map(|i| format!("w{i}"))))
    }

    #[test]
    fn test_left_arc_reduce_assigns_and_pops() {
        let mut state = fresh(2);
        state.apply(&DepLabel::no_arc(ListAction::Shift)).unwrap();
        state.apply(&DepLabel::left(ListAction::Reduce, "det")).unwrap();

        let node = state.sentence().get(1).unwrap();
        assert_eq!(node.head(), Some(2));
        assert_eq!(node.label(), "det");
        assert_eq!(state.stack(), &[0]);
        assert!(state.pass_list().is_empty());
        assert_eq!(state.input_cursor(), 2);
    }

    #[test]
    fn test_left_arc_pass_moves_top() {
        let mut state = fresh(2);
        state.apply(&DepLabel::no_arc(ListAction::Shift)).unwrap();
        state.apply(&DepLabel::left(ListAction::Pass, "x")).unwrap();
        assert_eq!(state.stack(), &[0]);
        assert_eq!(state.pass_list(), &[1]);
    }

    #[test]
    fn test_right_arc_shift_flushes_pass_list() {
        let mut state = fresh(3);
        state.apply(&DepLabel::no_arc(ListAction::Shift)).unwrap();
        state.apply(&DepLabel::no_arc(ListAction::Shift)).unwrap();
        state.apply(&DepLabel::no_arc(ListAction::Pass)).unwrap();
        assert_eq!(state.pass_list(), &[2]);

        state.apply(&DepLabel::right(ListAction::Shift, "obj")).unwrap();
        assert_eq!(state.sentence().get(3).unwrap().head(), Some(1));
        assert_eq!(state.stack(), &[0, 1, 2, 3]);
        assert!(state.pass_list().is_empty());
        assert!(state.is_terminal());
    }

    #[test]
    fn test_right_arc_pass() {
        let mut state = fresh(2);
        state.apply(&DepLabel::right(ListAction::Pass, "root")).unwrap();
        assert_eq!(state.sentence().get(1).unwrap().head(), Some(0));
        assert!(state.stack().is_empty());
        assert_eq!(state.pass_list(), &[0]);
    }

    #[test]
    fn test_contract_violations_are_errors() {
        let mut state = fresh(1);
        state.apply(&DepLabel::no_arc(ListAction::Shift)).unwrap();
        assert_eq!(
            state.apply(&DepLabel::no_arc(ListAction::Shift)),
            Err(CoreError::InputExhausted(2))
        );
        assert_eq!(
            state.apply(&DepLabel::left(ListAction::Reduce, "x")),
            Err(CoreError::InputExhausted(2))
        );

        state.apply(&DepLabel::no_arc(ListAction::Reduce)).unwrap();
        state.apply(&DepLabel::no_arc(ListAction::Reduce)).unwrap();
        assert_eq!(
            state.apply(&DepLabel::no_arc(ListAction::Pass)),
            Err(CoreError::EmptyStack)
        );
    }

    #[test]
    fn test_apply_ranked_uses_best_candidate() {
        let mut builder = VocabularyBuilder::new();
        builder.add(&DepLabel::no_arc(ListAction::Shift));
        builder.add(&DepLabel::no_arc(ListAction::Shift));
        builder.add(&DepLabel::right(ListAction::Shift, "root"));
        let vocabulary = builder.build();

        let root = vocabulary
            .index_of(&DepLabel::right(ListAction::Shift, "root"))
            .unwrap();
        let shift = vocabulary.index_of(&DepLabel::no_arc(ListAction::Shift)).unwrap();

        let mut state = fresh(1);
        let applied = state.apply_ranked(&vocabulary, &[root, shift]).unwrap();
        assert_eq!(applied.deprel(), "root");
        assert_eq!(state.sentence().get(1).unwrap().head(), Some(0));

        assert_eq!(state.apply_ranked(&vocabulary, &[]), Err(CoreError::NoCandidates));
        assert_eq!(
            state.apply_ranked(&vocabulary, &[7]),
            Err(CoreError::UnknownLabelIndex { index: 7, size: 2 })
        );
    }
}
