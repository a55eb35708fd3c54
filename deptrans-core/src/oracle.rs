//! Static oracle for the list-based transition system
//!
//! Given the saved gold tree, [`ParserState::derive_label`] returns the one
//! correct next transition. Checks run in a fixed priority order (left arc,
//! right arc, then no arc) and the list action is picked by
//! [`ParserState::can_shift`] and [`ParserState::can_reduce`]. Reordering any
//! of these changes which of several valid actions is preferred on
//! non-projective trees.

use crate::error::Result;
use crate::label::{DepLabel, ListAction};
use crate::state::ParserState;

impl ParserState {
    /// Derive the correct next transition from the gold tree
    ///
    /// Requires a saved gold table, a non-empty stack and a cursor inside the
    /// sentence.
    pub fn derive_label(&self) -> Result<DepLabel> {
        let gold = self.require_gold()?;
        let top = self.require_top()?;
        let input = self.require_input()?;

        // left arc: head(top) = input
        if gold.is_head(top, input) && !self.sentence.is_descendant_of(input, top)? {
            let list = if self.can_reduce(true)? {
                ListAction::Reduce
            } else {
                ListAction::Pass
            };
            let deprel = gold.get(top).map(|arc| arc.label()).unwrap_or_default();
            return Ok(DepLabel::left(list, deprel));
        }

        // right arc: head(input) = top
        if gold.is_head(input, top) && !self.sentence.is_descendant_of(top, input)? {
            let list = if self.can_shift()? {
                ListAction::Shift
            } else {
                ListAction::Pass
            };
            let deprel = gold.get(input).map(|arc| arc.label()).unwrap_or_default();
            return Ok(DepLabel::right(list, deprel));
        }

        let list = if self.can_shift()? {
            ListAction::Shift
        } else if self.can_reduce(false)? {
            ListAction::Reduce
        } else {
            ListAction::Pass
        };
        Ok(DepLabel::no_arc(list))
    }

    /// Whether the input node may be shifted without losing a gold arc
    ///
    /// Shifting is ruled out when the input's gold head lies before the stack
    /// top (it must be reached by passing or reducing first), or when a node
    /// below the stack top still waits for the input as its head. The scan
    /// walks down from the node directly below the top; the top itself is
    /// covered by the left-arc check.
    pub fn can_shift(&self) -> Result<bool> {
        let gold = self.require_gold()?;
        let top = self.require_top()?;
        let input = self.require_input()?;

        if gold.head_of(input).is_some_and(|head| head < top) {
            return Ok(false);
        }

        let mut depth = 1;
        while let Some(id) = self.peek_stack_id(depth) {
            if gold.is_head(id, input) {
                return Ok(false);
            }
            depth += 1;
        }

        Ok(true)
    }

    /// Whether the stack top may be removed for good
    ///
    /// `has_head` is set when the same transition assigns the top its head
    /// (left arc + reduce). A headless top is never reduced, nor is a top
    /// that is the gold head of any node after the input.
    pub fn can_reduce(&self, has_head: bool) -> Result<bool> {
        let gold = self.require_gold()?;
        let top = self.require_top()?;

        let top_has_head = self
            .sentence
            .get(top)
            .is_some_and(|node| node.has_head());
        if !has_head && !top_has_head {
            return Ok(false);
        }

        let pending = (self.input + 1..self.sentence.len()).any(|id| gold.is_head(id, top));
        Ok(!pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::node::Sentence;

    fn gold_state(forms: &[&str], arcs: &[(usize, usize, &str)]) -> ParserState {
        let mut sentence = Sentence::from_forms(forms.iter().copied());
        for &(dep, head, rel) in arcs {
            sentence.set_head(dep, head, rel).unwrap();
        }
        let mut state = ParserState::new(sentence);
        assert!(state.save_gold().unwrap());
        state
    }

    #[test]
    fn test_requires_saved_gold() {
        let state = ParserState::new(Sentence::from_forms(["a"]));
        assert_eq!(state.derive_label(), Err(CoreError::GoldNotSaved));
    }

    #[test]
    fn test_first_step_the_dog_barks() {
        let state = gold_state(
            &["The", "dog", "barks"],
            &[(1, 2, "det"), (2, 3, "nsubj"), (3, 0, "root")],
        );
        // top = root, input = The (head is dog, to the right)
        assert_eq!(state.derive_label().unwrap(), DepLabel::no_arc(ListAction::Shift));
    }

    #[test]
    fn test_left_arc_reduce() {
        let mut state = gold_state(
            &["The", "dog", "barks"],
            &[(1, 2, "det"), (2, 3, "nsubj"), (3, 0, "root")],
        );
        state.shift().unwrap(); // top = The, input = dog
        let label = state.derive_label().unwrap();
        assert_eq!(label, DepLabel::left(ListAction::Reduce, "det"));
    }

    #[test]
    fn test_left_arc_pass_when_top_has_later_dependent() {
        // 1 <- 2 (head of 1 is 2), and 3 depends on 1
        let mut state = gold_state(
            &["a", "b", "c"],
            &[(1, 2, "x"), (3, 1, "y"), (2, 0, "root")],
        );
        state.shift().unwrap(); // top = 1, input = 2
        assert_eq!(state.derive_label().unwrap(), DepLabel::left(ListAction::Pass, "x"));
    }

    #[test]
    fn test_right_arc_shift_and_pass() {
        let state = gold_state(&["a", "b"], &[(1, 0, "root"), (2, 1, "obj")]);
        assert_eq!(state.derive_label().unwrap(), DepLabel::right(ListAction::Shift, "root"));

        // 1 still waits for 3 as its head, so the right arc onto 3 passes
        let mut state = gold_state(
            &["a", "b", "c"],
            &[(1, 3, "x"), (3, 2, "y"), (2, 0, "root")],
        );
        state.shift().unwrap();
        state.shift().unwrap(); // stack [0, 1, 2], input = 3
        assert_eq!(state.derive_label().unwrap(), DepLabel::right(ListAction::Pass, "y"));
    }

    #[test]
    fn test_can_shift_blocked_by_earlier_head() {
        // head(3) = 1, but top is 2
        let mut state = gold_state(
            &["a", "b", "c"],
            &[(1, 0, "root"), (2, 1, "x"), (3, 1, "y")],
        );
        state.shift().unwrap();
        state.shift().unwrap(); // stack [0, 1, 2], input = 3
        assert!(!state.can_shift().unwrap());
        // 2 has no live head yet: no reduce, so pass
        assert_eq!(state.derive_label().unwrap(), DepLabel::no_arc(ListAction::Pass));
    }

    #[test]
    fn test_can_shift_blocked_by_waiting_stack_node() {
        // 1 takes 3 as head and sits below the top when 3 is the input
        let mut state = gold_state(
            &["a", "b", "c", "d"],
            &[(1, 3, "x"), (2, 1, "y"), (3, 4, "z"), (4, 0, "root")],
        );
        state.shift().unwrap();
        state.shift().unwrap(); // stack [0, 1, 2], input = 3
        assert!(!state.can_shift().unwrap());

        state.sentence_mut().set_head(2, 1, "y").unwrap();
        assert_eq!(state.derive_label().unwrap(), DepLabel::no_arc(ListAction::Reduce));
    }

    #[test]
    fn test_can_reduce_requires_head_unless_assigned_now() {
        let mut state = gold_state(&["a", "b"], &[(1, 0, "root"), (2, 1, "x")]);
        state.shift().unwrap(); // top = 1 (headless), input = 2
        assert!(!state.can_reduce(false).unwrap());
        assert!(state.can_reduce(true).unwrap());
    }

    #[test]
    fn test_can_reduce_blocked_by_future_dependent() {
        let mut state = gold_state(
            &["a", "b", "c"],
            &[(1, 0, "root"), (2, 1, "x"), (3, 1, "y")],
        );
        state.sentence_mut().set_head(1, 0, "root").unwrap();
        state.shift().unwrap(); // top = 1, input = 2; 3 still depends on 1
        assert!(!state.can_reduce(false).unwrap());
    }

    #[test]
    fn test_can_reduce_scan_starts_after_input() {
        let mut state = gold_state(&["a", "b", "c"], &[(1, 0, "root"), (2, 1, "x"), (3, 2, "y")]);
        state.sentence_mut().set_head(1, 0, "root").unwrap();
        state.shift().unwrap(); // top = 1, input = 2
        // the input node itself is not a pending dependent
        assert!(state.can_reduce(false).unwrap());

        state.reset(2, 3);
        state.sentence_mut().set_head(2, 1, "x").unwrap();
        assert!(state.can_reduce(false).unwrap());
        state.reset(1, 1);
        // node 2 now lies after the cursor and still depends on 1
        assert!(!state.can_reduce(false).unwrap());
    }

    #[test]
    fn test_terminal_state_has_no_label() {
        let mut state = gold_state(&["a"], &[(1, 0, "root")]);
        state.shift().unwrap();
        assert_eq!(state.derive_label(), Err(CoreError::InputExhausted(2)));
    }
}
