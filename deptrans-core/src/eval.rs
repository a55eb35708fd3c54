//! Attachment evaluation against the saved gold tree

use crate::error::Result;
use crate::state::ParserState;
use std::ops::AddAssign;

/// Per-sentence attachment counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachmentCounts {
    /// Tokens whose head and relation both match gold
    pub labeled: usize,
    /// Tokens whose head matches gold
    pub unlabeled: usize,
    /// Tokens scored (root excluded)
    pub total: usize,
}

impl AttachmentCounts {
    /// Whether every scored token matches gold, head and relation
    pub fn is_exact(&self) -> bool {
        self.labeled == self.total && self.unlabeled == self.total
    }
}

impl AddAssign for AttachmentCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.labeled += rhs.labeled;
        self.unlabeled += rhs.unlabeled;
        self.total += rhs.total;
    }
}

/// Receives per-sentence counts; aggregation and reporting live elsewhere
pub trait EvalSink {
    /// Record one sentence
    fn add(&mut self, labeled: usize, unlabeled: usize, total: usize);
}

impl EvalSink for AttachmentCounts {
    fn add(&mut self, labeled: usize, unlabeled: usize, total: usize) {
        *self += AttachmentCounts {
            labeled,
            unlabeled,
            total,
        };
    }
}

impl ParserState {
    /// Compare live edges with the gold table, root excluded
    pub fn attachment_counts(&self) -> Result<AttachmentCounts> {
        let gold = self.require_gold()?;
        let mut counts = AttachmentCounts {
            total: self.sentence.len().saturating_sub(1),
            ..AttachmentCounts::default()
        };

        for node in self.sentence.tokens() {
            let Some(arc) = gold.get(node.id) else {
                continue;
            };
            if arc.matches_head(node.head()) {
                counts.unlabeled += 1;
                if arc.matches_label(node.label()) {
                    counts.labeled += 1;
                }
            }
        }

        Ok(counts)
    }

    /// Score the sentence and report the counts to `sink`
    pub fn evaluate<S: EvalSink + ?Sized>(&self, sink: &mut S) -> Result<AttachmentCounts> {
        let counts = self.attachment_counts()?;
        sink.add(counts.labeled, counts.unlabeled, counts.total);
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::node::Sentence;

    fn saved(arcs: &[(usize, usize, &str)]) -> ParserState {
        let mut sentence = Sentence::from_forms(["The", "dog", "barks"]);
        for &(dep, head, rel) in arcs {
            sentence.set_head(dep, head, rel).unwrap();
        }
        let mut state = ParserState::new(sentence);
        state.save_gold().unwrap();
        state
    }

    #[test]
    fn test_counts_head_and_label_matches() {
        let mut state = saved(&[(1, 2, "det"), (2, 3, "nsubj"), (3, 0, "root")]);
        let live = state.sentence_mut();
        live.set_head(1, 2, "det").unwrap();
        live.set_head(2, 3, "obj").unwrap();
        live.set_head(3, 1, "root").unwrap();

        let counts = state.attachment_counts().unwrap();
        assert_eq!(
            counts,
            AttachmentCounts {
                labeled: 1,
                unlabeled: 2,
                total: 3
            }
        );
        assert!(!counts.is_exact());
    }

    #[test]
    fn test_headless_gold_matches_headless_live() {
        // token 2 has no gold head; leaving it unattached counts as a match
        let state = saved(&[(1, 3, "det"), (3, 0, "root")]);
        let counts = state.attachment_counts().unwrap();
        assert_eq!(counts.unlabeled, 1);
        assert_eq!(counts.labeled, 1);
    }

    #[test]
    fn test_evaluate_feeds_sink() {
        let mut state = saved(&[(1, 2, "det"), (2, 3, "nsubj"), (3, 0, "root")]);
        state.restore_gold().unwrap();

        let mut total = AttachmentCounts::default();
        state.evaluate(&mut total).unwrap();
        state.evaluate(&mut total).unwrap();
        assert_eq!(total.total, 6);
        assert!(total.is_exact());
    }

    #[test]
    fn test_requires_gold() {
        let state = ParserState::new(Sentence::from_forms(["a"]));
        assert_eq!(state.attachment_counts(), Err(CoreError::GoldNotSaved));
    }
}
