//! Corpus-level attachment score

use deptrans_core::{AttachmentCounts, EvalSink};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Running LAS/UAS over many sentences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentScore {
    /// Sentences recorded
    pub sentences: usize,
    /// Tokens with correct head and relation
    pub labeled: usize,
    /// Tokens with correct head
    pub unlabeled: usize,
    /// Tokens scored
    pub total: usize,
}

impl AttachmentScore {
    /// Labeled attachment score in percent, 0 when nothing was scored
    pub fn las(&self) -> f64 {
        percent(self.labeled, self.total)
    }

    /// Unlabeled attachment score in percent, 0 when nothing was scored
    pub fn uas(&self) -> f64 {
        percent(self.unlabeled, self.total)
    }

    /// Fold another partial score into this one
    pub fn merge(&mut self, other: &AttachmentScore) {
        self.sentences += other.sentences;
        self.labeled += other.labeled;
        self.unlabeled += other.unlabeled;
        self.total += other.total;
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

impl EvalSink for AttachmentScore {
    fn add(&mut self, labeled: usize, unlabeled: usize, total: usize) {
        self.sentences += 1;
        self.labeled += labeled;
        self.unlabeled += unlabeled;
        self.total += total;
    }
}

impl AddAssign<AttachmentCounts> for AttachmentScore {
    fn add_assign(&mut self, counts: AttachmentCounts) {
        self.add(counts.labeled, counts.unlabeled, counts.total);
    }
}

impl<'a> FromIterator<&'a AttachmentCounts> for AttachmentScore {
    fn from_iter<I: IntoIterator<Item = &'a AttachmentCounts>>(iter: I) -> Self {
        let mut score = AttachmentScore::default();
        for counts in iter {
            score += *counts;
        }
        score
    }
}
