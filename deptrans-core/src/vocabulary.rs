//! Label vocabulary shared between the oracle and an external scorer
//!
//! A scorer ranks vocabulary indices; the executor maps the best index back
//! to a [`DepLabel`]. The vocabulary is built once per run and then only read,
//! so it can sit behind an `Arc` and be shared by worker threads.

use crate::label::DepLabel;
use std::collections::HashMap;

/// One label together with how often the oracle produced it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VocabularyEntry {
    /// The compound transition label
    pub label: DepLabel,
    /// Number of occurrences seen while building
    pub count: usize,
}

/// Frozen index ↔ label table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<VocabularyEntry>", into = "Vec<VocabularyEntry>")
)]
pub struct LabelVocabulary {
    entries: Vec<VocabularyEntry>,
    index: HashMap<DepLabel, usize>,
}

impl LabelVocabulary {
    /// Label at `index`
    pub fn get(&self, index: usize) -> Option<&DepLabel> {
        self.entries.get(index).map(|e| &e.label)
    }

    /// Index of `label`, if known
    pub fn index_of(&self, label: &DepLabel) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no labels are known
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in index order
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }
}

impl From<Vec<VocabularyEntry>> for LabelVocabulary {
    fn from(entries: Vec<VocabularyEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.label.clone(), i))
            .collect();
        Self { entries, index }
    }
}

impl From<LabelVocabulary> for Vec<VocabularyEntry> {
    fn from(vocabulary: LabelVocabulary) -> Self {
        vocabulary.entries
    }
}

/// Collects label counts before freezing them into a [`LabelVocabulary`]
#[derive(Debug, Clone, Default)]
pub struct VocabularyBuilder {
    counts: HashMap<DepLabel, usize>,
}

impl VocabularyBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`
    pub fn add(&mut self, label: &DepLabel) {
        *self.counts.entry(label.clone()).or_insert(0) += 1;
    }

    /// Count every label in `labels`
    pub fn extend<'a, I: IntoIterator<Item = &'a DepLabel>>(&mut self, labels: I) {
        for label in labels {
            self.add(label);
        }
    }

    /// Merge the counts of another builder
    pub fn merge(&mut self, other: VocabularyBuilder) {
        for (label, count) in other.counts {
            *self.counts.entry(label).or_insert(0) += count;
        }
    }

    /// Freeze: most frequent first, ties broken by label order
    pub fn build(self) -> LabelVocabulary {
        let mut entries: Vec<VocabularyEntry> = self
            .counts
            .into_iter()
            .map(|(label, count)| VocabularyEntry { label, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        LabelVocabulary::from(entries)
    }
}
