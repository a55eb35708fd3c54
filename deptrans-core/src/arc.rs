//! Gold arcs and the per-sentence gold table

use crate::error::Result;
use crate::node::Sentence;

/// Immutable snapshot of one gold edge: the head of a node and its relation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoldArc {
    head: Option<usize>,
    label: String,
}

impl GoldArc {
    /// Create an arc snapshot
    pub fn new(head: Option<usize>, label: impl Into<String>) -> Self {
        Self {
            head,
            label: label.into(),
        }
    }

    /// Gold head id, if the node has one
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Gold relation
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether `node` is the gold head
    pub fn is_head(&self, node: usize) -> bool {
        self.head == Some(node)
    }

    /// Whether `head` matches the gold head (both absent counts as a match)
    pub fn matches_head(&self, head: Option<usize>) -> bool {
        self.head == head
    }

    /// Whether `label` matches the gold relation
    pub fn matches_label(&self, label: &str) -> bool {
        self.label == label
    }
}

/// One [`GoldArc`] per node id, root included
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoldTable {
    arcs: Vec<GoldArc>,
}

impl GoldTable {
    /// Snapshot the current heads of `sentence` without touching it
    pub fn snapshot(sentence: &Sentence) -> Self {
        Self {
            arcs: sentence
                .nodes()
                .iter()
                .map(|n| GoldArc::new(n.head(), n.label()))
                .collect(),
        }
    }

    /// Snapshot the current heads of `sentence` and clear them
    ///
    /// Returns the table and whether any node had a real head.
    pub fn take(sentence: &mut Sentence) -> Result<(Self, bool)> {
        let table = Self::snapshot(sentence);
        for id in 0..sentence.len() {
            sentence.clear_head(id)?;
        }
        let has_arcs = table.has_arcs();
        Ok((table, has_arcs))
    }

    /// Re-apply the snapshot over the tokens of `sentence` (root untouched)
    pub fn restore(&self, sentence: &mut Sentence) -> Result<()> {
        for id in 1..sentence.len() {
            sentence.clear_head(id)?;
        }
        for id in 1..sentence.len().min(self.arcs.len()) {
            let arc = &self.arcs[id];
            sentence.restore_head(id, arc.head, &arc.label)?;
        }
        Ok(())
    }

    /// Gold arc of node `id`
    pub fn get(&self, id: usize) -> Option<&GoldArc> {
        self.arcs.get(id)
    }

    /// Gold head of node `id`
    pub fn head_of(&self, id: usize) -> Option<usize> {
        self.arcs.get(id).and_then(GoldArc::head)
    }

    /// Whether `head` is the gold head of node `id`
    pub fn is_head(&self, id: usize, head: usize) -> bool {
        self.arcs.get(id).is_some_and(|arc| arc.is_head(head))
    }

    /// Whether at least one node has a real gold head
    pub fn has_arcs(&self) -> bool {
        self.arcs.iter().any(|arc| arc.head.is_some())
    }

    /// Number of entries, root included
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// True when the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// All arcs in node order
    pub fn arcs(&self) -> &[GoldArc] {
        &self.arcs
    }
}
