//! Node addressing for feature templates
//!
//! A template names a node by a [`Source`] and a window, optionally followed
//! by a [`Relation`] over the live edges. The two source families answer
//! different questions and are not interchangeable: `Stack` and `Input` look
//! at nearby tokens in the sentence, `Peek` looks at nearby nodes in the
//! partial structure.

use crate::node::{Node, Sentence};
use crate::state::ParserState;

/// Where the window is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Source {
    /// Sentence offset from the stack top
    Stack,
    /// Sentence offset from the input cursor
    Input,
    /// Structural offset into the stack (`<= 0`) or pass-list (`> 0`)
    Peek,
}

/// A step over the live edges from the addressed node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// The node's head
    Head,
    /// The head of the node's head
    Grandhead,
    /// Leftmost dependent to the left of the node
    LeftmostDependent,
    /// Rightmost dependent to the right of the node
    RightmostDependent,
    /// Closest dependent to the left of the node
    LeftNearestDependent,
    /// Closest dependent to the right of the node
    RightNearestDependent,
    /// Closest sibling to the left of the node
    LeftNearestSibling,
    /// Closest sibling to the right of the node
    RightNearestSibling,
}

/// Address of one node for a feature template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureItem {
    /// Lookup family
    pub source: Source,
    /// Offset within the family
    pub window: i32,
    /// Optional step over the live edges
    pub relation: Option<Relation>,
}

impl FeatureItem {
    /// Address without a relation step
    pub fn new(source: Source, window: i32) -> Self {
        Self {
            source,
            window,
            relation: None,
        }
    }

    /// Add a relation step
    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relation = Some(relation);
        self
    }
}

impl Relation {
    /// Follow this relation from `id`
    pub fn resolve(&self, sentence: &Sentence, id: usize) -> Option<usize> {
        match self {
            Relation::Head => sentence.get(id)?.head(),
            Relation::Grandhead => {
                let head = sentence.get(id)?.head()?;
                sentence.get(head)?.head()
            }
            Relation::LeftmostDependent => sentence.dependents(id).find(|&d| d < id),
            Relation::RightmostDependent => sentence.dependents(id).filter(|&d| d > id).last(),
            Relation::LeftNearestDependent => sentence.dependents(id).filter(|&d| d < id).last(),
            Relation::RightNearestDependent => sentence.dependents(id).find(|&d| d > id),
            Relation::LeftNearestSibling => {
                let head = sentence.get(id)?.head()?;
                sentence.dependents(head).filter(|&d| d < id).last()
            }
            Relation::RightNearestSibling => {
                let head = sentence.get(id)?.head()?;
                sentence.dependents(head).find(|&d| d > id)
            }
        }
    }
}

impl ParserState {
    /// Resolve a feature address to a node, `None` on any miss
    pub fn feature_node(&self, item: &FeatureItem) -> Option<&Node> {
        let node = match item.source {
            Source::Stack => self.stack_top(item.window),
            Source::Input => self.input_node(item.window),
            Source::Peek => self.peek(item.window),
        }?;

        match item.relation {
            None => Some(node),
            Some(relation) => {
                let id = relation.resolve(self.sentence(), node.id)?;
                self.sentence().get(id)
            }
        }
    }
}
