//! Token nodes and the sentence that owns them
//!
//! A [`Sentence`] is a 1-indexed sequence of tokens behind an artificial root
//! at index 0. Heads are stored as plain indices into the same sequence, so a
//! node never owns its governor.

use crate::error::{CoreError, Result};

/// Form used for the artificial root node
pub const ROOT_FORM: &str = "@#r$%";

/// A single token in a sentence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Position in the sentence (0 = root)
    pub id: usize,
    /// Surface form
    pub form: String,
    /// Lemma, if known
    pub lemma: Option<String>,
    /// Part-of-speech tag, if known
    pub pos: Option<String>,
    head: Option<usize>,
    label: String,
}

impl Node {
    /// Create a headless node
    pub fn new(id: usize, form: impl Into<String>) -> Self {
        Self {
            id,
            form: form.into(),
            lemma: None,
            pos: None,
            head: None,
            label: String::new(),
        }
    }

    /// Attach a part-of-speech tag
    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Attach a lemma
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// Current head id, if any
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Current dependency label (empty when headless)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether a head has been assigned
    pub fn has_head(&self) -> bool {
        self.head.is_some()
    }

    /// Whether this node is the artificial root
    pub fn is_root(&self) -> bool {
        self.id == 0
    }
}

/// An ordered node sequence with the root at index 0
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SentenceRepr"))]
pub struct Sentence {
    nodes: Vec<Node>,
}

/// Unchecked wire form of [`Sentence`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SentenceRepr {
    nodes: Vec<Node>,
}

#[cfg(feature = "serde")]
impl TryFrom<SentenceRepr> for Sentence {
    type Error = CoreError;

    fn try_from(repr: SentenceRepr) -> Result<Self> {
        Self::from_nodes(repr.nodes)
    }
}

impl Default for Sentence {
    fn default() -> Self {
        Self::new()
    }
}

impl Sentence {
    /// Create a sentence holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(0, ROOT_FORM)],
        }
    }

    /// Create a sentence from token forms (root is added automatically)
    pub fn from_forms<I, S>(forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sentence = Self::new();
        for form in forms {
            sentence.push(form);
        }
        sentence
    }

    /// Build a sentence from a complete node list, root first
    ///
    /// Ids must equal positions, node 0 must be the root and every head must
    /// name another node of the same list.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(CoreError::MalformedSentence("missing root node".into()));
        }
        if nodes[0].has_head() {
            return Err(CoreError::MalformedSentence("root node has a head".into()));
        }

        let len = nodes.len();
        for (position, node) in nodes.iter().enumerate() {
            if node.id != position {
                return Err(CoreError::MalformedSentence(format!(
                    "node at position {position} has id {}",
                    node.id
                )));
            }
            match node.head {
                Some(head) if head == position => return Err(CoreError::SelfHead(position)),
                Some(head) if head >= len => {
                    return Err(CoreError::NodeOutOfBounds { id: head, len });
                }
                _ => {}
            }
        }

        Ok(Self { nodes })
    }

    /// Append a token and return its id
    pub fn push(&mut self, form: impl Into<String>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, form));
        id
    }

    /// Append a fully built node, renumbering it to the next id
    pub fn push_node(&mut self, mut node: Node) -> usize {
        let id = self.nodes.len();
        node.id = id;
        self.nodes.push(node);
        id
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the sentence holds no tokens besides the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Node by id
    pub fn get(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes, root first
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Real tokens, root excluded
    pub fn tokens(&self) -> &[Node] {
        &self.nodes[1..]
    }

    /// Node at `id + window`, or `None` when that falls outside the sentence
    pub fn relative(&self, id: usize, window: i32) -> Option<&Node> {
        let target = id as i64 + i64::from(window);
        if target < 0 {
            return None;
        }
        self.nodes.get(target as usize)
    }

    fn check(&self, id: usize) -> Result<()> {
        if id < self.nodes.len() {
            Ok(())
        } else {
            Err(CoreError::NodeOutOfBounds {
                id,
                len: self.nodes.len(),
            })
        }
    }

    /// Assign `head` as the governor of `dependent` with the given label
    ///
    /// Overwrites any previous assignment.
    pub fn set_head(&mut self, dependent: usize, head: usize, label: impl Into<String>) -> Result<()> {
        self.check(dependent)?;
        self.check(head)?;
        if dependent == head {
            return Err(CoreError::SelfHead(dependent));
        }
        let node = &mut self.nodes[dependent];
        node.head = Some(head);
        node.label = label.into();
        Ok(())
    }

    /// Restore a (possibly absent) head and label exactly as given
    pub(crate) fn restore_head(&mut self, dependent: usize, head: Option<usize>, label: &str) -> Result<()> {
        match head {
            Some(head) => self.set_head(dependent, head, label),
            None => self.clear_head(dependent),
        }
    }

    /// Remove the head and label of `dependent`
    pub fn clear_head(&mut self, dependent: usize) -> Result<()> {
        self.check(dependent)?;
        let node = &mut self.nodes[dependent];
        node.head = None;
        node.label.clear();
        Ok(())
    }

    /// Whether `node` sits strictly below `ancestor` under the current heads
    ///
    /// The upward walk is bounded by the sentence length; running past that
    /// bound means the heads contain a cycle, which is reported as
    /// [`CoreError::HeadCycle`].
    pub fn is_descendant_of(&self, node: usize, ancestor: usize) -> Result<bool> {
        self.check(node)?;
        self.check(ancestor)?;

        let mut current = self.nodes[node].head;
        let mut steps = 0;

        while let Some(head) = current {
            if head == ancestor {
                return Ok(true);
            }
            steps += 1;
            if steps > self.nodes.len() {
                return Err(CoreError::HeadCycle(node));
            }
            current = self.nodes[head].head;
        }

        Ok(false)
    }

    /// Ids of the current dependents of `head`, in sentence order
    pub fn dependents(&self, head: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .filter(move |n| n.head == Some(head))
            .map(|n| n.id)
    }

    /// Snapshot of every token's head, root excluded
    pub fn heads(&self) -> Vec<Option<usize>> {
        self.tokens().iter().map(|n| n.head).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn the_dog_barks() -> Sentence {
        let mut s = Sentence::from_forms(["The", "dog", "barks"]);
        s.set_head(1, 2, "det").unwrap();
        s.set_head(2, 3, "nsubj").unwrap();
        s.set_head(3, 0, "root").unwrap();
        s
    }

    #[test]
    fn test_root_is_index_zero() {
        let s = Sentence::from_forms(["a", "b"]);
        assert_eq!(s.len(), 3);
        assert!(s.get(0).unwrap().is_root());
        assert_eq!(s.get(2).unwrap().form, "b");
        assert!(!s.is_empty());
        assert!(Sentence::new().is_empty());
    }

    #[test]
    fn test_set_head_rejects_self_and_out_of_bounds() {
        let mut s = Sentence::from_forms(["a"]);
        assert_eq!(s.set_head(1, 1, "x"), Err(CoreError::SelfHead(1)));
        assert_eq!(
            s.set_head(1, 5, "x"),
            Err(CoreError::NodeOutOfBounds { id: 5, len: 2 })
        );
    }

    #[test]
    fn test_descendant_walk() {
        let s = the_dog_barks();
        assert!(s.is_descendant_of(1, 3).unwrap());
        assert!(s.is_descendant_of(1, 0).unwrap());
        assert!(!s.is_descendant_of(3, 1).unwrap());
        // strict: a node is not its own descendant
        assert!(!s.is_descendant_of(2, 2).unwrap());
    }

    #[test]
    fn test_descendant_walk_detects_cycle() {
        let mut s = Sentence::from_forms(["a", "b", "c"]);
        s.set_head(1, 2, "x").unwrap();
        s.set_head(2, 1, "x").unwrap();
        assert_eq!(s.is_descendant_of(1, 3), Err(CoreError::HeadCycle(1)));
    }

    #[test]
    fn test_relative_lookup_bounds() {
        let s = the_dog_barks();
        assert_eq!(s.relative(2, -2).unwrap().id, 0);
        assert!(s.relative(1, -2).is_none());
        assert!(s.relative(3, 1).is_none());
    }

    #[test]
    fn test_dependents_in_order() {
        let mut s = Sentence::from_forms(["a", "b", "c", "d"]);
        s.set_head(1, 3, "x").unwrap();
        s.set_head(4, 3, "y").unwrap();
        s.set_head(2, 3, "z").unwrap();
        assert_eq!(s.dependents(3).collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn test_clear_head() {
        let mut s = the_dog_barks();
        s.clear_head(2).unwrap();
        let node = s.get(2).unwrap();
        assert!(!node.has_head());
        assert_eq!(node.label(), "");
        assert_eq!(s.heads(), vec![Some(2), None, Some(0)]);
    }

    #[test]
    fn test_from_nodes_validates_layout() {
        let s = the_dog_barks();
        assert_eq!(Sentence::from_nodes(s.nodes().to_vec()).unwrap(), s);

        assert!(matches!(
            Sentence::from_nodes(Vec::new()),
            Err(CoreError::MalformedSentence(_))
        ));
        let shuffled = vec![Node::new(0, ROOT_FORM), Node::new(2, "b")];
        assert!(matches!(
            Sentence::from_nodes(shuffled),
            Err(CoreError::MalformedSentence(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_missing_root() {
        assert!(serde_json::from_str::<Sentence>(r#"{"nodes": []}"#).is_err());

        let dangling = r#"{"nodes": [
            {"id": 0, "form": "@#r$%", "lemma": null, "pos": null, "head": null, "label": ""},
            {"id": 1, "form": "a", "lemma": null, "pos": null, "head": 5, "label": "x"}
        ]}"#;
        assert!(serde_json::from_str::<Sentence>(dangling).is_err());

        let s = the_dog_barks();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(serde_json::from_str::<Sentence>(&json).unwrap(), s);
    }
}
