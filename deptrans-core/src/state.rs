//! Parser state for the list-based transition system
//!
//! The state is ⟨σ, λ, β⟩ where:
//! - σ: stack of node ids still eligible to give or receive arcs (last = top)
//! - λ: pass-list of node ids set aside until the next shift
//! - β: input cursor, the next unconsumed node id
//!
//! Node ids in σ stay sorted ascending from bottom to top: shift pushes the
//! pass-list back in its original order before pushing the input node.

use crate::arc::GoldTable;
use crate::error::{CoreError, Result};
use crate::node::{Node, Sentence};
use smallvec::SmallVec;

/// Inline capacity for the stack and pass-list before spilling to the heap
pub const INLINE_NODES: usize = 16;

type NodeIds = SmallVec<[usize; INLINE_NODES]>;

/// Partially built parse of one sentence
#[derive(Debug, Clone)]
pub struct ParserState {
    pub(crate) sentence: Sentence,
    pub(crate) gold: Option<GoldTable>,
    stack: NodeIds,
    inter: NodeIds,
    pub(crate) input: usize,
}

impl ParserState {
    /// Create the initial state and perform the first shift
    ///
    /// After construction the root sits at the stack bottom and the cursor
    /// points at the first token.
    pub fn new(sentence: Sentence) -> Self {
        let mut state = Self {
            sentence,
            gold: None,
            stack: SmallVec::new(),
            inter: SmallVec::new(),
            input: 0,
        };
        state.shift_unchecked();
        state
    }

    /// Create the initial state with a gold table taken from another copy
    /// of the sentence
    ///
    /// Live edges are kept as given, so a finished system parse can be scored
    /// directly against `gold`.
    pub fn with_gold(sentence: Sentence, gold: GoldTable) -> Self {
        let mut state = Self::new(sentence);
        state.gold = Some(gold);
        state
    }

    /// The sentence being parsed, with its current (live) edges
    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    /// Mutable access to the live edges
    pub fn sentence_mut(&mut self) -> &mut Sentence {
        &mut self.sentence
    }

    /// Consume the state and hand back the sentence with its live edges
    pub fn into_sentence(self) -> Sentence {
        self.sentence
    }

    /// Stack contents, bottom first
    pub fn stack(&self) -> &[usize] {
        &self.stack
    }

    /// Pass-list contents in insertion order
    pub fn pass_list(&self) -> &[usize] {
        &self.inter
    }

    /// Position of the input cursor
    pub fn input_cursor(&self) -> usize {
        self.input
    }

    /// Id of the stack top
    pub fn top_id(&self) -> Option<usize> {
        self.stack.last().copied()
    }

    /// Id of the input node, if the cursor is still inside the sentence
    pub fn input_id(&self) -> Option<usize> {
        (self.input < self.sentence.len()).then_some(self.input)
    }

    pub(crate) fn require_top(&self) -> Result<usize> {
        self.top_id().ok_or(CoreError::EmptyStack)
    }

    pub(crate) fn require_input(&self) -> Result<usize> {
        self.input_id().ok_or(CoreError::InputExhausted(self.input))
    }

    /// Node at `window` positions from the stack top in sentence order
    ///
    /// This is a lexical lookup: `stack_top(-1)` is the token right before
    /// the stack top in the original sentence, whatever sits below it on the
    /// stack.
    pub fn stack_top(&self, window: i32) -> Option<&Node> {
        self.sentence.relative(self.top_id()?, window)
    }

    /// Node at `window` positions from the input cursor in sentence order
    pub fn input_node(&self, window: i32) -> Option<&Node> {
        self.sentence.relative(self.input, window)
    }

    /// Structural lookup into the stack and pass-list
    ///
    /// - `window <= 0`: the node `|window|` positions below the stack top
    /// - `window > 0`: the `window`-th most recently passed node
    pub fn peek(&self, window: i32) -> Option<&Node> {
        let id = if window <= 0 {
            let depth = window.unsigned_abs() as usize;
            if depth >= self.stack.len() {
                return None;
            }
            self.stack[self.stack.len() - 1 - depth]
        } else {
            let k = window as usize;
            if k > self.inter.len() {
                return None;
            }
            self.inter[self.inter.len() - k]
        };
        self.sentence.get(id)
    }

    /// Id of the node `depth` positions below the stack top
    pub(crate) fn peek_stack_id(&self, depth: usize) -> Option<usize> {
        self.stack.len().checked_sub(depth + 1).map(|i| self.stack[i])
    }

    /// Clear the stack and pass-list, push `stack_id` and move the cursor
    ///
    /// Used to resume from an earlier point before exploring an alternative
    /// branch; live edges are left untouched.
    pub fn reset(&mut self, stack_id: usize, input_id: usize) {
        self.stack.clear();
        self.inter.clear();
        self.stack.push(stack_id);
        self.input = input_id;
    }

    /// True once every node has been consumed
    pub fn is_terminal(&self) -> bool {
        self.input >= self.sentence.len()
    }

    /// Gold table, if one has been saved
    pub fn gold(&self) -> Option<&GoldTable> {
        self.gold.as_ref()
    }

    pub(crate) fn require_gold(&self) -> Result<&GoldTable> {
        self.gold.as_ref().ok_or(CoreError::GoldNotSaved)
    }

    /// Snapshot the current heads as the gold tree and clear them
    ///
    /// Returns whether any node had a real gold head.
    pub fn save_gold(&mut self) -> Result<bool> {
        let (table, has_arcs) = GoldTable::take(&mut self.sentence)?;
        self.gold = Some(table);
        Ok(has_arcs)
    }

    /// Re-apply the saved gold tree over the live nodes
    pub fn restore_gold(&mut self) -> Result<()> {
        let gold = self.gold.as_ref().ok_or(CoreError::GoldNotSaved)?;
        gold.restore(&mut self.sentence)
    }

    /// Flush the pass-list onto the stack, push the input node, advance
    pub(crate) fn shift(&mut self) -> Result<()> {
        self.require_input()?;
        self.shift_unchecked();
        Ok(())
    }

    fn shift_unchecked(&mut self) {
        while let Some(id) = self.inter.pop() {
            self.stack.push(id);
        }
        self.stack.push(self.input);
        self.input += 1;
    }

    /// Pop the stack top for good
    pub(crate) fn reduce(&mut self) -> Result<()> {
        self.stack.pop().map(|_| ()).ok_or(CoreError::EmptyStack)
    }

    /// Move the stack top into the pass-list
    pub(crate) fn pass(&mut self) -> Result<()> {
        let id = self.stack.pop().ok_or(CoreError::EmptyStack)?;
        self.inter.push(id);
        Ok(())
    }
}
