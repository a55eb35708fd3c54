//! Composite transition labels
//!
//! A label pairs an arc direction with a list action and, for arc
//! transitions, a dependency relation. On the wire it is a single compound
//! token such as `L-R-nsubj`, `R-S-obj` or `N-P`.

use crate::error::{CoreError, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between the parts of a compound label
pub const LABEL_SEPARATOR: char = '-';

/// Direction of the arc created by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArcDirection {
    /// Stack top takes the input node as head
    Left,
    /// Input node takes the stack top as head
    Right,
    /// No arc
    No,
}

impl ArcDirection {
    /// Single-letter code
    pub fn code(&self) -> &'static str {
        match self {
            ArcDirection::Left => "L",
            ArcDirection::Right => "R",
            ArcDirection::No => "N",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(ArcDirection::Left),
            "R" => Some(ArcDirection::Right),
            "N" => Some(ArcDirection::No),
            _ => None,
        }
    }
}

/// What happens to the stack, pass-list and cursor after the arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListAction {
    /// Flush the pass-list and push the input node
    Shift,
    /// Pop the stack top for good
    Reduce,
    /// Move the stack top into the pass-list
    Pass,
}

impl ListAction {
    /// Single-letter code
    pub fn code(&self) -> &'static str {
        match self {
            ListAction::Shift => "S",
            ListAction::Reduce => "R",
            ListAction::Pass => "P",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(ListAction::Shift),
            "R" => Some(ListAction::Reduce),
            "P" => Some(ListAction::Pass),
            _ => None,
        }
    }
}

/// A complete transition: arc direction, list action and relation
///
/// Serialises as its compound token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct DepLabel {
    arc: ArcDirection,
    list: ListAction,
    deprel: String,
}

impl DepLabel {
    /// Left arc: the stack top is attached to the input node
    pub fn left(list: ListAction, deprel: impl Into<String>) -> Self {
        Self {
            arc: ArcDirection::Left,
            list,
            deprel: deprel.into(),
        }
    }

    /// Right arc: the input node is attached to the stack top
    pub fn right(list: ListAction, deprel: impl Into<String>) -> Self {
        Self {
            arc: ArcDirection::Right,
            list,
            deprel: deprel.into(),
        }
    }

    /// No arc, list action only
    pub fn no_arc(list: ListAction) -> Self {
        Self {
            arc: ArcDirection::No,
            list,
            deprel: String::new(),
        }
    }

    /// Arc direction
    pub fn arc(&self) -> ArcDirection {
        self.arc
    }

    /// List action
    pub fn list(&self) -> ListAction {
        self.list
    }

    /// Dependency relation (empty for no-arc labels)
    pub fn deprel(&self) -> &str {
        &self.deprel
    }

    /// Whether this label creates an arc
    pub fn is_arc(&self) -> bool {
        self.arc != ArcDirection::No
    }
}

impl fmt::Display for DepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.arc.code(), LABEL_SEPARATOR, self.list.code())?;
        if !self.deprel.is_empty() {
            write!(f, "{}{}", LABEL_SEPARATOR, self.deprel)?;
        }
        Ok(())
    }
}

impl FromStr for DepLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidLabel(s.to_string());
        let mut parts = s.splitn(3, LABEL_SEPARATOR);

        let arc = parts
            .next()
            .and_then(ArcDirection::from_code)
            .ok_or_else(invalid)?;
        let list = parts
            .next()
            .and_then(ListAction::from_code)
            .ok_or_else(invalid)?;
        let deprel = match parts.next() {
            Some("") => return Err(invalid()),
            Some(deprel) => deprel,
            None => "",
        };

        match arc {
            ArcDirection::No if !deprel.is_empty() => Err(invalid()),
            ArcDirection::No => Ok(Self::no_arc(list)),
            _ => Ok(Self { arc, list, deprel: deprel.to_string() }),
        }
    }
}

impl TryFrom<String> for DepLabel {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DepLabel> for String {
    fn from(label: DepLabel) -> Self {
        label.to_string()
    }
}
