//! Structured match values.
//!
//! A [`Tree`] records the structure of the input matched by a pattern (a
//! parse tree): lists for sequences and repetitions, [`Tree::Branch`] for
//! the alternative taken by a choice, [`Tree::Absent`] for an empty
//! optional, and leaves for the raw input items.

use std::fmt;

use crate::error::{Error, Result};
use crate::value::Value;

/// One node of a structured match value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tree {
    /// An empty optional matched nothing.
    Absent,
    /// A raw input item consumed by a leaf pattern.
    Leaf(Value),
    /// Sub-matches of a sequence or repetition, in input order.
    List(Vec<Tree>),
    /// The alternative of a choice that matched.
    Branch {
        /// Zero-based index of the alternative within the choice.
        index: usize,
        /// The alternative's own match value.
        value: Box<Tree>,
    },
}

/// One step of a path into a [`Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Descend into the list element at this index.
    At(usize),
    /// Apply the rest of the path to every element of the list and collect
    /// the results into a new list.
    Each,
}

impl Tree {
    /// Builds a leaf from anything convertible to a [`Value`].
    #[must_use]
    pub fn leaf(value: impl Into<Value>) -> Self {
        Self::Leaf(value.into())
    }

    /// Builds a list node.
    #[must_use]
    pub fn list(items: impl IntoIterator<Item = Tree>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Builds a branch node.
    #[must_use]
    pub fn branch(index: usize, value: Tree) -> Self {
        Self::Branch {
            index,
            value: Box::new(value),
        }
    }

    /// Returns true if this node is [`Tree::Absent`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Attempts to view this node as a leaf value.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&Value> {
        match self {
            Self::Leaf(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to view this node as a list of sub-matches.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Tree]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to view this node as a branch.
    #[must_use]
    pub const fn as_branch(&self) -> Option<(usize, &Tree)> {
        match self {
            Self::Branch { index, value } => Some((*index, value)),
            _ => None,
        }
    }

    /// Follows `path` through the tree, strictly.
    ///
    /// Each [`Step::At`] indexes into a list; [`Step::Each`] applies the
    /// rest of the path to every list element and collects the results.
    /// A [`Tree::Branch`] is transparent: the step is retried on its value.
    ///
    /// # Errors
    /// Returns an error if a step targets a non-indexable node or an index
    /// falls outside its list.
    pub fn get(&self, path: &[Step]) -> Result<Tree> {
        self.walk(path, 0, true)
    }

    /// Follows `path` through the tree, tolerantly.
    ///
    /// Like [`Tree::get`], but indexing into [`Tree::Absent`] or past the
    /// end of a list yields [`Tree::Absent`] instead of an error.
    ///
    /// # Errors
    /// Returns an error if a step targets a leaf, which is never indexable.
    pub fn probe(&self, path: &[Step]) -> Result<Tree> {
        self.walk(path, 0, false)
    }

    fn walk(&self, path: &[Step], depth: usize, strict: bool) -> Result<Tree> {
        if depth == path.len() {
            return Ok(self.clone());
        }
        match self {
            Self::Branch { value, .. } => value.walk(path, depth, strict),
            Self::List(items) => match path[depth] {
                Step::Each => {
                    let mut out = Vec::with_capacity(items.len());
                    for item in items {
                        out.push(item.walk(path, depth + 1, strict)?);
                    }
                    Ok(Self::List(out))
                }
                Step::At(index) => match items.get(index) {
                    Some(item) => item.walk(path, depth + 1, strict),
                    None if strict => Err(Error::IndexOutOfBounds {
                        index,
                        length: items.len(),
                    }),
                    None => Ok(Self::Absent),
                },
            },
            Self::Absent if !strict => Ok(Self::Absent),
            Self::Absent => Err(Error::NotIndexable {
                depth,
                found: "absent",
            }),
            Self::Leaf(_) => Err(Error::NotIndexable {
                depth,
                found: "leaf",
            }),
        }
    }
}

impl From<Value> for Tree {
    fn from(value: Value) -> Self {
        Self::Leaf(value)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "_"),
            Self::Leaf(v) => write!(f, "{v}"),
            Self::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Self::Branch { index, value } => write!(f, "#{index}:{value}"),
        }
    }
}
