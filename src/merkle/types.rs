use serde::{Deserialize, Serialize};

use crate::field::FieldElement;

/// Position bit for a node that was the left operand of its parent.
pub const LEFT: u8 = 0;
/// Position bit for a node that was the right operand of its parent.
pub const RIGHT: u8 = 1;

/// Authentication path for a single leaf.
///
/// `siblings[h]` and `positions[h]` describe level `h`, counted from the leaves
/// upwards.  `positions[h]` is [`LEFT`] when the path node was hashed as the left
/// operand at that level and [`RIGHT`] otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    pub siblings: Vec<FieldElement>,
    pub positions: Vec<u8>,
}

impl Opening {
    /// Number of levels covered by the path.
    pub fn height(&self) -> usize {
        self.siblings.len()
    }

    /// Returns `true` for the opening of a singleton tree.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Iterates `(sibling, position)` pairs from the leaf level upwards.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldElement, u8)> {
        self.siblings.iter().zip(self.positions.iter().copied())
    }
}

/// Errors emitted by the Merkle layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MerkleError {
    /// A tree needs at least one leaf.
    #[error("no leaves supplied")]
    EmptyLeaves,
    /// Requested leaf index lies outside `[0, leaf_count)`.
    #[error("index {index} out of range (leaf count {leaf_count})")]
    IndexOutOfRange { index: usize, leaf_count: usize },
    /// Internal level bookkeeping was inconsistent.
    #[error("invalid tree state: {reason}")]
    InvalidTreeState { reason: &'static str },
}
