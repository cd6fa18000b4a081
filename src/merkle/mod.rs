//! Binary Merkle commitments over field elements.
//!
//! The module fixes the following protocol knobs:
//!
//! * **Arity:** binary.  Level `i + 1` has `ceil(len(level i) / 2)` nodes.
//! * **Uneven levels:** a lone trailing node is hashed with itself
//!   (`parent = H(x, x)`), never promoted unchanged.  Openings report the node
//!   itself as its sibling so that recomputation follows the same rule.
//! * **Leaves:** every input integer is reduced into the hasher's field before
//!   it enters level 0.  Leaves are not hashed again.
//! * **Hash family:** any [`FieldHasher`](crate::hash::FieldHasher); the tree
//!   stores only the resulting levels and the family identifier.
//!
//! Trees are immutable after construction and can be shared across threads
//! for concurrent opening extraction.

mod tree;
mod types;

pub use tree::MerkleTree;
pub use types::{MerkleError, Opening, LEFT, RIGHT};
