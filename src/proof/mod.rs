//! # Membership proof pipeline
//!
//! ```text
//! proof
//! ├── types   : [`MembershipProof`], the transportable artefact
//! └── circuit : recording, proving and verifying the membership relation
//! ```
//!
//! The relation proven is: *the prover knows a leaf and siblings such that the
//! position-routed walk ends at the public root*.  Leaf and siblings are
//! private wires, the root is the single public input and the positions fix
//! the circuit shape, so they travel next to the proof in clear.

mod circuit;
mod types;

pub use circuit::{prove_membership, record_membership_circuit, verify_membership};
pub use types::MembershipProof;
