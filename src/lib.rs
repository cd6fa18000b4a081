//! Core library entry point for the `rpp-merkle` membership system.
//!
//! The crate commits to a list of integers with a binary Merkle tree over a
//! prime field and proves that a private leaf belongs to a public root.  The
//! root recomputation is written once ([`membership::recompute`]) and runs
//! either over concrete field elements or over wires of a constraint
//! environment, so the off-domain check and the in-circuit check share a
//! single routing rule.
//!
//! ```text
//! params ──► field::FieldDomain ──► hash::FieldHasher
//!                                        │
//!            merkle::MerkleTree ◄────────┤
//!                   │ opening            │
//!                   ▼                    ▼
//!        membership::verify_opening   proof::prove_membership
//!                                        │ backend::Recording
//!                                        ▼
//!                                     proof::verify_membership
//! ```

pub mod backend;
pub mod circuit;
pub mod field;
pub mod hash;
pub mod membership;
pub mod merkle;
pub mod params;
pub mod proof;
pub mod utils;

pub use field::{FieldDomain, FieldElement, FieldError};
pub use hash::{AnyHasher, FieldHasher, HashFamily};
pub use membership::{
    recompute, verify, verify_opening, Concrete, MembershipError, Symbolic, Verdict,
};
pub use merkle::{MerkleError, MerkleTree, Opening};
pub use params::{BuiltinProfile, MembershipParams, MembershipParamsBuilder, ParamsError};
pub use proof::{prove_membership, verify_membership, MembershipProof};
