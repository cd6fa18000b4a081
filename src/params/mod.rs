//! Parameter registry for membership deployments.
//!
//! [`MembershipParams`] is the single place where the field and the node hash
//! are chosen.  Everything downstream receives the explicit objects it
//! materialises ([`MembershipParams::domain`], [`MembershipParams::hasher`]).
//!
//! | Group | Description |
//! |-------|-------------|
//! | Field | BN254, Goldilocks or a caller-supplied prime modulus. |
//! | Hash | SHA-256, Blake2s or Poseidon with an explicit parameter set. |
//! | Execution | Whether tree levels and batch openings may use the thread pool. |
//!
//! Parameter sets are validated when built or loaded from JSON, and
//! [`params_hash`] gives a stable digest that two parties can compare before
//! exchanging proofs.

mod builder;
mod hash;
mod membership_params;
mod types;
mod validate;

pub use builder::{BuiltinProfile, MembershipParamsBuilder};
pub use hash::params_hash;
pub use membership_params::MembershipParams;
pub use types::{FieldKind, HashKind};
pub use validate::{validate, ParamsError};
