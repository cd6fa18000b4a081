//! Transparent reference backend for
//! [`ConstraintEnvironment`](crate::circuit::ConstraintEnvironment).
//!
//! The backend follows the usual lifecycle of a proving pipeline while keeping
//! every step observable:
//!
//! 1. [`Recording::begin`] opens a scoped recording for a field domain.
//! 2. Values are allocated and gates recorded through the environment trait.
//! 3. [`Recording::compile`] freezes the gate list into a [`Circuit`] (bound by
//!    a Blake2s structural digest that excludes values) plus an [`Assignment`].
//! 4. [`Circuit::synthesize`] checks the assignment against every gate and
//!    yields a [`Witness`].
//! 5. [`TransparentProver`] packages the witness as a [`TransparentProof`];
//!    [`TransparentVerifier`] re-evaluates the circuit against the public
//!    inputs.
//!
//! The proof reveals the private witness.  It stands in for a succinct
//! zero-knowledge backend and carries none of its privacy properties.

mod circuit;
mod prover;
mod recorder;
mod verifier;

pub use circuit::{Assignment, Circuit, Gate, Witness};
pub use prover::{TransparentProof, TransparentProver};
pub use recorder::Recording;
pub use verifier::TransparentVerifier;
