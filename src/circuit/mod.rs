//! Constraint-environment contract consumed by the membership protocol.
//!
//! An environment hands out opaque [`Wire`] handles for private and public
//! values, records hash gates and equality assertions, and is later compiled by
//! its backend.  The membership code only talks to this trait; the reference
//! implementation lives in [`crate::backend`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::field::FieldElement;
use crate::hash::{FieldHasher, HashFamily};

/// Handle to a value allocated inside a constraint environment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Wire(pub u32);

impl Wire {
    /// Position of the wire in allocation order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Visibility class of a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireKind {
    /// Known to the verifier.
    Public,
    /// Supplied by the prover only.
    Private,
    /// Output of a recorded gate.
    Internal,
}

impl WireKind {
    pub const fn tag(self) -> u8 {
        match self {
            WireKind::Public => 0,
            WireKind::Private => 1,
            WireKind::Internal => 2,
        }
    }
}

/// Identifier of a recorded constraint (index into the gate list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstraintId(pub u32);

/// Errors raised by constraint environments and backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CircuitError {
    /// Wire handle does not belong to this environment.
    #[error("unknown wire {wire:?}")]
    UnknownWire { wire: Wire },
    /// Allocated value was not reduced into the environment's field.
    #[error("value for wire {index} is not canonical")]
    NonCanonical { index: usize },
    /// Hasher operates over a different field than the environment.
    #[error("hasher field does not match the constraint environment field")]
    DomainMismatch,
    /// Gate was recorded with another hash family than the one supplied.
    #[error("hash family mismatch: circuit uses {expected}, got {got}")]
    HashFamilyMismatch { expected: HashFamily, got: HashFamily },
    /// Witness does not satisfy a recorded constraint.
    #[error("constraint {constraint:?} is not satisfied")]
    Unsatisfied { constraint: ConstraintId },
    /// Assignment or witness has the wrong number of values.
    #[error("expected {expected} wire values, got {got}")]
    WitnessLength { expected: usize, got: usize },
    /// Verifier was handed the wrong number of public inputs.
    #[error("expected {expected} public inputs, got {got}")]
    PublicInputCount { expected: usize, got: usize },
    /// More wires or gates than the `u32` handle space allows.
    #[error("constraint system capacity exceeded")]
    CapacityExceeded,
}

/// Recording surface of a constraint system.
pub trait ConstraintEnvironment {
    /// Allocates a prover-only value.
    fn allocate_private(&mut self, value: FieldElement) -> Result<Wire, CircuitError>;

    /// Allocates a value that becomes a public input.
    fn allocate_public(&mut self, value: FieldElement) -> Result<Wire, CircuitError>;

    /// Records `a == b`.
    fn assert_equal(&mut self, a: Wire, b: Wire) -> Result<ConstraintId, CircuitError>;

    /// Records `output = hasher.compress(left, right)` and returns `output`.
    fn compress<H>(&mut self, hasher: &H, left: Wire, right: Wire) -> Result<Wire, CircuitError>
    where
        H: FieldHasher + ?Sized;
}
