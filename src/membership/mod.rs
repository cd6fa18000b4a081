//! Position-routed root recomputation, written once and evaluated either over
//! concrete field elements or over wires of a constraint environment.
//!
//! The walk starts from the leaf; at level `h` the running node is the left
//! operand when `positions[h] == 0` and the right operand when it is `1`, and
//! the parent becomes the next running node.  The final node is compared with
//! the expected root through [`ValueCapability::assert_equal`]: a concrete
//! context returns a [`Verdict`], a symbolic one records a constraint.

mod symbolic;

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuit::CircuitError;
use crate::field::FieldElement;
use crate::hash::FieldHasher;
use crate::merkle::{MerkleError, Opening};

pub use symbolic::Symbolic;

/// Errors surfaced by the membership protocol.
///
/// Everything except [`MembershipError::VerificationFailure`] signals caller
/// misuse.  A root mismatch is normally reported as [`Verdict::Rejected`];
/// the error variant exists for callers that convert verdicts with
/// [`Verdict::into_result`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MembershipError {
    #[error("length mismatch: {siblings} siblings but {positions} positions")]
    LengthMismatch { siblings: usize, positions: usize },
    #[error("invalid position at level {level}: {value} (must be 0 or 1)")]
    InvalidPositionBit { level: usize, value: u8 },
    #[error("recomputed root does not match the expected root")]
    VerificationFailure,
    #[error(transparent)]
    Merkle(#[from] MerkleError),
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

/// Outcome of a concrete root comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub fn from_bool(accepted: bool) -> Self {
        if accepted {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }

    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }

    /// Maps [`Verdict::Rejected`] to [`MembershipError::VerificationFailure`].
    pub fn into_result(self) -> Result<(), MembershipError> {
        match self {
            Verdict::Accepted => Ok(()),
            Verdict::Rejected => Err(MembershipError::VerificationFailure),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => f.write_str("accepted"),
            Verdict::Rejected => f.write_str("rejected"),
        }
    }
}

/// Operations the walk needs on its operand type besides hashing.
pub trait ValueCapability {
    /// Operand type: a field element or a wire handle.
    type Value: Clone + fmt::Debug;
    /// Result of the final equality check.
    type Outcome;

    /// Compares (or constrains) the recomputed root against the expected one.
    fn assert_equal(
        &mut self,
        computed: &Self::Value,
        expected: &Self::Value,
    ) -> Result<Self::Outcome, MembershipError>;
}

/// Order-sensitive two-to-one hash evaluated within a capability context.
pub trait Hash<C: ValueCapability + ?Sized> {
    fn hash(
        &self,
        ctx: &mut C,
        left: &C::Value,
        right: &C::Value,
    ) -> Result<C::Value, MembershipError>;
}

/// Off-domain evaluation over concrete field elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Concrete;

impl ValueCapability for Concrete {
    type Value = FieldElement;
    type Outcome = Verdict;

    fn assert_equal(
        &mut self,
        computed: &FieldElement,
        expected: &FieldElement,
    ) -> Result<Verdict, MembershipError> {
        Ok(Verdict::from_bool(computed == expected))
    }
}

impl<H: FieldHasher + ?Sized> Hash<Concrete> for H {
    fn hash(
        &self,
        _ctx: &mut Concrete,
        left: &FieldElement,
        right: &FieldElement,
    ) -> Result<FieldElement, MembershipError> {
        Ok(self.compress(left, right))
    }
}

pub(crate) fn check_path_shape<V>(siblings: &[V], positions: &[u8]) -> Result<(), MembershipError> {
    if siblings.len() != positions.len() {
        return Err(MembershipError::LengthMismatch {
            siblings: siblings.len(),
            positions: positions.len(),
        });
    }
    if let Some((level, &value)) = positions.iter().enumerate().find(|(_, &bit)| bit > 1) {
        return Err(MembershipError::InvalidPositionBit { level, value });
    }
    Ok(())
}

/// Walks from `leaf` to the root candidate.
///
/// The path shape is validated before the first hash is evaluated, so a
/// malformed path never records partial constraints.
pub fn recompute<C, H>(
    ctx: &mut C,
    leaf: &C::Value,
    siblings: &[C::Value],
    positions: &[u8],
    hash: &H,
) -> Result<C::Value, MembershipError>
where
    C: ValueCapability + ?Sized,
    H: Hash<C> + ?Sized,
{
    check_path_shape(siblings, positions)?;

    let mut needle = leaf.clone();
    for (sibling, &position) in siblings.iter().zip(positions) {
        needle = if position == 0 {
            hash.hash(ctx, &needle, sibling)?
        } else {
            hash.hash(ctx, sibling, &needle)?
        };
    }
    Ok(needle)
}

/// Recomputes the root and checks it against `expected_root`.
pub fn verify<C, H>(
    ctx: &mut C,
    leaf: &C::Value,
    siblings: &[C::Value],
    positions: &[u8],
    hash: &H,
    expected_root: &C::Value,
) -> Result<C::Outcome, MembershipError>
where
    C: ValueCapability + ?Sized,
    H: Hash<C> + ?Sized,
{
    let computed = recompute(ctx, leaf, siblings, positions, hash)?;
    ctx.assert_equal(&computed, expected_root)
}

/// Off-domain check of an [`Opening`] extracted from a tree.
pub fn verify_opening<H>(
    hasher: &H,
    leaf: &FieldElement,
    opening: &Opening,
    root: &FieldElement,
) -> Result<Verdict, MembershipError>
where
    H: FieldHasher + ?Sized,
{
    let verdict = verify(
        &mut Concrete,
        leaf,
        &opening.siblings,
        &opening.positions,
        hasher,
        root,
    )?;
    if !verdict.is_accepted() {
        debug!(height = opening.height(), "opening rejected");
    }
    Ok(verdict)
}
