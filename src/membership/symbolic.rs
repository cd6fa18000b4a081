use crate::circuit::{ConstraintEnvironment, ConstraintId, Wire};
use crate::hash::FieldHasher;

use super::{Hash, MembershipError, ValueCapability};

/// Evaluates the membership walk over wires of a constraint environment.
///
/// Hashes become recorded gates and the final comparison becomes an equality
/// constraint; nothing is decided at recording time.
pub struct Symbolic<'e, E: ConstraintEnvironment + ?Sized> {
    env: &'e mut E,
}

impl<'e, E: ConstraintEnvironment + ?Sized> Symbolic<'e, E> {
    pub fn new(env: &'e mut E) -> Self {
        Self { env }
    }

    /// Mutable access to the wrapped environment.
    pub fn env(&mut self) -> &mut E {
        self.env
    }
}

impl<E: ConstraintEnvironment + ?Sized> ValueCapability for Symbolic<'_, E> {
    type Value = Wire;
    type Outcome = ConstraintId;

    fn assert_equal(
        &mut self,
        computed: &Wire,
        expected: &Wire,
    ) -> Result<ConstraintId, MembershipError> {
        Ok(self.env.assert_equal(*computed, *expected)?)
    }
}

impl<'e, E, H> Hash<Symbolic<'e, E>> for H
where
    E: ConstraintEnvironment + ?Sized,
    H: FieldHasher + ?Sized,
{
    fn hash(
        &self,
        ctx: &mut Symbolic<'e, E>,
        left: &Wire,
        right: &Wire,
    ) -> Result<Wire, MembershipError> {
        Ok(ctx.env.compress(self, *left, *right)?)
    }
}
