use tracing::debug;

use super::circuit::Circuit;
use super::prover::TransparentProof;
use crate::circuit::{CircuitError, WireKind};
use crate::field::FieldElement;
use crate::hash::FieldHasher;
use crate::membership::Verdict;

/// Re-evaluates a [`Circuit`] against a [`TransparentProof`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TransparentVerifier;

impl TransparentVerifier {
    /// Checks `proof` for `circuit` under the verifier's own `public_inputs`.
    ///
    /// Errors report a mismatch between the caller's setup and the circuit
    /// (public input arity, hash family, field).  Anything the prover controls
    /// that does not check out yields [`Verdict::Rejected`].
    pub fn verify<H>(
        &self,
        circuit: &Circuit,
        public_inputs: &[FieldElement],
        proof: &TransparentProof,
        hasher: &H,
    ) -> Result<Verdict, CircuitError>
    where
        H: FieldHasher + ?Sized,
    {
        let expected_public = circuit.public_wires().len();
        if public_inputs.len() != expected_public {
            return Err(CircuitError::PublicInputCount {
                expected: expected_public,
                got: public_inputs.len(),
            });
        }
        if hasher.domain() != circuit.domain() {
            return Err(CircuitError::DomainMismatch);
        }

        if &proof.circuit_digest != circuit.digest() {
            debug!("proof bound to a different circuit");
            return Ok(Verdict::Rejected);
        }
        if proof.public_inputs != public_inputs {
            debug!("proof public inputs differ from the verifier's");
            return Ok(Verdict::Rejected);
        }
        let expected_private = circuit.wire_count() - expected_public;
        if proof.private_values.len() != expected_private {
            debug!(
                expected = expected_private,
                got = proof.private_values.len(),
                "proof carries the wrong number of private values"
            );
            return Ok(Verdict::Rejected);
        }

        let mut public = public_inputs.iter();
        let mut private = proof.private_values.iter();
        let mut values = Vec::with_capacity(circuit.wire_count());
        for kind in circuit.wire_kinds() {
            let next = match kind {
                WireKind::Public => public.next(),
                WireKind::Private | WireKind::Internal => private.next(),
            };
            match next {
                Some(value) => values.push(value.clone()),
                None => return Ok(Verdict::Rejected),
            }
        }

        if values.iter().any(|value| !circuit.domain().contains(value)) {
            debug!("proof carries a non-canonical value");
            return Ok(Verdict::Rejected);
        }

        match circuit.first_violation(&values, hasher)? {
            Some(constraint) => {
                debug!(?constraint, "proof violates a constraint");
                Ok(Verdict::Rejected)
            }
            None => Ok(Verdict::Accepted),
        }
    }
}
