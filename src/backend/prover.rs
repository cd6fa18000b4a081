use serde::{Deserialize, Serialize};
use tracing::debug;

use super::circuit::{Circuit, Witness};
use crate::circuit::{CircuitError, WireKind};
use crate::field::FieldElement;

/// Proof emitted by the transparent backend.
///
/// `private_values` lists every non-public wire value in allocation order, so
/// the proof is exactly as private as the witness it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparentProof {
    pub circuit_digest: [u8; 32],
    pub public_inputs: Vec<FieldElement>,
    pub private_values: Vec<FieldElement>,
}

/// Packages a synthesized witness as a [`TransparentProof`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TransparentProver;

impl TransparentProver {
    pub fn prove(
        &self,
        circuit: &Circuit,
        witness: &Witness,
    ) -> Result<TransparentProof, CircuitError> {
        circuit.check_values(witness.values())?;

        let mut public_inputs = Vec::with_capacity(circuit.public_wires().len());
        let mut private_values = Vec::with_capacity(circuit.wire_count());
        for (kind, value) in circuit.wire_kinds().iter().zip(witness.values()) {
            match kind {
                WireKind::Public => public_inputs.push(value.clone()),
                WireKind::Private | WireKind::Internal => private_values.push(value.clone()),
            }
        }

        debug!(
            public = public_inputs.len(),
            private = private_values.len(),
            gates = circuit.gates().len(),
            "transparent proof assembled"
        );
        Ok(TransparentProof {
            circuit_digest: *circuit.digest(),
            public_inputs,
            private_values,
        })
    }
}
