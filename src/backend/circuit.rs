use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuit::{CircuitError, ConstraintId, Wire, WireKind};
use crate::field::{FieldDomain, FieldElement};
use crate::hash::config::CIRCUIT_DIGEST_DOMAIN_TAG;
use crate::hash::{FieldHasher, HashFamily, Hasher};

/// Recorded constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gate {
    /// `output == compress(left, right)` under `family`.
    Compress {
        family: HashFamily,
        left: Wire,
        right: Wire,
        output: Wire,
    },
    /// `left == right`.
    AssertEqual { left: Wire, right: Wire },
}

impl Gate {
    fn absorb_into(&self, hasher: &mut Hasher) {
        match self {
            Gate::Compress {
                family,
                left,
                right,
                output,
            } => {
                hasher.update(&[0x01, family.tag()]);
                hasher.update(&left.0.to_le_bytes());
                hasher.update(&right.0.to_le_bytes());
                hasher.update(&output.0.to_le_bytes());
            }
            Gate::AssertEqual { left, right } => {
                hasher.update(&[0x02]);
                hasher.update(&left.0.to_le_bytes());
                hasher.update(&right.0.to_le_bytes());
            }
        }
    }
}

/// Values assigned to every wire during recording, in allocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<FieldElement>,
}

impl Assignment {
    pub fn new(values: Vec<FieldElement>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[FieldElement] {
        &self.values
    }
}

/// Assignment that satisfies every gate of its circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Witness {
    values: Vec<FieldElement>,
}

impl Witness {
    pub fn values(&self) -> &[FieldElement] {
        &self.values
    }
}

/// Compiled constraint system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    domain: FieldDomain,
    kinds: Vec<WireKind>,
    public_wires: Vec<Wire>,
    gates: Vec<Gate>,
    digest: [u8; 32],
}

impl Circuit {
    pub(crate) fn new(domain: FieldDomain, kinds: Vec<WireKind>, gates: Vec<Gate>) -> Self {
        let public_wires = kinds
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == WireKind::Public)
            .map(|(index, _)| Wire(index as u32))
            .collect();
        let digest = structural_digest(&domain, &kinds, &gates);
        Self {
            domain,
            kinds,
            public_wires,
            gates,
            digest,
        }
    }

    pub fn domain(&self) -> &FieldDomain {
        &self.domain
    }

    pub fn wire_count(&self) -> usize {
        self.kinds.len()
    }

    pub fn wire_kinds(&self) -> &[WireKind] {
        &self.kinds
    }

    /// Public wires in allocation order.
    pub fn public_wires(&self) -> &[Wire] {
        &self.public_wires
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Blake2s digest over the field, wire layout and gate list.
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    /// Checks `assignment` against every gate and promotes it to a witness.
    pub fn synthesize<H>(&self, assignment: Assignment, hasher: &H) -> Result<Witness, CircuitError>
    where
        H: FieldHasher + ?Sized,
    {
        self.check_values(&assignment.values)?;
        if let Some(constraint) = self.first_violation(&assignment.values, hasher)? {
            debug!(?constraint, "witness synthesis failed");
            return Err(CircuitError::Unsatisfied { constraint });
        }
        Ok(Witness {
            values: assignment.values,
        })
    }

    /// Length and canonicality checks for a full value vector.
    pub(crate) fn check_values(&self, values: &[FieldElement]) -> Result<(), CircuitError> {
        if values.len() != self.kinds.len() {
            return Err(CircuitError::WitnessLength {
                expected: self.kinds.len(),
                got: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|value| !self.domain.contains(value)) {
            return Err(CircuitError::NonCanonical { index });
        }
        Ok(())
    }

    /// Returns the first gate not satisfied by `values`.
    ///
    /// Fails when `hasher` cannot evaluate the circuit's hash gates.
    pub(crate) fn first_violation<H>(
        &self,
        values: &[FieldElement],
        hasher: &H,
    ) -> Result<Option<ConstraintId>, CircuitError>
    where
        H: FieldHasher + ?Sized,
    {
        if hasher.domain() != &self.domain {
            return Err(CircuitError::DomainMismatch);
        }
        let fetch = |wire: &Wire| {
            values
                .get(wire.index())
                .ok_or(CircuitError::UnknownWire { wire: *wire })
        };

        for (index, gate) in self.gates.iter().enumerate() {
            let satisfied = match gate {
                Gate::Compress {
                    family,
                    left,
                    right,
                    output,
                } => {
                    if *family != hasher.family() {
                        return Err(CircuitError::HashFamilyMismatch {
                            expected: *family,
                            got: hasher.family(),
                        });
                    }
                    hasher.compress(fetch(left)?, fetch(right)?) == *fetch(output)?
                }
                Gate::AssertEqual { left, right } => fetch(left)? == fetch(right)?,
            };
            if !satisfied {
                return Ok(Some(ConstraintId(index as u32)));
            }
        }
        Ok(None)
    }
}

fn structural_digest(domain: &FieldDomain, kinds: &[WireKind], gates: &[Gate]) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(CIRCUIT_DIGEST_DOMAIN_TAG);
    let modulus = domain.modulus().to_bytes_le();
    hasher.update(&(modulus.len() as u32).to_le_bytes());
    hasher.update(&modulus);
    hasher.update(&(kinds.len() as u32).to_le_bytes());
    for kind in kinds {
        hasher.update(&[kind.tag()]);
    }
    hasher.update(&(gates.len() as u32).to_le_bytes());
    for gate in gates {
        gate.absorb_into(&mut hasher);
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Recording;
    use crate::circuit::ConstraintEnvironment;
    use crate::hash::{Blake2sFieldHasher, Sha256FieldHasher};

    fn record(values: [u64; 3]) -> (Circuit, Assignment) {
        let hasher = Sha256FieldHasher::new(FieldDomain::bn254());
        let domain = hasher.domain().clone();
        let mut recording = Recording::begin(domain.clone());
        let a = recording.allocate_private(domain.reduce(values[0])).unwrap();
        let b = recording.allocate_private(domain.reduce(values[1])).unwrap();
        let expected = recording.allocate_public(domain.reduce(values[2])).unwrap();
        let out = recording.compress(&hasher, a, b).unwrap();
        recording.assert_equal(out, expected).unwrap();
        recording.compile()
    }

    #[test]
    fn digest_ignores_values() {
        let (first, _) = record([1, 2, 3]);
        let (second, _) = record([4, 5, 6]);
        assert_eq!(first.digest(), second.digest());
        assert_eq!(first.public_wires(), &[Wire(2)]);
    }

    #[test]
    fn unsatisfied_assignment_fails_synthesis() {
        let (circuit, assignment) = record([1, 2, 3]);
        let hasher = Sha256FieldHasher::new(FieldDomain::bn254());
        let err = circuit.synthesize(assignment, &hasher).unwrap_err();
        assert_eq!(
            err,
            CircuitError::Unsatisfied {
                constraint: ConstraintId(1)
            }
        );
    }

    #[test]
    fn evaluation_requires_matching_family() {
        let (circuit, assignment) = record([1, 2, 3]);
        let other = Blake2sFieldHasher::new(FieldDomain::bn254());
        let err = circuit.synthesize(assignment, &other).unwrap_err();
        assert_eq!(
            err,
            CircuitError::HashFamilyMismatch {
                expected: HashFamily::Sha256,
                got: HashFamily::Blake2s
            }
        );
    }
}
