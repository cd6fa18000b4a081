use tracing::trace;

use super::circuit::{Assignment, Circuit, Gate};
use crate::circuit::{CircuitError, ConstraintEnvironment, ConstraintId, Wire, WireKind};
use crate::field::{FieldDomain, FieldElement};
use crate::hash::FieldHasher;

/// Open recording session.  Consumed by [`Recording::compile`].
#[derive(Debug, Clone)]
pub struct Recording {
    domain: FieldDomain,
    kinds: Vec<WireKind>,
    values: Vec<FieldElement>,
    gates: Vec<Gate>,
}

impl Recording {
    /// Starts recording constraints over `domain`.
    pub fn begin(domain: FieldDomain) -> Self {
        trace!("constraint recording started");
        Self {
            domain,
            kinds: Vec::new(),
            values: Vec::new(),
            gates: Vec::new(),
        }
    }

    pub fn domain(&self) -> &FieldDomain {
        &self.domain
    }

    /// Value currently assigned to `wire`.
    pub fn value(&self, wire: Wire) -> Option<&FieldElement> {
        self.values.get(wire.index())
    }

    pub fn wire_count(&self) -> usize {
        self.kinds.len()
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Freezes the recorded gates into a circuit and returns the values
    /// assigned during recording.
    pub fn compile(self) -> (Circuit, Assignment) {
        let circuit = Circuit::new(self.domain, self.kinds, self.gates);
        trace!(
            wires = circuit.wire_count(),
            gates = circuit.gates().len(),
            "constraint recording compiled"
        );
        (circuit, Assignment::new(self.values))
    }

    fn push_wire(&mut self, kind: WireKind, value: FieldElement) -> Result<Wire, CircuitError> {
        let index = self.kinds.len();
        if !self.domain.contains(&value) {
            return Err(CircuitError::NonCanonical { index });
        }
        let handle = u32::try_from(index).map_err(|_| CircuitError::CapacityExceeded)?;
        self.kinds.push(kind);
        self.values.push(value);
        Ok(Wire(handle))
    }

    fn push_gate(&mut self, gate: Gate) -> Result<ConstraintId, CircuitError> {
        let id = u32::try_from(self.gates.len()).map_err(|_| CircuitError::CapacityExceeded)?;
        self.gates.push(gate);
        Ok(ConstraintId(id))
    }

    fn lookup(&self, wire: Wire) -> Result<&FieldElement, CircuitError> {
        self.values
            .get(wire.index())
            .ok_or(CircuitError::UnknownWire { wire })
    }
}

impl ConstraintEnvironment for Recording {
    fn allocate_private(&mut self, value: FieldElement) -> Result<Wire, CircuitError> {
        self.push_wire(WireKind::Private, value)
    }

    fn allocate_public(&mut self, value: FieldElement) -> Result<Wire, CircuitError> {
        self.push_wire(WireKind::Public, value)
    }

    fn assert_equal(&mut self, a: Wire, b: Wire) -> Result<ConstraintId, CircuitError> {
        self.lookup(a)?;
        self.lookup(b)?;
        self.push_gate(Gate::AssertEqual { left: a, right: b })
    }

    fn compress<H>(&mut self, hasher: &H, left: Wire, right: Wire) -> Result<Wire, CircuitError>
    where
        H: FieldHasher + ?Sized,
    {
        if hasher.domain() != &self.domain {
            return Err(CircuitError::DomainMismatch);
        }
        let value = hasher.compress(self.lookup(left)?, self.lookup(right)?);
        let output = self.push_wire(WireKind::Internal, value)?;
        self.push_gate(Gate::Compress {
            family: hasher.family(),
            left,
            right,
            output,
        })?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha256FieldHasher;

    #[test]
    fn compress_records_gate_and_value() {
        let hasher = Sha256FieldHasher::new(FieldDomain::bn254());
        let domain = hasher.domain().clone();
        let mut recording = Recording::begin(domain.clone());
        let a = recording.allocate_private(domain.reduce(1u8)).unwrap();
        let b = recording.allocate_private(domain.reduce(2u8)).unwrap();
        let out = recording.compress(&hasher, a, b).unwrap();
        assert_eq!(recording.wire_count(), 3);
        assert_eq!(recording.gate_count(), 1);
        assert_eq!(
            recording.value(out).unwrap(),
            &hasher.compress(&domain.reduce(1u8), &domain.reduce(2u8))
        );
    }

    #[test]
    fn foreign_wires_and_domains_rejected() {
        let domain = FieldDomain::bn254();
        let mut recording = Recording::begin(domain.clone());
        let a = recording.allocate_public(domain.reduce(1u8)).unwrap();
        let err = recording.assert_equal(a, Wire(9)).unwrap_err();
        assert_eq!(err, CircuitError::UnknownWire { wire: Wire(9) });

        let other = Sha256FieldHasher::new(FieldDomain::goldilocks());
        let err = recording.compress(&other, a, a).unwrap_err();
        assert_eq!(err, CircuitError::DomainMismatch);
    }

    #[test]
    fn non_canonical_allocation_rejected() {
        let domain = FieldDomain::goldilocks();
        let mut recording = Recording::begin(domain.clone());
        let too_big = FieldElement(domain.modulus().clone());
        let err = recording.allocate_private(too_big).unwrap_err();
        assert_eq!(err, CircuitError::NonCanonical { index: 0 });
    }
}
