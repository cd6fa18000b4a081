use tracing::{debug, info_span};

use super::types::MembershipProof;
use crate::backend::{Recording, TransparentProver, TransparentVerifier};
use crate::circuit::{ConstraintEnvironment, ConstraintId};
use crate::field::FieldElement;
use crate::hash::FieldHasher;
use crate::membership::{check_path_shape, verify, MembershipError, Symbolic, Verdict};
use crate::merkle::Opening;

/// Records the membership relation into `env`.
///
/// Allocation order is fixed: the leaf, then the siblings leaf level first
/// (all private), then the root (public).  Returns the identifier of the
/// final root equality constraint.  A malformed path is rejected before any
/// wire is allocated.
pub fn record_membership_circuit<E, H>(
    env: &mut E,
    hasher: &H,
    leaf: FieldElement,
    siblings: &[FieldElement],
    positions: &[u8],
    root: FieldElement,
) -> Result<ConstraintId, MembershipError>
where
    E: ConstraintEnvironment + ?Sized,
    H: FieldHasher + ?Sized,
{
    check_path_shape(siblings, positions)?;

    let leaf = env.allocate_private(leaf)?;
    let siblings = siblings
        .iter()
        .map(|sibling| env.allocate_private(sibling.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    let root = env.allocate_public(root)?;

    let mut ctx = Symbolic::new(env);
    verify(&mut ctx, &leaf, &siblings, positions, hasher, &root)
}

/// Proves that `leaf` opens to `root` along `opening`.
///
/// Fails with [`CircuitError::Unsatisfied`](crate::circuit::CircuitError::Unsatisfied)
/// (wrapped in [`MembershipError::Circuit`]) when the opening does not
/// actually lead to `root`.
pub fn prove_membership<H>(
    hasher: &H,
    leaf: &FieldElement,
    opening: &Opening,
    root: &FieldElement,
) -> Result<MembershipProof, MembershipError>
where
    H: FieldHasher + ?Sized,
{
    let _span = info_span!("prove_membership", height = opening.height()).entered();

    let mut recording = Recording::begin(hasher.domain().clone());
    record_membership_circuit(
        &mut recording,
        hasher,
        leaf.clone(),
        &opening.siblings,
        &opening.positions,
        root.clone(),
    )?;
    let (circuit, assignment) = recording.compile();
    let witness = circuit.synthesize(assignment, hasher)?;
    let proof = TransparentProver.prove(&circuit, &witness)?;

    debug!(gates = circuit.gates().len(), "membership proof produced");
    Ok(MembershipProof {
        positions: opening.positions.clone(),
        proof,
    })
}

/// Verifies a [`MembershipProof`] against the verifier's own `root`.
///
/// The expected circuit is re-recorded from the proof's positions with zero
/// placeholders for the private wires; the structural digest excludes values
/// so it matches the prover's circuit exactly when the shape agrees.
pub fn verify_membership<H>(
    hasher: &H,
    root: &FieldElement,
    proof: &MembershipProof,
) -> Result<Verdict, MembershipError>
where
    H: FieldHasher + ?Sized,
{
    let _span = info_span!("verify_membership", height = proof.height()).entered();

    let placeholders = vec![FieldElement::zero(); proof.positions.len()];
    let mut recording = Recording::begin(hasher.domain().clone());
    record_membership_circuit(
        &mut recording,
        hasher,
        FieldElement::zero(),
        &placeholders,
        &proof.positions,
        root.clone(),
    )?;
    let (circuit, _) = recording.compile();

    let verdict =
        TransparentVerifier.verify(&circuit, std::slice::from_ref(root), &proof.proof, hasher)?;
    debug!(%verdict, "membership proof checked");
    Ok(verdict)
}
