use proptest::prelude::*;
use rpp_merkle::backend::{Recording, TransparentProver, TransparentVerifier};
use rpp_merkle::circuit::ConstraintEnvironment;
use rpp_merkle::field::{FieldDomain, FieldElement};
use rpp_merkle::hash::{FieldHasher, Sha256FieldHasher};
use rpp_merkle::membership::{
    recompute, verify, Concrete, MembershipError, Symbolic, ValueCapability, Verdict,
};
use rpp_merkle::merkle::MerkleTree;

fn hasher() -> Sha256FieldHasher {
    Sha256FieldHasher::new(FieldDomain::bn254())
}

#[test]
fn symbolic_walk_matches_concrete_walk() {
    let hasher = hasher();
    let tree = MerkleTree::build(10u64..17, &hasher).expect("tree");
    let index = 6;
    let opening = tree.opening(index).expect("opening");
    let leaf = tree.leaves()[index].clone();

    let concrete = recompute(
        &mut Concrete,
        &leaf,
        &opening.siblings,
        &opening.positions,
        &hasher,
    )
    .unwrap();
    assert_eq!(&concrete, tree.root());

    let mut recording = Recording::begin(hasher.domain().clone());
    let leaf_wire = recording.allocate_private(leaf).unwrap();
    let sibling_wires: Vec<_> = opening
        .siblings
        .iter()
        .map(|sibling| recording.allocate_private(sibling.clone()).unwrap())
        .collect();
    let root_wire = recording.allocate_public(tree.root().clone()).unwrap();
    let computed = {
        let mut ctx = Symbolic::new(&mut recording);
        let computed =
            recompute(&mut ctx, &leaf_wire, &sibling_wires, &opening.positions, &hasher).unwrap();
        ctx.assert_equal(&computed, &root_wire).unwrap();
        computed
    };
    assert_eq!(recording.value(computed), Some(tree.root()));

    let (circuit, assignment) = recording.compile();
    let witness = circuit.synthesize(assignment, &hasher).expect("witness");
    let proof = TransparentProver.prove(&circuit, &witness).unwrap();
    let verdict = TransparentVerifier
        .verify(&circuit, &[tree.root().clone()], &proof, &hasher)
        .unwrap();
    assert_eq!(verdict, Verdict::Accepted);
}

#[test]
fn symbolic_shape_errors_record_nothing() {
    let hasher = hasher();
    let mut recording = Recording::begin(hasher.domain().clone());
    let leaf = recording.allocate_private(FieldElement::zero()).unwrap();
    let sibling = recording.allocate_private(FieldElement::zero()).unwrap();
    let err = {
        let mut ctx = Symbolic::new(&mut recording);
        verify(&mut ctx, &leaf, &[sibling], &[3], &hasher, &leaf).unwrap_err()
    };
    assert_eq!(err, MembershipError::InvalidPositionBit { level: 0, value: 3 });
    assert_eq!(recording.gate_count(), 0);
}

fn tree_and_index() -> impl Strategy<Value = (Vec<u128>, usize)> {
    prop::collection::vec(any::<u128>(), 1..24).prop_flat_map(|leaves| {
        let len = leaves.len();
        (Just(leaves), 0..len)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_opening_verifies((leaves, index) in tree_and_index()) {
        let hasher = hasher();
        let tree = MerkleTree::build(leaves.iter().copied(), &hasher).unwrap();
        let opening = tree.opening(index).unwrap();
        let verdict = verify(
            &mut Concrete,
            &tree.leaves()[index],
            &opening.siblings,
            &opening.positions,
            &hasher,
            tree.root(),
        ).unwrap();
        prop_assert_eq!(verdict, Verdict::Accepted);
    }

    #[test]
    fn tampered_sibling_is_rejected(
        (leaves, index) in tree_and_index(),
        level_seed in any::<usize>(),
        delta in 1u64..1_000,
    ) {
        let hasher = hasher();
        let domain = hasher.domain().clone();
        let tree = MerkleTree::build(leaves.iter().copied(), &hasher).unwrap();
        let mut opening = tree.opening(index).unwrap();
        prop_assume!(!opening.is_empty());

        let level = level_seed % opening.height();
        let bumped = domain.add(&opening.siblings[level], &domain.reduce(delta));
        opening.siblings[level] = bumped;
        let verdict = verify(
            &mut Concrete,
            &tree.leaves()[index],
            &opening.siblings,
            &opening.positions,
            &hasher,
            tree.root(),
        ).unwrap();
        prop_assert_eq!(verdict, Verdict::Rejected);
    }

    #[test]
    fn foreign_leaf_is_rejected((leaves, index) in tree_and_index(), delta in 1u64..1_000) {
        let hasher = hasher();
        let domain = hasher.domain().clone();
        let tree = MerkleTree::build(leaves.iter().copied(), &hasher).unwrap();
        let opening = tree.opening(index).unwrap();
        let leaf = domain.add(&tree.leaves()[index], &domain.reduce(delta));
        let verdict = verify(
            &mut Concrete,
            &leaf,
            &opening.siblings,
            &opening.positions,
            &hasher,
            tree.root(),
        ).unwrap();
        prop_assert_eq!(verdict, Verdict::Rejected);
    }
}
