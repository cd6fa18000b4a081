#![cfg(feature = "parallel")]

use rpp_merkle::merkle::MerkleTree;
use rpp_merkle::params::{BuiltinProfile, MembershipParamsBuilder};
use rpp_merkle::utils::set_parallelism;

#[test]
fn merkle_parallel_matches_sequential() {
    for profile in BuiltinProfile::ALL {
        let hasher = MembershipParamsBuilder::from_profile(profile)
            .build()
            .expect("params")
            .hasher()
            .expect("hasher");
        let leaves: Vec<u64> = (0..1_000u64).map(|i| i.wrapping_mul(31) ^ 0x5a5a).collect();

        let baseline = {
            let _guard = set_parallelism(false);
            MerkleTree::build(leaves.iter().copied(), &hasher).expect("sequential build")
        };
        let parallel = {
            let _guard = set_parallelism(true);
            MerkleTree::build(leaves.iter().copied(), &hasher).expect("parallel build")
        };
        assert_eq!(baseline, parallel, "{profile:?}");
    }
}

#[test]
fn batch_openings_match_single_openings() {
    let hasher = MembershipParamsBuilder::new()
        .build()
        .expect("params")
        .hasher()
        .expect("hasher");
    let tree = MerkleTree::build(0u64..257, &hasher).expect("tree");
    let indices: Vec<usize> = (0..257).rev().step_by(3).collect();

    let sequential = {
        let _guard = set_parallelism(false);
        tree.openings(&indices).expect("sequential openings")
    };
    let parallel = {
        let _guard = set_parallelism(true);
        tree.openings(&indices).expect("parallel openings")
    };
    assert_eq!(sequential, parallel);
    for (opening, &index) in parallel.iter().zip(&indices) {
        assert_eq!(opening, &tree.opening(index).unwrap());
    }
}
