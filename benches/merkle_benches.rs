use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rpp_merkle::merkle::MerkleTree;
use rpp_merkle::params::{BuiltinProfile, MembershipParamsBuilder};
use rpp_merkle::proof::{prove_membership, verify_membership};
use rpp_merkle::AnyHasher;

fn hasher_for(profile: BuiltinProfile) -> AnyHasher {
    MembershipParamsBuilder::from_profile(profile)
        .build()
        .expect("valid params")
        .hasher()
        .expect("hasher")
}

fn make_leaves(count: usize) -> Vec<u128> {
    (0..count as u128)
        .map(|i| i.wrapping_mul(0x9e37_79b9_7f4a_7c15_f39c_c060_5ced_c835))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    for profile in BuiltinProfile::ALL {
        let hasher = hasher_for(profile);
        let mut group = c.benchmark_group(format!("build_{}", profile.name()));
        for &size in &[256usize, 4_096] {
            let leaves = make_leaves(size);
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::from_parameter(size), &leaves, |b, leaves| {
                b.iter(|| MerkleTree::build(leaves.iter().copied(), &hasher).unwrap());
            });
        }
        group.finish();
    }
}

fn bench_openings(c: &mut Criterion) {
    let hasher = hasher_for(BuiltinProfile::PROFILE_BN254_SHA256);
    let tree = MerkleTree::build(make_leaves(16_384), &hasher).expect("tree");
    let indices: Vec<usize> = (0..tree.leaf_count()).step_by(7).collect();
    let mut group = c.benchmark_group("openings");
    group.throughput(Throughput::Elements(indices.len() as u64));
    group.bench_function("batch", |b| b.iter(|| tree.openings(&indices).unwrap()));
    group.finish();
}

fn bench_membership_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership_proof");
    for profile in [
        BuiltinProfile::PROFILE_BN254_SHA256,
        BuiltinProfile::PROFILE_BN254_POSEIDON,
    ] {
        let hasher = hasher_for(profile);
        let tree = MerkleTree::build(make_leaves(1_024), &hasher).expect("tree");
        let index = 517;
        let leaf = tree.leaves()[index].clone();
        let opening = tree.opening(index).expect("opening");
        let proof = prove_membership(&hasher, &leaf, &opening, tree.root()).expect("proof");

        group.bench_function(BenchmarkId::new("prove", profile.name()), |b| {
            b.iter(|| prove_membership(&hasher, &leaf, &opening, tree.root()).unwrap())
        });
        group.bench_function(BenchmarkId::new("verify", profile.name()), |b| {
            b.iter(|| verify_membership(&hasher, tree.root(), &proof).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_openings, bench_membership_proof);
criterion_main!(benches);
