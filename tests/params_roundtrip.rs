use proptest::prelude::*;
use rpp_merkle::field::{FieldError, GOLDILOCKS_MODULUS};
use rpp_merkle::hash::poseidon::PoseidonError;
use rpp_merkle::hash::{FieldHasher, HashFamily, PoseidonParameters};
use rpp_merkle::params::{
    params_hash, BuiltinProfile, FieldKind, HashKind, MembershipParams, MembershipParamsBuilder,
    ParamsError,
};

fn arb_params() -> impl Strategy<Value = MembershipParams> {
    (
        prop::sample::select(BuiltinProfile::ALL.to_vec()),
        any::<bool>(),
        prop_oneof![Just(None), Just(Some(HashKind::Sha256)), Just(Some(HashKind::Blake2s))],
    )
        .prop_map(|(profile, parallel, hash)| {
            let mut builder = MembershipParamsBuilder::from_profile(profile).parallel(parallel);
            if let Some(hash) = hash {
                builder = builder.hash(hash);
            }
            builder.build().expect("valid params")
        })
}

proptest! {
    #[test]
    fn json_roundtrip_preserves_params(params in arb_params()) {
        let json = params.to_json().expect("encode");
        let decoded = MembershipParams::from_json(&json).expect("decode");
        prop_assert_eq!(&decoded, &params);
        prop_assert_eq!(params_hash(&decoded), params_hash(&params));
    }
}

#[test]
fn profiles_materialise_expected_hashers() {
    let expectations = [
        (BuiltinProfile::PROFILE_BN254_SHA256, HashFamily::Sha256, 32),
        (BuiltinProfile::PROFILE_BN254_POSEIDON, HashFamily::Poseidon, 32),
        (BuiltinProfile::PROFILE_GOLDILOCKS_BLAKE2S, HashFamily::Blake2s, 8),
    ];
    for (profile, family, element_bytes) in expectations {
        let params = MembershipParamsBuilder::from_profile(profile).build().unwrap();
        let hasher = params.hasher().unwrap();
        assert_eq!(hasher.family(), family);
        assert_eq!(hasher.domain().element_bytes(), element_bytes);
        assert_eq!(BuiltinProfile::from_name(profile.name()), Some(profile));
    }
}

#[test]
fn params_hash_separates_profiles_but_ignores_parallelism() {
    let digests: Vec<[u8; 32]> = BuiltinProfile::ALL
        .iter()
        .map(|&profile| {
            params_hash(&MembershipParamsBuilder::from_profile(profile).build().unwrap())
        })
        .collect();
    assert_ne!(digests[0], digests[1]);
    assert_ne!(digests[1], digests[2]);
    assert_ne!(digests[0], digests[2]);

    let sequential = MembershipParamsBuilder::new().parallel(false).build().unwrap();
    assert_eq!(params_hash(&sequential), digests[0]);
}

#[test]
fn custom_prime_field_is_accepted() {
    let params = MembershipParamsBuilder::new()
        .field(FieldKind::Custom {
            modulus: GOLDILOCKS_MODULUS.to_string(),
        })
        .build()
        .expect("prime modulus");
    assert_eq!(
        params.domain().unwrap().modulus(),
        rpp_merkle::field::FieldDomain::goldilocks().modulus()
    );
}

#[test]
fn composite_modulus_rejected() {
    let err = MembershipParamsBuilder::new()
        .field(FieldKind::Custom {
            modulus: "1000000".to_string(),
        })
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ParamsError::Field(FieldError::ModulusNotPrime { .. })
    ));
}

#[test]
fn poseidon_alpha_checked_against_field() {
    let err = MembershipParamsBuilder::from_profile(BuiltinProfile::PROFILE_GOLDILOCKS_BLAKE2S)
        .hash(HashKind::Poseidon {
            parameters: PoseidonParameters::v1(),
        })
        .build()
        .unwrap_err();
    assert_eq!(err, ParamsError::Poseidon(PoseidonError::InvalidAlpha { alpha: 5 }));
}

#[test]
fn json_documents_are_validated() {
    let json = r#"{
        "params_version": 2,
        "field": { "kind": "bn254" },
        "hash": { "family": "sha256" }
    }"#;
    assert_eq!(
        MembershipParams::from_json(json).unwrap_err(),
        ParamsError::UnsupportedVersion {
            expected: 1,
            got: 2
        }
    );

    let json = r#"{
        "params_version": 1,
        "field": { "kind": "goldilocks" },
        "hash": { "family": "blake2s" }
    }"#;
    let params = MembershipParams::from_json(json).expect("defaults apply");
    assert!(params.parallel());

    let err = MembershipParams::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ParamsError::Json { .. }));
}

#[test]
fn oversized_poseidon_documents_are_rejected_without_panicking() {
    let overflowing = r#"{
        "params_version": 1,
        "field": { "kind": "bn254" },
        "hash": {
            "family": "poseidon",
            "parameters": {
                "id": "overflow",
                "full_rounds": 8,
                "partial_rounds": 18446744073709551615,
                "width": 3,
                "alpha": 5
            }
        }
    }"#;
    let err = MembershipParams::from_json(overflowing).unwrap_err();
    assert!(matches!(
        err,
        ParamsError::Poseidon(PoseidonError::TooManyRounds { full: 8, .. })
    ));

    let wide = r#"{
        "params_version": 1,
        "field": { "kind": "bn254" },
        "hash": {
            "family": "poseidon",
            "parameters": {
                "id": "wide",
                "full_rounds": 8,
                "partial_rounds": 57,
                "width": 1000000,
                "alpha": 5
            }
        }
    }"#;
    assert_eq!(
        MembershipParams::from_json(wide).unwrap_err(),
        ParamsError::Poseidon(PoseidonError::InvalidWidth(1_000_000))
    );
}
