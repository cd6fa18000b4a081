use super::types::{FieldKind, HashKind};
use super::{MembershipParams, ParamsError};
use crate::hash::PoseidonParameters;

/// Builder used to assemble [`MembershipParams`] with validation.
///
/// | Field | Default |
/// |-------|---------|
/// | `params_version` | `1` |
/// | `field` | [`FieldKind::Bn254`] |
/// | `hash` | [`HashKind::Sha256`] |
/// | `parallel` | `true` |
#[derive(Debug, Clone)]
pub struct MembershipParamsBuilder {
    pub params_version: u16,
    pub field: FieldKind,
    pub hash: HashKind,
    pub parallel: bool,
}

impl MembershipParamsBuilder {
    /// Returns a builder initialised with the SHA-256/BN254 profile.
    pub fn new() -> Self {
        Self::from_profile(BuiltinProfile::PROFILE_BN254_SHA256)
    }

    /// Loads one of the built-in profiles.
    ///
    /// | Profile | Field | Hash |
    /// |---------|-------|------|
    /// | `PROFILE_BN254_SHA256` | BN254 | SHA-256 over 32-byte big-endian operands |
    /// | `PROFILE_BN254_POSEIDON` | BN254 | Poseidon, width 3, `x^5` |
    /// | `PROFILE_GOLDILOCKS_BLAKE2S` | Goldilocks | Blake2s |
    pub fn from_profile(profile: BuiltinProfile) -> Self {
        let (field, hash) = match profile {
            BuiltinProfile::PROFILE_BN254_SHA256 => (FieldKind::Bn254, HashKind::Sha256),
            BuiltinProfile::PROFILE_BN254_POSEIDON => (
                FieldKind::Bn254,
                HashKind::Poseidon {
                    parameters: PoseidonParameters::v1(),
                },
            ),
            BuiltinProfile::PROFILE_GOLDILOCKS_BLAKE2S => {
                (FieldKind::Goldilocks, HashKind::Blake2s)
            }
        };
        MembershipParamsBuilder {
            params_version: MembershipParams::VERSION,
            field,
            hash,
            parallel: true,
        }
    }

    pub fn field(mut self, field: FieldKind) -> Self {
        self.field = field;
        self
    }

    pub fn hash(mut self, hash: HashKind) -> Self {
        self.hash = hash;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the builder fields and emits a [`MembershipParams`] instance.
    pub fn build(&self) -> Result<MembershipParams, ParamsError> {
        MembershipParams::try_from_builder(self)
    }
}

impl Default for MembershipParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Supported built-in profiles.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinProfile {
    /// Byte-hash tree over BN254; the off-domain reference configuration.
    PROFILE_BN254_SHA256,
    /// Arithmetic sponge over BN254 for constraint-friendly trees.
    PROFILE_BN254_POSEIDON,
    /// Blake2s over the 64-bit Goldilocks field.
    PROFILE_GOLDILOCKS_BLAKE2S,
}

impl BuiltinProfile {
    pub const ALL: [BuiltinProfile; 3] = [
        BuiltinProfile::PROFILE_BN254_SHA256,
        BuiltinProfile::PROFILE_BN254_POSEIDON,
        BuiltinProfile::PROFILE_GOLDILOCKS_BLAKE2S,
    ];

    /// Short name accepted on command lines.
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinProfile::PROFILE_BN254_SHA256 => "bn254-sha256",
            BuiltinProfile::PROFILE_BN254_POSEIDON => "bn254-poseidon",
            BuiltinProfile::PROFILE_GOLDILOCKS_BLAKE2S => "goldilocks-blake2s",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|profile| profile.name() == name)
    }
}
