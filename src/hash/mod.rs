//! Two-to-one compression functions over field elements.
//!
//! Every Merkle node and every in-circuit hash gate goes through the
//! [`FieldHasher`] contract.  Three families are provided:
//!
//! * [`sha256`]: byte-oriented SHA-256 compression reduced into the field.
//!   With the BN254 domain it reproduces the reference off-domain tree.
//! * [`deterministic`]: Blake2s compression plus the Blake2s pseudo-XOF used
//!   to derive constants and circuit digests.
//! * [`poseidon`]: an arithmetic sponge whose rounds are expressed purely in
//!   field operations, the shape used inside constraint systems.
//!
//! Hashers own their [`FieldDomain`]; outputs are always canonical elements of
//! that domain.  Operand order is significant for every family.

pub mod config;
pub mod deterministic;
pub mod poseidon;
pub mod sha256;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{FieldDomain, FieldElement};

pub use config::{
    PoseidonParameters, BLAKE2S_NODE_DOMAIN_TAG, POSEIDON_ARITHMETIC_DOMAIN_TAG,
    POSEIDON_PARAMETERS_V1_ID,
};
pub use deterministic::{hash, Blake2sFieldHasher, Blake2sXof, Hasher};
pub use poseidon::{PoseidonHasher, PoseidonState};
pub use sha256::Sha256FieldHasher;

/// Identifies a compression family.  Recorded inside circuits so a verifier
/// can refuse to evaluate gates with a different hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashFamily {
    Sha256,
    Blake2s,
    Poseidon,
}

impl HashFamily {
    /// Stable single-byte tag used in structural digests.
    pub const fn tag(self) -> u8 {
        match self {
            HashFamily::Sha256 => 1,
            HashFamily::Blake2s => 2,
            HashFamily::Poseidon => 3,
        }
    }

    /// Lower-case identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            HashFamily::Sha256 => "sha256",
            HashFamily::Blake2s => "blake2s",
            HashFamily::Poseidon => "poseidon",
        }
    }
}

impl fmt::Display for HashFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deterministic, order-sensitive compression of two field elements.
pub trait FieldHasher: Send + Sync {
    /// Family identifier.
    fn family(&self) -> HashFamily;

    /// Domain the inputs and outputs live in.
    fn domain(&self) -> &FieldDomain;

    /// Compresses `(left, right)` into a single element.
    fn compress(&self, left: &FieldElement, right: &FieldElement) -> FieldElement;
}

/// Runtime-selected hasher built from configuration.
#[derive(Debug, Clone)]
pub enum AnyHasher {
    Sha256(Sha256FieldHasher),
    Blake2s(Blake2sFieldHasher),
    Poseidon(PoseidonHasher),
}

impl FieldHasher for AnyHasher {
    fn family(&self) -> HashFamily {
        match self {
            AnyHasher::Sha256(inner) => inner.family(),
            AnyHasher::Blake2s(inner) => inner.family(),
            AnyHasher::Poseidon(inner) => inner.family(),
        }
    }

    fn domain(&self) -> &FieldDomain {
        match self {
            AnyHasher::Sha256(inner) => inner.domain(),
            AnyHasher::Blake2s(inner) => inner.domain(),
            AnyHasher::Poseidon(inner) => inner.domain(),
        }
    }

    fn compress(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        match self {
            AnyHasher::Sha256(inner) => inner.compress(left, right),
            AnyHasher::Blake2s(inner) => inner.compress(left, right),
            AnyHasher::Poseidon(inner) => inner.compress(left, right),
        }
    }
}
