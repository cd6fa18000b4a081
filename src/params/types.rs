use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::field::{FieldDomain, FieldError};
use crate::hash::{HashFamily, PoseidonParameters};

/// Prime field selection.
///
/// | Variant | Modulus |
/// |---------|---------|
/// | `Bn254` | BN254 scalar field |
/// | `Goldilocks` | 2<sup>64</sup> - 2<sup>32</sup> + 1 |
/// | `Custom` | Decimal modulus supplied by the caller, checked for primality |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Bn254,
    Goldilocks,
    Custom { modulus: String },
}

impl FieldKind {
    pub(crate) const fn code(&self) -> u8 {
        match self {
            FieldKind::Bn254 => 1,
            FieldKind::Goldilocks => 2,
            FieldKind::Custom { .. } => 3,
        }
    }

    /// Materialises the field domain.
    pub fn domain(&self) -> Result<FieldDomain, FieldError> {
        match self {
            FieldKind::Bn254 => Ok(FieldDomain::bn254()),
            FieldKind::Goldilocks => Ok(FieldDomain::goldilocks()),
            FieldKind::Custom { modulus } => FieldDomain::from_decimal(modulus),
        }
    }

    /// Custom field from an already parsed modulus.
    pub fn custom(modulus: &BigUint) -> Self {
        FieldKind::Custom {
            modulus: modulus.to_str_radix(10),
        }
    }
}

/// Node hash selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum HashKind {
    Sha256,
    Blake2s,
    Poseidon { parameters: PoseidonParameters },
}

impl HashKind {
    pub fn family(&self) -> HashFamily {
        match self {
            HashKind::Sha256 => HashFamily::Sha256,
            HashKind::Blake2s => HashFamily::Blake2s,
            HashKind::Poseidon { .. } => HashFamily::Poseidon,
        }
    }
}
