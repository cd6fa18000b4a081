//! Prime field domain: modulus metadata plus the reduction and arithmetic
//! helpers the Merkle layer and the arithmetic hash require.
//!
//! The modulus is an explicit value.  Nothing in the crate reads a process-wide
//! constant; the presets below are convenience constructors that hand out owned
//! copies.

use core::fmt;
use core::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

use super::element::FieldElement;

/// BN254 scalar field modulus in decimal form.
pub const BN254_MODULUS_DEC: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// Goldilocks modulus `2^64 - 2^32 + 1`.
pub const GOLDILOCKS_MODULUS: u64 = 0xffff_ffff_0000_0001;

/// Bases used by the deterministic Miller–Rabin check.
const MILLER_RABIN_BASES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Big-endian bytes of [`BN254_MODULUS_DEC`].
const BN254_MODULUS_BE: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

static BN254: Lazy<FieldDomain> =
    Lazy::new(|| FieldDomain::from_trusted(BigUint::from_bytes_be(&BN254_MODULUS_BE)));

static GOLDILOCKS: Lazy<FieldDomain> =
    Lazy::new(|| FieldDomain::from_trusted(BigUint::from(GOLDILOCKS_MODULUS)));

/// Errors raised while configuring a domain or admitting external values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Modulus must be at least two.
    #[error("field modulus must be at least 2")]
    ModulusTooSmall,
    /// Modulus failed the primality check.
    #[error("field modulus {modulus} is not prime")]
    ModulusNotPrime { modulus: String },
    /// Value was not strictly below the modulus.
    #[error("value is not a canonical field element (>= modulus)")]
    NonCanonical,
    /// Decimal modulus string could not be parsed.
    #[error("invalid modulus literal: {0}")]
    InvalidLiteral(String),
}

/// Prime field `Z/PZ` described by its modulus.
#[derive(Clone, PartialEq, Eq)]
pub struct FieldDomain {
    modulus: BigUint,
    element_bytes: usize,
}

impl fmt::Debug for FieldDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDomain")
            .field("modulus", &format_args!("0x{:x}", self.modulus))
            .field("bits", &self.modulus.bits())
            .finish()
    }
}

impl FieldDomain {
    /// Creates a domain after checking that `modulus` is a prime `>= 2`.
    pub fn new(modulus: BigUint) -> Result<Self, FieldError> {
        if modulus < BigUint::from(2u32) {
            return Err(FieldError::ModulusTooSmall);
        }
        if !is_probable_prime(&modulus) {
            return Err(FieldError::ModulusNotPrime {
                modulus: modulus.to_str_radix(10),
            });
        }
        Ok(Self::from_trusted(modulus))
    }

    /// Parses a decimal modulus and validates it.
    pub fn from_decimal(modulus: &str) -> Result<Self, FieldError> {
        let value = BigUint::from_str(modulus.trim())
            .map_err(|err| FieldError::InvalidLiteral(err.to_string()))?;
        Self::new(value)
    }

    fn from_trusted(modulus: BigUint) -> Self {
        let element_bytes = (modulus.bits() as usize).div_ceil(8).max(1);
        Self {
            modulus,
            element_bytes,
        }
    }

    /// BN254 scalar field.
    pub fn bn254() -> Self {
        BN254.clone()
    }

    /// Goldilocks field.
    pub fn goldilocks() -> Self {
        GOLDILOCKS.clone()
    }

    /// The prime modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Width in bytes of the fixed-size element encodings.
    pub fn element_bytes(&self) -> usize {
        self.element_bytes
    }

    /// Reduces an arbitrary integer into the field.
    ///
    /// Negative inputs use floor semantics, so `-1` maps to `P - 1`.
    pub fn reduce<T: Into<BigInt>>(&self, value: T) -> FieldElement {
        let value: BigInt = value.into();
        let (sign, magnitude) = value.into_parts();
        let reduced = magnitude % &self.modulus;
        if sign == Sign::Minus && !reduced.is_zero() {
            FieldElement(&self.modulus - reduced)
        } else {
            FieldElement(reduced)
        }
    }

    /// Reduces a non-negative integer into the field.
    pub fn reduce_biguint(&self, value: &BigUint) -> FieldElement {
        FieldElement(value % &self.modulus)
    }

    /// Interprets `bytes` as a big-endian integer and reduces it.
    pub fn reduce_bytes_be(&self, bytes: &[u8]) -> FieldElement {
        self.reduce_biguint(&BigUint::from_bytes_be(bytes))
    }

    /// Interprets `bytes` as a little-endian integer and reduces it.
    pub fn reduce_bytes_le(&self, bytes: &[u8]) -> FieldElement {
        self.reduce_biguint(&BigUint::from_bytes_le(bytes))
    }

    /// Admits an already reduced integer, rejecting values `>= P`.
    pub fn from_canonical(&self, value: BigUint) -> Result<FieldElement, FieldError> {
        if value >= self.modulus {
            return Err(FieldError::NonCanonical);
        }
        Ok(FieldElement(value))
    }

    /// Returns `true` when `element` is strictly below the modulus.
    pub fn contains(&self, element: &FieldElement) -> bool {
        element.0 < self.modulus
    }

    /// Big-endian encoding zero-padded to `width` bytes.
    ///
    /// `width` smaller than the minimal encoding yields the minimal encoding.
    pub fn to_bytes_be_padded(&self, element: &FieldElement, width: usize) -> Vec<u8> {
        let raw = element.0.to_bytes_be();
        if raw.len() >= width {
            return raw;
        }
        let mut out = vec![0u8; width - raw.len()];
        out.extend_from_slice(&raw);
        out
    }

    /// Big-endian encoding at [`Self::element_bytes`].
    pub fn to_bytes_be(&self, element: &FieldElement) -> Vec<u8> {
        self.to_bytes_be_padded(element, self.element_bytes)
    }

    /// Little-endian encoding at [`Self::element_bytes`].
    pub fn to_bytes_le(&self, element: &FieldElement) -> Vec<u8> {
        let mut out = element.0.to_bytes_le();
        out.resize(self.element_bytes.max(out.len()), 0);
        out
    }

    /// `a + b mod P`.
    pub fn add(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        FieldElement((&a.0 + &b.0) % &self.modulus)
    }

    /// `a * b mod P`.
    pub fn mul(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        FieldElement((&a.0 * &b.0) % &self.modulus)
    }

    /// `base^exponent mod P`.
    pub fn pow(&self, base: &FieldElement, exponent: u64) -> FieldElement {
        FieldElement(base.0.modpow(&BigUint::from(exponent), &self.modulus))
    }
}

fn is_probable_prime(n: &BigUint) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    for base in MILLER_RABIN_BASES {
        let base = BigUint::from(base);
        if *n == base {
            return true;
        }
        if (n % &base).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - &one;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while (&d % &two).is_zero() {
        d >>= 1;
        s += 1;
    }

    'witness: for base in MILLER_RABIN_BASES {
        let mut x = BigUint::from(base).modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
