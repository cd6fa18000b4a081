//! Field element representation shared by the tree, the hash families and the
//! constraint backend.

use core::fmt;
use core::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Field element represented as a canonical integer modulo a prime.
///
/// # Representation
///
/// * The wrapped integer lies in `[0, P)` for the [`FieldDomain`](super::FieldDomain)
///   that produced it.  Elements are only minted by a domain (`reduce`,
///   `from_canonical`) so the invariant holds for every value that reaches the
///   tree or a hash family.
/// * The type carries no reference to its modulus.  Mixing elements from two
///   domains is a caller error that no API in this crate performs.
/// * Serialisation uses the decimal string form so that large moduli survive
///   JSON round trips unchanged.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FieldElement(pub(crate) BigUint);

impl FieldElement {
    /// Additive identity.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Returns `true` for the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Borrows the canonical integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Consumes the element and returns the canonical integer.
    pub fn into_biguint(self) -> BigUint {
        self.0
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{:x})", self.0)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Parses the decimal form without range checks; callers route the value
/// through a domain before use.
impl FromStr for FieldElement {
    type Err = num_bigint::ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigUint::from_str(s).map(Self)
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_str_radix(10))
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        FieldElement::from_str(&text).map_err(serde::de::Error::custom)
    }
}

impl From<FieldElement> for num_bigint::BigInt {
    fn from(element: FieldElement) -> Self {
        num_bigint::BigInt::from(element.0)
    }
}

impl From<&FieldElement> for num_bigint::BigInt {
    fn from(element: &FieldElement) -> Self {
        num_bigint::BigInt::from(element.0.clone())
    }
}
