//! SHA-256 node compression reduced into the field.
//!
//! Operands are encoded big-endian at a fixed width of
//! `max(32, element_bytes)` bytes, the digest is read big-endian and reduced
//! modulo `P`.  Under the BN254 domain this matches the reference off-domain
//! tree byte for byte.

use sha2::{Digest, Sha256};

use super::{FieldHasher, HashFamily};
use crate::field::{FieldDomain, FieldElement};

/// Minimum operand width in bytes.
const MIN_OPERAND_WIDTH: usize = 32;

#[derive(Debug, Clone)]
pub struct Sha256FieldHasher {
    domain: FieldDomain,
    width: usize,
}

impl Sha256FieldHasher {
    pub fn new(domain: FieldDomain) -> Self {
        let width = domain.element_bytes().max(MIN_OPERAND_WIDTH);
        Self { domain, width }
    }

    /// Hashes any number of elements with the same framing as
    /// [`FieldHasher::compress`].
    pub fn hash_elements(&self, values: &[FieldElement]) -> FieldElement {
        let mut hasher = Sha256::new();
        for value in values {
            hasher.update(self.domain.to_bytes_be_padded(value, self.width));
        }
        let digest: [u8; 32] = hasher.finalize().into();
        self.domain.reduce_bytes_be(&digest)
    }
}

impl FieldHasher for Sha256FieldHasher {
    fn family(&self) -> HashFamily {
        HashFamily::Sha256
    }

    fn domain(&self) -> &FieldDomain {
        &self.domain
    }

    fn compress(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        self.hash_elements(&[left.clone(), right.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bn254_vector_matches_reference() {
        let hasher = Sha256FieldHasher::new(FieldDomain::bn254());
        let domain = hasher.domain().clone();
        let parent = hasher.compress(&domain.reduce(1u8), &domain.reduce(2u8));
        assert_eq!(
            parent.to_string(),
            "9571627351759468719423877950817835893802993199359003378871081953658725994859"
        );
    }

    #[test]
    fn small_fields_still_use_32_byte_operands() {
        let hasher = Sha256FieldHasher::new(FieldDomain::goldilocks());
        assert_eq!(hasher.width, 32);
        let domain = hasher.domain().clone();
        let out = hasher.compress(&domain.reduce(3u8), &domain.reduce(4u8));
        assert!(domain.contains(&out));
    }
}
