//! Deterministic Blake2s helpers: a streaming hasher, a counter-mode
//! pseudo-XOF and the Blake2s field compression built on top of them.

use blake2::{Blake2s256, Digest};

use super::config::BLAKE2S_NODE_DOMAIN_TAG;
use super::{FieldHasher, HashFamily};
use crate::field::{FieldDomain, FieldElement};

/// Streaming Blake2s hasher producing 32-byte digests.
#[derive(Clone, Default)]
pub struct Hasher {
    state: Blake2s256,
}

impl Hasher {
    /// Creates a fresh hasher.
    pub fn new() -> Self {
        Self {
            state: Blake2s256::new(),
        }
    }

    /// Absorbs additional bytes.
    pub fn update(&mut self, bytes: &[u8]) {
        Digest::update(&mut self.state, bytes);
    }

    /// Finalises the hasher and returns the digest.
    pub fn finalize(self) -> [u8; 32] {
        self.state.finalize().into()
    }

    /// Finalises the hasher into an extendable output reader.
    pub fn finalize_xof(self) -> Blake2sXof {
        Blake2sXof::from_state(self.finalize())
    }
}

/// One-shot Blake2s digest of `input`.
pub fn hash(input: &[u8]) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(input);
    hasher.finalize()
}

/// Blake2s-based extendable output reader.
///
/// Each block is `Blake2s(state || counter_le)`; the block becomes the next
/// state.
#[derive(Debug, Clone)]
pub struct Blake2sXof {
    state: [u8; 32],
    counter: u64,
}

impl Blake2sXof {
    /// Creates a new XOF instance from an arbitrary seed.
    pub fn new(seed: &[u8]) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(seed);
        hasher.update(b"/XOF");
        Self::from_state(hasher.finalize())
    }

    /// Creates a new XOF starting from an existing 32-byte state.
    pub fn from_state(state: [u8; 32]) -> Self {
        Self { state, counter: 0 }
    }

    /// Fills the provided buffer with bytes from the stream.
    pub fn squeeze(&mut self, output: &mut [u8]) {
        let mut remaining = output;
        while !remaining.is_empty() {
            let block = self.squeeze_block();
            let take = remaining.len().min(block.len());
            let (dst, rest) = remaining.split_at_mut(take);
            dst.copy_from_slice(&block[..take]);
            remaining = rest;
        }
    }

    /// Draws a field element with 128 bits of slack over the modulus so the
    /// reduction bias is negligible.
    pub fn squeeze_element(&mut self, domain: &FieldDomain) -> FieldElement {
        let mut buf = vec![0u8; domain.element_bytes() + 16];
        self.squeeze(&mut buf);
        domain.reduce_bytes_le(&buf)
    }

    fn squeeze_block(&mut self) -> [u8; 32] {
        let mut hasher = Hasher::new();
        hasher.update(&self.state);
        hasher.update(&self.counter.to_le_bytes());
        let block = hasher.finalize();
        self.state = block;
        self.counter = self.counter.wrapping_add(1);
        block
    }
}

/// Blake2s node compression: `Blake2s(tag || le(left) || le(right))` expanded
/// through the XOF and reduced into the field.
#[derive(Debug, Clone)]
pub struct Blake2sFieldHasher {
    domain: FieldDomain,
}

impl Blake2sFieldHasher {
    pub fn new(domain: FieldDomain) -> Self {
        Self { domain }
    }
}

impl FieldHasher for Blake2sFieldHasher {
    fn family(&self) -> HashFamily {
        HashFamily::Blake2s
    }

    fn domain(&self) -> &FieldDomain {
        &self.domain
    }

    fn compress(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        let mut hasher = Hasher::new();
        hasher.update(BLAKE2S_NODE_DOMAIN_TAG);
        hasher.update(&self.domain.to_bytes_le(left));
        hasher.update(&self.domain.to_bytes_le(right));
        hasher.finalize_xof().squeeze_element(&self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xof_is_deterministic_and_seed_sensitive() {
        let mut a = Blake2sXof::new(b"seed");
        let mut b = Blake2sXof::new(b"seed");
        let mut c = Blake2sXof::new(b"seed2");
        let mut out_a = [0u8; 80];
        let mut out_b = [0u8; 80];
        let mut out_c = [0u8; 80];
        a.squeeze(&mut out_a);
        b.squeeze(&mut out_b);
        c.squeeze(&mut out_c);
        assert_eq!(out_a, out_b);
        assert_ne!(out_a, out_c);
    }

    #[test]
    fn compress_is_order_sensitive() {
        let hasher = Blake2sFieldHasher::new(FieldDomain::goldilocks());
        let domain = hasher.domain().clone();
        let a = domain.reduce(1u8);
        let b = domain.reduce(2u8);
        assert_ne!(hasher.compress(&a, &b), hasher.compress(&b, &a));
        assert_eq!(hasher.compress(&a, &b), hasher.compress(&a, &b));
        assert!(domain.contains(&hasher.compress(&a, &b)));
    }
}
