//! Poseidon-style arithmetic sponge over an arbitrary prime field.
//!
//! The permutation only uses field additions, multiplications and the
//! `x^alpha` S-box, so the same round structure can be expressed as
//! constraints.  Round constants are drawn from a Blake2s XOF seeded with the
//! parameter id and the modulus; the mixing layer is the circulant matrix with
//! `2` on the diagonal and `1` elsewhere.
//!
//! The construction is illustrative: it follows the Poseidon round schedule but
//! its constants and MDS matrix have not been through a security analysis.

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;

use super::config::{PoseidonParameters, POSEIDON_ARITHMETIC_DOMAIN_TAG};
use super::deterministic::Blake2sXof;
use super::{FieldHasher, HashFamily};
use crate::field::{FieldDomain, FieldElement};

/// Largest accepted state width.
pub const MAX_WIDTH: usize = 16;

/// Largest accepted count for either round kind.
pub const MAX_ROUNDS: usize = 1024;

/// Parameter problems detected when instantiating the permutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoseidonError {
    #[error("poseidon width must be between 3 and {max}, got {0}", max = MAX_WIDTH)]
    InvalidWidth(usize),
    #[error("poseidon round counts exceed {max}: {full} full, {partial} partial", max = MAX_ROUNDS)]
    TooManyRounds { full: usize, partial: usize },
    #[error("poseidon alpha {alpha} is not a permutation exponent for this field")]
    InvalidAlpha { alpha: u64 },
    #[error("poseidon full rounds must be even and non-zero, got {0}")]
    InvalidFullRounds(usize),
    #[error("poseidon input cannot be empty")]
    EmptyInput,
}

/// Poseidon state representation used during hashing.
#[derive(Debug, Clone)]
pub struct PoseidonState<'a> {
    /// Current state elements; index 0 is the capacity lane.
    pub elements: Vec<FieldElement>,
    hasher: &'a PoseidonHasher,
}

impl<'a> PoseidonState<'a> {
    fn new(hasher: &'a PoseidonHasher, capacity_tag: u64) -> Self {
        let mut elements = vec![FieldElement::zero(); hasher.params.width];
        elements[0] = hasher.domain.reduce(capacity_tag);
        Self { elements, hasher }
    }

    /// Adds a rate-sized chunk of inputs into the rate lanes.
    pub fn absorb(&mut self, chunk: &[FieldElement]) {
        let domain = &self.hasher.domain;
        for (lane, value) in self.elements[1..].iter_mut().zip(chunk) {
            *lane = domain.add(lane, value);
        }
    }

    /// Applies the permutation rounds.
    pub fn permute(&mut self) {
        let hasher = self.hasher;
        let domain = &hasher.domain;
        let params = &hasher.params;
        let width = params.width;
        let half_full = params.full_rounds / 2;

        for round in 0..hasher.round_count {
            let constants = &hasher.round_constants[round * width..(round + 1) * width];
            for (element, constant) in self.elements.iter_mut().zip(constants) {
                *element = domain.add(element, constant);
            }

            let full = round < half_full || round >= half_full + params.partial_rounds;
            if full {
                for element in &mut self.elements {
                    *element = domain.pow(element, params.alpha);
                }
            } else {
                self.elements[0] = domain.pow(&self.elements[0], params.alpha);
            }

            let sum = self
                .elements
                .iter()
                .fold(FieldElement::zero(), |acc, value| domain.add(&acc, value));
            for element in &mut self.elements {
                *element = domain.add(&sum, element);
            }
        }
    }

    /// Permutes and returns the first rate lane.
    pub fn squeeze(&mut self) -> FieldElement {
        self.permute();
        self.elements[1].clone()
    }
}

/// Poseidon sponge bound to a field domain and a parameter set.
#[derive(Debug, Clone)]
pub struct PoseidonHasher {
    domain: FieldDomain,
    params: PoseidonParameters,
    round_count: usize,
    round_constants: Arc<Vec<FieldElement>>,
}

impl PoseidonHasher {
    /// Validates the parameters against the domain and derives the round
    /// constants.
    pub fn new(domain: FieldDomain, params: PoseidonParameters) -> Result<Self, PoseidonError> {
        if !(3..=MAX_WIDTH).contains(&params.width) {
            return Err(PoseidonError::InvalidWidth(params.width));
        }
        if params.full_rounds == 0 || params.full_rounds % 2 != 0 {
            return Err(PoseidonError::InvalidFullRounds(params.full_rounds));
        }
        let too_many_rounds = PoseidonError::TooManyRounds {
            full: params.full_rounds,
            partial: params.partial_rounds,
        };
        if params.full_rounds > MAX_ROUNDS || params.partial_rounds > MAX_ROUNDS {
            return Err(too_many_rounds);
        }
        let round_count = params.rounds().ok_or_else(|| too_many_rounds.clone())?;
        let constant_count = round_count
            .checked_mul(params.width)
            .ok_or(too_many_rounds)?;
        if !is_permutation_exponent(domain.modulus(), params.alpha) {
            return Err(PoseidonError::InvalidAlpha {
                alpha: params.alpha,
            });
        }

        let mut seed = Vec::new();
        seed.extend_from_slice(POSEIDON_ARITHMETIC_DOMAIN_TAG);
        seed.extend_from_slice(params.id.as_bytes());
        seed.extend_from_slice(&domain.modulus().to_bytes_le());
        let mut xof = Blake2sXof::new(&seed);
        let round_constants = (0..constant_count)
            .map(|_| xof.squeeze_element(&domain))
            .collect();

        Ok(Self {
            domain,
            params,
            round_count,
            round_constants: Arc::new(round_constants),
        })
    }

    /// Parameter set in use.
    pub fn parameters(&self) -> &PoseidonParameters {
        &self.params
    }

    /// Sponge hash of an arbitrary-length input.  The capacity lane is
    /// initialised with the input length for domain separation.
    pub fn hash(&self, input: &[FieldElement]) -> Result<FieldElement, PoseidonError> {
        if input.is_empty() {
            return Err(PoseidonError::EmptyInput);
        }
        let mut state = PoseidonState::new(self, input.len() as u64);
        let rate = self.params.width - 1;
        for chunk in input.chunks(rate) {
            state.absorb(chunk);
            state.permute();
        }
        Ok(state.elements[1].clone())
    }
}

impl FieldHasher for PoseidonHasher {
    fn family(&self) -> HashFamily {
        HashFamily::Poseidon
    }

    fn domain(&self) -> &FieldDomain {
        &self.domain
    }

    fn compress(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        let mut state = PoseidonState::new(self, 2);
        state.absorb(&[left.clone(), right.clone()]);
        state.squeeze()
    }
}

/// `x -> x^alpha` is a bijection on `F_p` iff `gcd(alpha, p - 1) = 1`.
fn is_permutation_exponent(modulus: &BigUint, alpha: u64) -> bool {
    if alpha < 3 {
        return false;
    }
    let mut a = modulus - BigUint::from(1u32);
    let mut b = BigUint::from(alpha);
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a == BigUint::from(1u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_alpha_dividing_order() {
        let err = PoseidonHasher::new(FieldDomain::goldilocks(), PoseidonParameters::v1())
            .expect_err("5 divides p - 1 for goldilocks");
        assert_eq!(err, PoseidonError::InvalidAlpha { alpha: 5 });
        assert!(
            PoseidonHasher::new(FieldDomain::goldilocks(), PoseidonParameters::goldilocks()).is_ok()
        );
    }

    #[test]
    fn rejects_narrow_state() {
        let params = PoseidonParameters::new("narrow", 8, 10, 2, 5);
        let err = PoseidonHasher::new(FieldDomain::bn254(), params).unwrap_err();
        assert_eq!(err, PoseidonError::InvalidWidth(2));
    }

    #[test]
    fn rejects_oversized_shapes() {
        let wide = PoseidonParameters::new("wide", 8, 10, MAX_WIDTH + 1, 5);
        let err = PoseidonHasher::new(FieldDomain::bn254(), wide).unwrap_err();
        assert_eq!(err, PoseidonError::InvalidWidth(MAX_WIDTH + 1));

        let long = PoseidonParameters::new("long", 8, usize::MAX, 3, 5);
        let err = PoseidonHasher::new(FieldDomain::bn254(), long).unwrap_err();
        assert_eq!(
            err,
            PoseidonError::TooManyRounds {
                full: 8,
                partial: usize::MAX
            }
        );
        assert_eq!(PoseidonParameters::new("long", 8, usize::MAX, 3, 5).rounds(), None);
    }

    #[test]
    fn compress_is_deterministic_and_order_sensitive() {
        let hasher = PoseidonHasher::new(FieldDomain::bn254(), PoseidonParameters::v1()).unwrap();
        let domain = hasher.domain().clone();
        let a = domain.reduce(11u8);
        let b = domain.reduce(12u8);
        let ab = hasher.compress(&a, &b);
        assert_eq!(ab, hasher.compress(&a, &b));
        assert_ne!(ab, hasher.compress(&b, &a));
        assert!(domain.contains(&ab));
    }

    #[test]
    fn sponge_separates_lengths() {
        let hasher = PoseidonHasher::new(FieldDomain::bn254(), PoseidonParameters::v1()).unwrap();
        let domain = hasher.domain().clone();
        let one = domain.reduce(1u8);
        let short = hasher.hash(&[one.clone()]).unwrap();
        let long = hasher.hash(&[one, FieldElement::zero()]).unwrap();
        assert_ne!(short, long);
        assert_eq!(hasher.hash(&[]).unwrap_err(), PoseidonError::EmptyInput);
    }
}
