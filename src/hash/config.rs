//! Hash configuration definitions shared by the tree builder and the
//! constraint backend.

use serde::{Deserialize, Serialize};

/// Version identifier for the default Poseidon parameter set.
pub const POSEIDON_PARAMETERS_V1_ID: &str = "poseidon-v1-t3-alpha5-rf8-rp57";

/// Domain separation tag absorbed when deriving Poseidon round constants.
pub const POSEIDON_ARITHMETIC_DOMAIN_TAG: &[u8] = b"rpp-merkle:poseidon:arith";

/// Domain separation tag prepended to every Blake2s node compression.
pub const BLAKE2S_NODE_DOMAIN_TAG: &[u8] = b"rpp-merkle:blake2s:node";

/// Domain separation tag for structural circuit digests.
pub const CIRCUIT_DIGEST_DOMAIN_TAG: &[u8] = b"rpp-merkle:circuit:v1";

/// Domain separation tag for parameter digests.
pub const PARAMS_DIGEST_DOMAIN_TAG: &[u8] = b"rpp-merkle:params:v1";

/// Poseidon parameter set descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseidonParameters {
    /// Identifier bound into the round-constant derivation.
    pub id: String,
    /// Number of full rounds (split evenly before and after the partial rounds).
    pub full_rounds: usize,
    /// Number of partial rounds.
    pub partial_rounds: usize,
    /// Width of the permutation state (capacity 1, rate `width - 1`).
    pub width: usize,
    /// S-box exponent.  Must be coprime with `P - 1`.
    pub alpha: u64,
}

impl PoseidonParameters {
    /// Creates a new parameter set.
    pub fn new(
        id: impl Into<String>,
        full_rounds: usize,
        partial_rounds: usize,
        width: usize,
        alpha: u64,
    ) -> Self {
        Self {
            id: id.into(),
            full_rounds,
            partial_rounds,
            width,
            alpha,
        }
    }

    /// Width-3, `x^5` parameters sized for ~254-bit fields.
    pub fn v1() -> Self {
        Self::new(POSEIDON_PARAMETERS_V1_ID, 8, 57, 3, 5)
    }

    /// Width-3, `x^7` parameters for the Goldilocks field (5 divides `P - 1`).
    pub fn goldilocks() -> Self {
        Self::new("poseidon-v1-t3-alpha7-rf8-rp22", 8, 22, 3, 7)
    }

    /// Total number of rounds, `None` on overflow.
    pub fn rounds(&self) -> Option<usize> {
        self.full_rounds.checked_add(self.partial_rounds)
    }
}

impl Default for PoseidonParameters {
    fn default() -> Self {
        Self::v1()
    }
}
