use serde::{Deserialize, Serialize};

use crate::backend::TransparentProof;

/// Proof of membership of a private leaf under a public root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProof {
    /// Path bits, leaf level first.  Determines the circuit shape.
    pub positions: Vec<u8>,
    /// Backend proof for the recorded circuit.
    pub proof: TransparentProof,
}

impl MembershipProof {
    /// Tree height the proof was produced for.
    pub fn height(&self) -> usize {
        self.positions.len()
    }
}
