use crate::hash::config::PARAMS_DIGEST_DOMAIN_TAG;
use crate::hash::Hasher;

use super::types::{FieldKind, HashKind};
use super::MembershipParams;

/// Computes the canonical parameter digest for a [`MembershipParams`]
/// instance.
///
/// Blake2s over a fixed little-endian layout: version, field code and
/// modulus text, hash family tag and, for Poseidon, every parameter.  The
/// `parallel` flag is an execution knob and is not committed.
pub fn params_hash(params: &MembershipParams) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(PARAMS_DIGEST_DOMAIN_TAG);
    hasher.update(&params.params_version().to_le_bytes());

    let field = params.field();
    hasher.update(&[field.code()]);
    if let FieldKind::Custom { modulus } = field {
        absorb_str(&mut hasher, modulus);
    }

    let hash = params.hash();
    hasher.update(&[hash.family().tag()]);
    if let HashKind::Poseidon { parameters } = hash {
        absorb_str(&mut hasher, &parameters.id);
        for value in [
            parameters.full_rounds as u64,
            parameters.partial_rounds as u64,
            parameters.width as u64,
            parameters.alpha,
        ] {
            hasher.update(&value.to_le_bytes());
        }
    }
    hasher.finalize()
}

fn absorb_str(hasher: &mut Hasher, value: &str) {
    hasher.update(&(value.len() as u32).to_le_bytes());
    hasher.update(value.as_bytes());
}
