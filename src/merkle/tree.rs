use num_bigint::BigInt;
use tracing::{debug, trace};

use super::types::{MerkleError, Opening};
use crate::field::FieldElement;
use crate::hash::{FieldHasher, HashFamily};

/// Binary Merkle tree storing every hashed level for subsequent openings.
///
/// `levels[0]` holds the reduced leaves and the last level holds exactly one
/// element, the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<FieldElement>>,
    family: HashFamily,
}

impl MerkleTree {
    /// Builds the tree bottom-up from `leaves`.
    ///
    /// Each leaf is reduced into `hasher.domain()` first.  Adjacent nodes are
    /// paired left to right; the last node of an odd-length level is paired
    /// with itself.
    pub fn build<I, T, H>(leaves: I, hasher: &H) -> Result<Self, MerkleError>
    where
        I: IntoIterator<Item = T>,
        T: Into<BigInt>,
        H: FieldHasher + ?Sized,
    {
        let domain = hasher.domain();
        let reduced: Vec<FieldElement> = leaves
            .into_iter()
            .map(|leaf| domain.reduce(leaf))
            .collect();
        if reduced.is_empty() {
            return Err(MerkleError::EmptyLeaves);
        }

        let leaf_count = reduced.len();
        let mut levels = Vec::new();
        levels.push(reduced);

        while let Some(current) = levels.last() {
            if current.len() <= 1 {
                break;
            }
            let next = hash_level(current, hasher);
            levels.push(next);
        }

        let tree = Self {
            levels,
            family: hasher.family(),
        };
        debug!(
            leaf_count,
            height = tree.height(),
            family = %tree.family,
            "merkle tree built"
        );
        Ok(tree)
    }

    /// Root of the tree.
    pub fn root(&self) -> &FieldElement {
        // `build` guarantees a non-empty top level.
        &self.levels[self.levels.len() - 1][0]
    }

    /// Number of levels minus one; the length of every opening.
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    /// Number of leaves committed by the tree.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Reduced leaves (level 0).
    pub fn leaves(&self) -> &[FieldElement] {
        &self.levels[0]
    }

    /// All levels from the leaves up to the root.
    pub fn levels(&self) -> &[Vec<FieldElement>] {
        &self.levels
    }

    /// A single level, if it exists.
    pub fn level(&self, depth: usize) -> Option<&[FieldElement]> {
        self.levels.get(depth).map(|level| level.as_slice())
    }

    /// Hash family the tree was built with.
    pub fn family(&self) -> HashFamily {
        self.family
    }

    /// Extracts the authentication path for the leaf at `index`.
    pub fn opening(&self, index: usize) -> Result<Opening, MerkleError> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(MerkleError::IndexOutOfRange { index, leaf_count });
        }

        let height = self.height();
        let mut siblings = Vec::with_capacity(height);
        let mut positions = Vec::with_capacity(height);
        let mut idx = index;

        for level in &self.levels[..height] {
            let sibling_idx = idx ^ 1;
            let sibling = match level.get(sibling_idx) {
                Some(sibling) => sibling,
                // lone trailing node: duplicated at build time
                None => level.get(idx).ok_or(MerkleError::InvalidTreeState {
                    reason: "path index escaped its level",
                })?,
            };
            siblings.push(sibling.clone());
            positions.push((idx % 2) as u8);
            idx /= 2;
        }

        trace!(index, height, "opening extracted");
        Ok(Opening {
            siblings,
            positions,
        })
    }

    /// Extracts openings for several indices, returned in request order.
    ///
    /// The whole batch fails if any index is out of range.
    pub fn openings(&self, indices: &[usize]) -> Result<Vec<Opening>, MerkleError> {
        #[cfg(feature = "parallel")]
        if crate::utils::parallelism_enabled() {
            use rayon::prelude::*;
            let chunk = crate::utils::preferred_chunk_size(indices.len());
            return indices
                .par_iter()
                .with_min_len(chunk)
                .map(|&index| self.opening(index))
                .collect();
        }
        indices.iter().map(|&index| self.opening(index)).collect()
    }
}

fn hash_pair_at<H>(current: &[FieldElement], parent: usize, hasher: &H) -> FieldElement
where
    H: FieldHasher + ?Sized,
{
    let left = &current[2 * parent];
    let right = current.get(2 * parent + 1).unwrap_or(left);
    hasher.compress(left, right)
}

fn hash_level<H>(current: &[FieldElement], hasher: &H) -> Vec<FieldElement>
where
    H: FieldHasher + ?Sized,
{
    let next_len = current.len().div_ceil(2);
    #[cfg(feature = "parallel")]
    if crate::utils::parallelism_enabled() {
        use rayon::prelude::*;
        let chunk = crate::utils::preferred_chunk_size(next_len);
        return (0..next_len)
            .into_par_iter()
            .with_min_len(chunk)
            .map(|parent| hash_pair_at(current, parent, hasher))
            .collect();
    }
    (0..next_len)
        .map(|parent| hash_pair_at(current, parent, hasher))
        .collect()
}
