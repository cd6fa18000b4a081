//! Runtime switch for the rayon paths used by tree construction and batch
//! opening extraction.
//!
//! The `parallel` feature compiles those paths in; [`set_parallelism`]
//! toggles them at runtime and restores the previous setting when the returned
//! guard drops.  Level hashes and openings are collected in index order, so
//! trees and openings never depend on the setting.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
static PARALLEL_ENABLED: AtomicBool = AtomicBool::new(true);

const DEFAULT_CHUNK_SIZE: usize = 64;

/// Minimum number of pair hashes or openings handed to one rayon task.
///
/// Never zero and never above `DEFAULT_CHUNK_SIZE`.
pub fn preferred_chunk_size(total_items: usize) -> usize {
    if total_items == 0 {
        1
    } else {
        DEFAULT_CHUNK_SIZE.min(total_items)
    }
}

/// Whether `MerkleTree::build` and `MerkleTree::openings` may fan out.
#[cfg(feature = "parallel")]
pub fn parallelism_enabled() -> bool {
    PARALLEL_ENABLED.load(Ordering::SeqCst)
}

/// Always `false` without the `parallel` feature.
#[cfg(not(feature = "parallel"))]
pub fn parallelism_enabled() -> bool {
    false
}

/// Enables or disables the rayon paths until the returned guard drops.
///
/// The switch is process-wide; tests comparing both modes hold the guard
/// for the duration of each run.
#[cfg(feature = "parallel")]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    let previous = PARALLEL_ENABLED.swap(enabled, Ordering::SeqCst);
    tracing::trace!(enabled, previous, "parallelism toggled");
    ParallelismGuard { previous }
}

/// No-op without the `parallel` feature; the guard restores nothing.
#[cfg(not(feature = "parallel"))]
pub fn set_parallelism(_enabled: bool) -> ParallelismGuard {
    ParallelismGuard {}
}

/// Restores the previous parallelism setting on drop.
#[must_use = "dropping the guard immediately restores the previous setting"]
pub struct ParallelismGuard {
    #[cfg(feature = "parallel")]
    previous: bool,
}

#[cfg(feature = "parallel")]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        PARALLEL_ENABLED.store(self.previous, Ordering::SeqCst);
    }
}
