//! Filling in payloads for chunks that entered the window.
//!
//! The window never sets `loaded` itself. [`load_pending`] walks the chunks still
//! waiting for a payload, nearest to the center first, hands each one to a
//! [`ChunkLoader`] and flags the ones that succeeded.

use toroid_core::{ChunkCoord, ToroidalWindow};
use tracing::{debug, warn};

use crate::error::LoadError;

/// Produces the payload for a chunk coordinate.
pub trait ChunkLoader {
    fn load(&mut self, coord: ChunkCoord) -> Result<(), LoadError>;
}

impl<F> ChunkLoader for F
where
    F: FnMut(ChunkCoord) -> Result<(), LoadError>,
{
    fn load(&mut self, coord: ChunkCoord) -> Result<(), LoadError> {
        self(coord)
    }
}

/// Outcome of one [`load_pending`] pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Chunks flagged as loaded in this pass
    pub loaded: usize,
    /// Chunks whose loader call failed; they stay unloaded
    pub failed: usize,
    /// Chunks still unloaded after the pass
    pub remaining: usize,
}

/// Unloaded coordinates ordered by Chebyshev distance to the center, then by coordinate.
pub fn pending_by_distance(window: &ToroidalWindow) -> Vec<ChunkCoord> {
    let center = window.center();
    let mut pending: Vec<ChunkCoord> = window.unloaded().collect();
    pending.sort_by_key(|coord| (center.chebyshev_distance(*coord), *coord));
    pending
}

/// Load up to `budget` pending chunks (all of them when `budget` is 0).
pub fn load_pending<L>(window: &mut ToroidalWindow, loader: &mut L, budget: usize) -> LoadReport
where
    L: ChunkLoader + ?Sized,
{
    let limit = if budget == 0 { usize::MAX } else { budget };
    let mut report = LoadReport::default();

    for coord in pending_by_distance(window).into_iter().take(limit) {
        match loader.load(coord) {
            Ok(()) => {
                if let Some(chunk) = window.get_mut(coord.x, coord.y) {
                    chunk.set_loaded(true);
                    report.loaded += 1;
                }
            }
            Err(err) => {
                warn!(%coord, error = %err, "chunk load failed");
                report.failed += 1;
            }
        }
    }

    report.remaining = window.unloaded().count();
    debug!(
        loaded = report.loaded,
        failed = report.failed,
        remaining = report.remaining,
        "load pass finished"
    );
    report
}
