//! Fixed-size sliding window of chunks centered on a moving viewpoint.
//!
//! The window owns a single flat buffer of `size * size` chunks. World coordinate
//! `(x, y)` is always stored in slot `(x mod size, y mod size)`, so recentering never
//! moves data around: only the slots whose coordinate left the window are rewritten,
//! and every other chunk (including its `loaded` flag) stays where it is.
//!
//! # Example
//!
//! ```
//! use toroid_core::{ChunkCoord, MoveOutcome, ToroidalWindow};
//!
//! let mut window = ToroidalWindow::new(2).unwrap();
//! window.mark_loaded(1, 1).unwrap();
//!
//! assert_eq!(window.move_by(1, 0), MoveOutcome::Incremental { refreshed: 5 });
//! assert_eq!(window.center(), ChunkCoord::new(1, 0));
//! assert!(window.get(1, 1).unwrap().is_loaded());
//! assert!(!window.get(3, 1).unwrap().is_loaded());
//! ```

use std::ops::RangeInclusive;

use tracing::{debug, trace};

use crate::chunk::{Chunk, ChunkBounds, ChunkCoord};
use crate::config::WindowConfig;
use crate::coord::CoordinateMapper;
use crate::error::WindowError;
use crate::snapshot::WindowSnapshot;

/// What a recenter did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The center did not change; no slot was touched.
    Unchanged,
    /// Only slots that entered the window were rewritten.
    Incremental {
        /// Number of slots rewritten with fresh chunks.
        refreshed: usize,
    },
    /// The move was at least one full window wide and every slot was rewritten.
    Rebuilt,
}

/// Sliding window of `(2 * half + 1)^2` chunks around a center.
///
/// World coordinates are `i64`. The center is kept within
/// `[i64::MIN + half, i64::MAX - half]` on both axes so that every coordinate of the
/// square is representable: [`move_by`](Self::move_by) and
/// [`set_center`](Self::set_center) clamp a target outside that range to its edge.
#[derive(Debug, Clone)]
pub struct ToroidalWindow {
    mapper: CoordinateMapper,
    /// Flat buffer addressed by `i * size + j`.
    slots: Vec<Chunk>,
}

impl ToroidalWindow {
    /// Create a window of radius `half` centered on the origin.
    ///
    /// Every chunk starts out not loaded.
    pub fn new(half: usize) -> Result<Self, WindowError> {
        let mapper = CoordinateMapper::new(half, ChunkCoord::ORIGIN)?;
        let size = mapper.size();
        let mut window = Self {
            mapper,
            slots: Vec::with_capacity(size * size),
        };
        window.full_rebuild();
        Ok(window)
    }

    /// Create a window from a signed radius, rejecting negative values.
    ///
    /// # Examples
    ///
    /// ```
    /// use toroid_core::{ToroidalWindow, WindowError};
    ///
    /// assert!(ToroidalWindow::try_from_radius(3).is_ok());
    /// assert!(matches!(
    ///     ToroidalWindow::try_from_radius(-1),
    ///     Err(WindowError::InvalidConfiguration(_))
    /// ));
    /// ```
    pub fn try_from_radius(half: i64) -> Result<Self, WindowError> {
        Self::from_config(&WindowConfig::new(half))
    }

    pub fn from_config(config: &WindowConfig) -> Result<Self, WindowError> {
        Self::new(config.validate()?)
    }

    pub fn center(&self) -> ChunkCoord {
        self.mapper.center()
    }

    pub fn half(&self) -> usize {
        self.mapper.half()
    }

    /// Side length, `2 * half + 1`.
    pub fn size(&self) -> usize {
        self.mapper.size()
    }

    /// Number of chunks held, always `size * size`.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The index math used by this window at its current center.
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn bounds(&self) -> ChunkBounds {
        self.mapper.bounds()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.mapper.contains(ChunkCoord::new(x, y))
    }

    /// Shift the center by `(dx, dy)` and bring the buffer back in line with it.
    ///
    /// Moves shorter than the side length on both axes rewrite only the slots whose
    /// coordinate entered the window; everything else keeps its chunk untouched.
    /// Longer moves cannot share any coordinate with the old window and rebuild the
    /// whole buffer. The window never fails to move; the target center is clamped as
    /// described on [`ToroidalWindow`].
    pub fn move_by(&mut self, dx: i64, dy: i64) -> MoveOutcome {
        let previous = self.center();
        let target = self.mapper.clamp_center(
            i128::from(previous.x) + i128::from(dx),
            i128::from(previous.y) + i128::from(dy),
        );
        self.recenter(target)
    }

    /// Move the center to an absolute coordinate.
    ///
    /// Equivalent to `move_by(x - cx, y - cy)`, including the clamping of the target.
    pub fn set_center(&mut self, x: i64, y: i64) -> MoveOutcome {
        let target = self.mapper.clamp_center(i128::from(x), i128::from(y));
        self.recenter(target)
    }

    fn recenter(&mut self, center: ChunkCoord) -> MoveOutcome {
        let previous = self.center();
        let dx = i128::from(center.x) - i128::from(previous.x);
        let dy = i128::from(center.y) - i128::from(previous.y);
        if dx == 0 && dy == 0 {
            return MoveOutcome::Unchanged;
        }

        self.mapper.set_center(center);

        let size = self.size() as i128;
        if dx.abs() >= size || dy.abs() >= size {
            debug!(%previous, %center, "move spans the whole window, rebuilding");
            self.full_rebuild();
            return MoveOutcome::Rebuilt;
        }

        // Both deltas are now shorter than the side length.
        let (dx, dy) = (dx as i64, dy as i64);
        let half = self.half() as i64;
        let mut refreshed = 0;

        let columns = entering(center.x, dx, half);
        for x in columns.clone() {
            for y in center.y - half..=center.y + half {
                self.refresh(x, y);
                refreshed += 1;
            }
        }

        // Rows are swept after columns; the corner they share was already rewritten.
        for y in entering(center.y, dy, half) {
            for x in (center.x - half..=center.x + half).filter(|x| !columns.contains(x)) {
                self.refresh(x, y);
                refreshed += 1;
            }
        }

        trace!(%previous, %center, refreshed, "window recentered");
        MoveOutcome::Incremental { refreshed }
    }

    /// Chunk for world coordinate `(x, y)`, if it is inside the window.
    pub fn get(&self, x: i64, y: i64) -> Option<&Chunk> {
        if !self.contains(x, y) {
            return None;
        }
        self.slots.get(self.mapper.buffer_index(x, y))
    }

    /// Mutable chunk for world coordinate `(x, y)`, if it is inside the window.
    ///
    /// Only the `loaded` flag can be changed through the returned reference.
    pub fn get_mut(&mut self, x: i64, y: i64) -> Option<&mut Chunk> {
        if !self.contains(x, y) {
            return None;
        }
        let index = self.mapper.buffer_index(x, y);
        self.slots.get_mut(index)
    }

    /// Like [`get`](Self::get), reporting coordinates outside the window as an error.
    pub fn try_get(&self, x: i64, y: i64) -> Result<&Chunk, WindowError> {
        self.get(x, y).ok_or(WindowError::OutOfWindow { x, y })
    }

    /// Flag the chunk at `(x, y)` as loaded.
    pub fn mark_loaded(&mut self, x: i64, y: i64) -> Result<(), WindowError> {
        let chunk = self
            .get_mut(x, y)
            .ok_or(WindowError::OutOfWindow { x, y })?;
        chunk.set_loaded(true);
        Ok(())
    }

    /// Chunk held in storage slot `(i, j)`.
    pub fn slot(&self, i: usize, j: usize) -> Option<&Chunk> {
        let size = self.size();
        if i >= size || j >= size {
            return None;
        }
        self.slots.get(self.mapper.slot_index(i, j))
    }

    /// Iterate over every chunk in storage order.
    ///
    /// Storage order depends on where the center sits modulo the side length; do not
    /// rely on it matching any traversal of world coordinates.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.slots.iter_mut()
    }

    /// Coordinates whose chunk is still waiting for its payload.
    pub fn unloaded(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.slots
            .iter()
            .filter(|chunk| !chunk.is_loaded())
            .map(Chunk::coord)
    }

    /// Serializable copy of the window contents, sorted by coordinate.
    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot::from(self)
    }

    /// Reassign every slot from the current center with fresh chunks.
    fn full_rebuild(&mut self) {
        let size = self.size();
        let mapper = self.mapper;
        self.slots.clear();
        self.slots.extend((0..size).flat_map(|i| {
            (0..size).map(move |j| Chunk::new(mapper.representative_for(i as i64, j as i64)))
        }));
    }

    /// Replace the slot holding world coordinate `(x, y)` with a fresh chunk.
    fn refresh(&mut self, x: i64, y: i64) {
        let (i, j) = self.mapper.world_to_slot(x, y);
        let index = self.mapper.slot_index(i, j);
        self.slots[index] = Chunk::new(self.mapper.representative_for(i as i64, j as i64));
    }
}

/// World coordinates that entered the window along one axis after the center moved
/// by `delta` (with `|delta| < 2 * half + 1`) to `center`.
fn entering(center: i64, delta: i64, half: i64) -> RangeInclusive<i64> {
    match delta {
        0 => 1..=0,
        d if d > 0 => center + half - d + 1..=center + half,
        d => center - half..=center - half - d - 1,
    }
}
