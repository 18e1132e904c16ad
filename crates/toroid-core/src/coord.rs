//! Index math between world coordinates and storage slots.
//!
//! A window of radius `half` stores `size = 2 * half + 1` slots per axis. A world
//! coordinate `x` always lives in slot `x mod size` (floor modulo, so negative
//! coordinates still land in `[0, size)`), and each slot holds the one coordinate of
//! its congruence class that lies within `half` of the current center.
//!
//! # Example
//!
//! ```
//! use toroid_core::{ChunkCoord, CoordinateMapper};
//!
//! let mapper = CoordinateMapper::new(2, ChunkCoord::new(-4, -2)).unwrap();
//! assert_eq!(mapper.world_to_slot(-6, -4), (4, 1));
//! assert_eq!(mapper.representative_for(4, 1), ChunkCoord::new(-6, -4));
//! ```

use crate::chunk::{ChunkBounds, ChunkCoord};
use crate::error::WindowError;

/// Floor modulo: the result is always in `[0, size)` for a positive `size`.
///
/// `%` on signed integers follows the sign of the dividend and would send negative
/// coordinates to negative slots.
#[inline]
pub fn floor_mod(value: i64, size: i64) -> i64 {
    value.rem_euclid(size)
}

/// Converts between world coordinates and storage slots for a given center and radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordinateMapper {
    center: ChunkCoord,
    half: i64,
    size: i64,
}

impl CoordinateMapper {
    /// Create a mapper for a window of radius `half` centered on `center`.
    ///
    /// Fails with [`WindowError::InvalidConfiguration`] when the side length does not
    /// fit an `i64` or the `size * size` buffer cannot be addressed by `usize`.
    pub fn new(half: usize, center: ChunkCoord) -> Result<Self, WindowError> {
        let size = i64::try_from(half)
            .ok()
            .and_then(|h| h.checked_mul(2))
            .and_then(|s| s.checked_add(1))
            .ok_or_else(|| {
                WindowError::InvalidConfiguration(format!("radius {half} is too large"))
            })?;

        usize::try_from(size)
            .ok()
            .and_then(|s| s.checked_mul(s))
            .ok_or_else(|| {
                WindowError::InvalidConfiguration(format!(
                    "a {size}x{size} buffer cannot be addressed"
                ))
            })?;

        Ok(Self {
            center,
            half: size / 2,
            size,
        })
    }

    pub fn center(&self) -> ChunkCoord {
        self.center
    }

    pub fn half(&self) -> usize {
        self.half as usize
    }

    /// Side length of the window, `2 * half + 1`.
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Clamp a prospective center so the whole square around it fits in `i64`.
    pub fn clamp_center(&self, x: i128, y: i128) -> ChunkCoord {
        let low = i128::from(i64::MIN + self.half);
        let high = i128::from(i64::MAX - self.half);
        ChunkCoord::new(x.clamp(low, high) as i64, y.clamp(low, high) as i64)
    }

    pub(crate) fn set_center(&mut self, center: ChunkCoord) {
        self.center = center;
    }

    /// Storage slot that holds world coordinate `(x, y)`.
    pub fn world_to_slot(&self, x: i64, y: i64) -> (usize, usize) {
        (
            floor_mod(x, self.size) as usize,
            floor_mod(y, self.size) as usize,
        )
    }

    /// The coordinate congruent to `(i, j)` that lies within `half` of the center.
    ///
    /// `(i, j)` may be any member of the congruence class, a storage index or a
    /// world coordinate alike.
    pub fn representative_for(&self, i: i64, j: i64) -> ChunkCoord {
        let (ax, ay) = self.world_to_slot(self.center.x, self.center.y);
        ChunkCoord::new(
            self.center.x + self.centered_offset(i, ax as i64),
            self.center.y + self.centered_offset(j, ay as i64),
        )
    }

    /// Offset of `slot` from `anchor` along one axis, folded into `[-half, half]`.
    fn centered_offset(&self, slot: i64, anchor: i64) -> i64 {
        let offset = floor_mod(floor_mod(slot, self.size) - anchor, self.size);
        if offset > self.half {
            offset - self.size
        } else {
            offset
        }
    }

    /// Flat buffer position of storage slot `(i, j)`.
    #[inline]
    pub fn slot_index(&self, i: usize, j: usize) -> usize {
        i * self.size() + j
    }

    /// Flat buffer position holding world coordinate `(x, y)`.
    #[inline]
    pub fn buffer_index(&self, x: i64, y: i64) -> usize {
        let (i, j) = self.world_to_slot(x, y);
        self.slot_index(i, j)
    }

    /// Whether `coord` is within `half` of the center.
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.center.chebyshev_distance(coord) <= self.half as u64
    }

    pub fn bounds(&self) -> ChunkBounds {
        ChunkBounds::around(self.center, self.half)
    }
}
