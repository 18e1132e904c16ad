//! Records held by the toroidal window.
//!
//! A [`Chunk`] is the cached state of one world coordinate. The window owns every
//! chunk; external payload systems may flip the `loaded` flag between moves but can
//! never change which coordinate a chunk stands for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer world coordinate of a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i64,
    pub y: i64,
}

impl ChunkCoord {
    pub const ORIGIN: ChunkCoord = ChunkCoord { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance to another coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use toroid_core::ChunkCoord;
    ///
    /// let a = ChunkCoord::new(-2, 3);
    /// assert_eq!(a.chebyshev_distance(ChunkCoord::new(1, 4)), 3);
    /// ```
    pub fn chebyshev_distance(self, other: ChunkCoord) -> u64 {
        self.x
            .abs_diff(other.x)
            .max(self.y.abs_diff(other.y))
    }
}

impl From<(i64, i64)> for ChunkCoord {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive axis-aligned square of world coordinates covered by a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkBounds {
    pub min: ChunkCoord,
    pub max: ChunkCoord,
}

impl ChunkBounds {
    /// Square of Chebyshev radius `half` around `center`.
    pub fn around(center: ChunkCoord, half: i64) -> Self {
        Self {
            min: ChunkCoord::new(center.x - half, center.y - half),
            max: ChunkCoord::new(center.x + half, center.y + half),
        }
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        coord.x >= self.min.x
            && coord.x <= self.max.x
            && coord.y >= self.min.y
            && coord.y <= self.max.y
    }

    /// Every coordinate inside the bounds, x-major.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> {
        let (min, max) = (self.min, self.max);
        (min.x..=max.x).flat_map(move |x| (min.y..=max.y).map(move |y| ChunkCoord::new(x, y)))
    }
}

/// One slot's worth of cached state.
///
/// The coordinate is fixed at creation. `loaded` starts out `false` and stands in for
/// "the payload for this coordinate is ready".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    coord: ChunkCoord,
    loaded: bool,
}

impl Chunk {
    /// Create a fresh, not yet loaded chunk.
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            loaded: false,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn x(&self) -> i64 {
        self.coord.x
    }

    pub fn y(&self) -> i64 {
        self.coord.y
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chunk_is_not_loaded() {
        let chunk = Chunk::new(ChunkCoord::new(-3, 7));
        assert_eq!(chunk.x(), -3);
        assert_eq!(chunk.y(), 7);
        assert!(!chunk.is_loaded());
    }

    #[test]
    fn test_set_loaded() {
        let mut chunk = Chunk::new(ChunkCoord::ORIGIN);
        chunk.set_loaded(true);
        assert!(chunk.is_loaded());
        assert_eq!(chunk.coord(), ChunkCoord::ORIGIN);
    }

    #[test]
    fn test_chebyshev_distance() {
        let c = ChunkCoord::new(0, 0);
        assert_eq!(c.chebyshev_distance(c), 0);
        assert_eq!(c.chebyshev_distance(ChunkCoord::new(-2, 1)), 2);
        assert_eq!(c.chebyshev_distance(ChunkCoord::new(1, -5)), 5);
        assert_eq!(
            ChunkCoord::new(i64::MIN, 0).chebyshev_distance(ChunkCoord::new(i64::MAX, 0)),
            u64::MAX
        );
    }

    #[test]
    fn test_bounds_around() {
        let bounds = ChunkBounds::around(ChunkCoord::new(-4, -2), 2);
        assert_eq!(bounds.min, ChunkCoord::new(-6, -4));
        assert_eq!(bounds.max, ChunkCoord::new(-2, 0));
        assert!(bounds.contains(ChunkCoord::new(-6, 0)));
        assert!(!bounds.contains(ChunkCoord::new(-1, 0)));
        assert!(!bounds.contains(ChunkCoord::new(-4, -5)));
    }

    #[test]
    fn test_bounds_coords() {
        let bounds = ChunkBounds::around(ChunkCoord::new(1, 1), 1);
        let coords: Vec<_> = bounds.coords().collect();
        assert_eq!(coords.len(), 9);
        assert_eq!(coords[0], ChunkCoord::new(0, 0));
        assert_eq!(coords[8], ChunkCoord::new(2, 2));
    }

    #[test]
    fn test_chunk_serde() {
        let mut chunk = Chunk::new(ChunkCoord::new(5, -1));
        chunk.set_loaded(true);
        let json = serde_json::to_string(&chunk).unwrap();
        assert_eq!(json, r#"{"coord":{"x":5,"y":-1},"loaded":true}"#);
    }
}
