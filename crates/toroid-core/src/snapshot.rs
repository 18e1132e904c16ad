use serde::{Deserialize, Serialize};

use crate::chunk::{Chunk, ChunkCoord};
use crate::error::WindowError;
use crate::window::ToroidalWindow;

/// Point-in-time copy of a window's contents for renderers and debugging.
///
/// Chunks are sorted by `(x, y)` so two snapshots of equal windows compare equal
/// regardless of storage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub center: ChunkCoord,
    pub half: usize,
    pub chunks: Vec<Chunk>,
}

impl WindowSnapshot {
    pub fn loaded_count(&self) -> usize {
        self.chunks.iter().filter(|chunk| chunk.is_loaded()).count()
    }

    pub fn to_json(&self) -> Result<String, WindowError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, WindowError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&ToroidalWindow> for WindowSnapshot {
    fn from(window: &ToroidalWindow) -> Self {
        let mut chunks: Vec<Chunk> = window.iter().cloned().collect();
        chunks.sort_by_key(Chunk::coord);
        Self {
            center: window.center(),
            half: window.half(),
            chunks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_sorted() {
        let mut window = ToroidalWindow::new(1).unwrap();
        window.move_by(-1, 2);
        window.mark_loaded(-2, 1).unwrap();

        let snapshot = window.snapshot();
        assert_eq!(snapshot.center, ChunkCoord::new(-1, 2));
        assert_eq!(snapshot.half, 1);
        assert_eq!(snapshot.chunks.len(), 9);
        assert_eq!(snapshot.chunks[0].coord(), ChunkCoord::new(-2, 1));
        assert_eq!(snapshot.chunks[8].coord(), ChunkCoord::new(0, 3));
        assert_eq!(snapshot.loaded_count(), 1);
    }

    #[test]
    fn test_equal_windows_equal_snapshots() {
        let mut walked = ToroidalWindow::new(2).unwrap();
        walked.move_by(3, 0);
        walked.move_by(-1, 4);

        let mut jumped = ToroidalWindow::new(2).unwrap();
        jumped.set_center(2, 4);

        assert_eq!(walked.snapshot(), jumped.snapshot());
    }

    #[test]
    fn test_json() {
        let window = ToroidalWindow::new(0).unwrap();
        let json = window.snapshot().to_json().unwrap();
        assert_eq!(
            json,
            r#"{"center":{"x":0,"y":0},"half":0,"chunks":[{"coord":{"x":0,"y":0},"loaded":false}]}"#
        );
        assert_eq!(WindowSnapshot::from_json(&json).unwrap(), window.snapshot());
        assert!(matches!(
            WindowSnapshot::from_json("[]"),
            Err(WindowError::Serialization(_))
        ));
    }
}
