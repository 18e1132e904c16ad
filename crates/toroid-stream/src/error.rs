use thiserror::Error;
use toroid_core::ChunkCoord;

/// Failure reported by a [`ChunkLoader`](crate::loader::ChunkLoader)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Chunk {0} is not available yet")]
    NotReady(ChunkCoord),

    #[error("Failed to load chunk {coord}: {reason}")]
    Failed { coord: ChunkCoord, reason: String },
}
