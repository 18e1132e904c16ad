pub mod chunk;
pub mod config;
pub mod coord;
pub mod error;
pub mod snapshot;
pub mod window;

pub use chunk::{Chunk, ChunkBounds, ChunkCoord};
pub use config::{WindowConfig, DEFAULT_HALF};
pub use coord::{floor_mod, CoordinateMapper};
pub use error::WindowError;
pub use snapshot::WindowSnapshot;
pub use window::{MoveOutcome, ToroidalWindow};
