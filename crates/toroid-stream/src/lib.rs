pub mod config;
pub mod error;
pub mod loader;
pub mod tracker;

pub use config::StreamConfig;
pub use error::LoadError;
pub use loader::{load_pending, pending_by_distance, ChunkLoader, LoadReport};
pub use tracker::{chunk_of, ViewpointTracker};
