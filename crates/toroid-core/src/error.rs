use thiserror::Error;

/// Errors produced by the toroidal window and its configuration.
#[derive(Error, Debug)]
pub enum WindowError {
    /// The window could not be constructed with the requested radius.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A world coordinate lies outside the square the window currently covers.
    #[error("Chunk ({x}, {y}) is outside the window")]
    OutOfWindow { x: i64, y: i64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
