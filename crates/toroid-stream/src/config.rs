use std::env;

use toroid_core::{WindowConfig, DEFAULT_HALF};

/// Chunk width used when `TOROID_CHUNK_WIDTH` is not set.
pub const DEFAULT_CHUNK_WIDTH: u32 = 8;

/// Streaming configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Chebyshev radius of the chunk window
    pub half: i64,
    /// Width of one chunk in world units
    pub chunk_width: u32,
    /// Maximum loads per `load_pending` call, 0 for no limit
    pub load_budget: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            half: DEFAULT_HALF,
            chunk_width: DEFAULT_CHUNK_WIDTH,
            load_budget: 0,
        }
    }
}

impl StreamConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let half = lookup("TOROID_HALF")
            .unwrap_or_else(|| DEFAULT_HALF.to_string())
            .parse()?;
        let chunk_width: u32 = lookup("TOROID_CHUNK_WIDTH")
            .unwrap_or_else(|| DEFAULT_CHUNK_WIDTH.to_string())
            .parse()?;
        let load_budget = lookup("TOROID_LOAD_BUDGET")
            .unwrap_or_else(|| "0".to_string())
            .parse()?;

        if chunk_width == 0 {
            anyhow::bail!("TOROID_CHUNK_WIDTH must be positive");
        }

        Ok(Self {
            half,
            chunk_width,
            load_budget,
        })
    }

    pub fn window(&self) -> WindowConfig {
        WindowConfig::new(self.half)
    }
}
