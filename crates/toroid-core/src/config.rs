use serde::{Deserialize, Serialize};

use crate::error::WindowError;

/// Radius used when nothing else is configured.
pub const DEFAULT_HALF: i64 = 12;

/// Window configuration as it arrives from a document or the environment.
///
/// The radius is kept signed so that negative values can be reported as
/// [`WindowError::InvalidConfiguration`] instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Chebyshev radius of the window.
    pub half: i64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { half: DEFAULT_HALF }
    }
}

impl WindowConfig {
    pub fn new(half: i64) -> Self {
        Self { half }
    }

    /// Parse a JSON document such as `{"half": 4}`. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, WindowError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the radius and return it as an unsigned value.
    pub fn validate(&self) -> Result<usize, WindowError> {
        usize::try_from(self.half).map_err(|_| {
            WindowError::InvalidConfiguration(format!(
                "radius must be non-negative, got {}",
                self.half
            ))
        })
    }
}
