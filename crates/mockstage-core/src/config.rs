//! Engine configuration.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Default grid cell size in canvas units.
pub const DEFAULT_GRID_SIZE: f64 = 8.0;

/// Configuration the embedder feeds the engine each session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grid cell size in canvas units.
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,
    /// Quantize move/resize deltas to the grid.
    #[serde(default = "default_true")]
    pub snap_to_grid: bool,
    /// Prefer alignment-guide deltas over the grid while dragging.
    #[serde(default = "default_true")]
    pub snap_to_guides: bool,
    /// Expose detected guides for overlay rendering.
    #[serde(default = "default_true")]
    pub show_guides: bool,
}

fn default_grid_size() -> f64 {
    DEFAULT_GRID_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: true,
            snap_to_guides: true,
            show_guides: true,
        }
    }
}

impl EngineConfig {
    /// Serialize the config to JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize and validate a config from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the snap math cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(EngineError::InvalidGeometry(format!(
                "grid_size must be finite and positive, got {}",
                self.grid_size
            )));
        }
        Ok(())
    }
}
