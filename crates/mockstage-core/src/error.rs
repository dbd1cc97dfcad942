//! Error types for boundary validation.
//!
//! Geometry math never returns errors; degenerate input is tolerated as a
//! silent no-op. These types exist for the edges where the engine meets
//! stored data (scene and config JSON) so the caller has something to log.

use thiserror::Error;

/// Result type for engine boundary operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced at the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An element or config value carries non-finite or otherwise unusable
    /// geometry.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Scene or config serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
