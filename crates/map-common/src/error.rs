//! Error types for the quake-map crates.

use thiserror::Error;

/// Result type alias using MapError.
pub type MapResult<T> = Result<T, MapError>;

/// Primary error type for map rendering operations.
///
/// Only configuration-level failures surface as errors. Missing
/// per-feature references (an observation code absent from the location
/// table, an area code with no geometry) are recovered locally by
/// skipping that feature and never reach this type.
#[derive(Debug, Error)]
pub enum MapError {
    // === Configuration Errors ===
    #[error("Invalid topology document: {0}")]
    InvalidTopology(String),

    #[error("Topology layer not found: {0}")]
    LayerNotFound(String),

    #[error("Arc index {index} out of range (arc table holds {len})")]
    ArcIndexOutOfRange { index: usize, len: usize },

    #[error("Invalid location table record: {0}")]
    InvalidLocationRecord(String),

    #[error("Invalid color scheme: {0}")]
    InvalidColorScheme(String),

    #[error("Invalid font data")]
    InvalidFont,

    // === Rendering Errors ===
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    PngEncoding(String),
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::InvalidTopology(format!("JSON error: {}", err))
    }
}
