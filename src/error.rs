//! Unified error handling for the trail-metrics library.
//!
//! The metrics pipeline itself never fails: empty tracks and missing
//! elevations are valid inputs with defined results. Errors only come from
//! the outer surfaces (track file loading, user-supplied configuration and
//! the async loader).

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for trail-metrics operations.
#[derive(Debug, Error)]
pub enum TrailMetricsError {
    /// Reading a track file from disk failed
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Track file could not be parsed as GPX
    #[error("Failed to parse GPX '{source_name}': {message}")]
    GpxParse {
        source_name: String,
        message: String,
    },
    /// Track file parsed but contains neither track nor route points
    #[error("Track '{source_name}' contains no track or route points")]
    NoTrackPoints { source_name: String },
    /// Configuration error
    #[error("Configuration error: {message}")]
    InvalidConfig { message: String },
    /// Background load task panicked or was cancelled
    #[error("Track load task failed: {message}")]
    TaskFailed { message: String },
}

/// Result type alias for trail-metrics operations.
pub type Result<T> = std::result::Result<T, TrailMetricsError>;
