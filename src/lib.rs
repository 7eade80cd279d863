//! # Trail Metrics
//!
//! Trail statistics and elevation profiles for GPS tracks.
//!
//! This library provides:
//! - Elevation smoothing with a boundary-clipped moving average
//! - Distance, elevation gain/loss, min/max elevation and max slope
//! - Chart-ready profile series with chart ↔ map hover lookups
//! - An explicit view session for the presentation layer
//!
//! ## Features
//!
//! - **`gpx`** - Load tracks from GPX files
//! - **`async`** - Single-shot async track loading (tokio)
//! - **`parallel`** - Parallel batch summaries with rayon
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`cli`** - Build the `trail-metrics` command line tool
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use trail_metrics::{compute_track_metrics, GeoSample, MetricsConfig, TrackSummary};
//!
//! let samples = vec![
//!     GeoSample::new(48.6482, 0.6728, 212.0),
//!     GeoSample::new(48.6490, 0.6740, 218.5),
//!     GeoSample::new(48.6501, 0.6752, 215.0),
//! ];
//!
//! let metrics = compute_track_metrics(&samples, &MetricsConfig::default());
//! let summary = TrackSummary::from_metrics(&metrics);
//! println!("{}", summary);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, TrailMetricsError};

// Geographic utilities (distance, bounds)
pub mod geo_utils;

// Elevation smoothing
pub mod smoothing;
pub use smoothing::{smooth, DEFAULT_SMOOTHING_WINDOW};

// Metrics pipeline
pub mod metrics;
pub use metrics::{
    compute_track_metrics, ChartAxes, ChartPoint, MetricsConfig, TrackMetrics,
    DEFAULT_MIN_SLOPE_SEGMENT_M,
};

// Chart <-> map hover lookups
pub mod hover;
pub use hover::{
    hover_info, nearest_chart_index, position_at, slope_percent_at, HoverInfo, TrackSpatialIndex,
};

// Display formatting
pub mod summary;
pub use summary::{format_hover_tooltip, TrackSummary};

// Presentation-layer view session
pub mod session;
pub use session::{ActiveTrack, ViewSession};

// Batch computation over many tracks
pub mod batch;
pub use batch::compute_metrics_batch;

// GPX track loading
#[cfg(feature = "gpx")]
pub mod gpx_loader;
#[cfg(feature = "gpx")]
pub use gpx_loader::{load_gpx_file, parse_gpx, ParsedTrack};

// Single-shot async loading
#[cfg(feature = "async")]
pub mod loader;
#[cfg(feature = "async")]
pub use loader::{load_track, LoadedTrack};

// FFI bindings for mobile platforms (iOS/Android)
#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
pub(crate) fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("TrailMetricsRust"),
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
pub(crate) fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use trail_metrics::GpsPoint;
/// let point = GpsPoint::new(48.6482, 0.6728);
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// One point of a track: position plus elevation.
///
/// Elevation is in meters. A sample read without elevation data carries 0,
/// which keeps distance statistics usable for flat (2D) tracks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct GeoSample {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl GeoSample {
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }

    /// Create a sample from source data where elevation may be absent.
    pub fn from_optional(latitude: f64, longitude: f64, elevation: Option<f64>) -> Self {
        Self::new(latitude, longitude, elevation.unwrap_or(0.0))
    }

    /// Plan-view position of this sample.
    pub fn position(&self) -> GpsPoint {
        GpsPoint::new(self.latitude, self.longitude)
    }
}

/// Bounding box for a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

// ============================================================================
// Tests
// ============================================================================
