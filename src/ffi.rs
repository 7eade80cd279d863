//! FFI bindings for mobile platforms (iOS/Android).
//!
//! This module provides the UniFFI bindings that expose the metrics pipeline
//! to Kotlin and Swift. All FFI functions are prefixed with `ffi_` to avoid
//! naming conflicts with the internal API.

use log::{debug, info};
use rayon::prelude::*;

use crate::{
    compute_track_metrics, hover_info, init_logging, nearest_chart_index,
    slope_percent_at, smooth, ChartPoint, GeoSample, HoverInfo, MetricsConfig, TrackMetrics,
};

/// Compute metrics for one track with the default configuration.
#[uniffi::export]
pub fn ffi_compute_track_metrics(samples: Vec<GeoSample>) -> TrackMetrics {
    init_logging();
    info!(
        "[TrailMetricsRust] compute_track_metrics called with {} samples",
        samples.len()
    );
    compute_track_metrics(&samples, &MetricsConfig::default())
}

/// Compute metrics with a custom configuration.
#[uniffi::export]
pub fn ffi_compute_track_metrics_with_config(
    samples: Vec<GeoSample>,
    config: MetricsConfig,
) -> TrackMetrics {
    init_logging();
    debug!(
        "[TrailMetricsRust] compute_track_metrics_with_config ({} samples, window {})",
        samples.len(),
        config.smoothing_window
    );
    compute_track_metrics(&samples, &config)
}

/// Compute metrics from flat coordinate buffers.
///
/// `elevations` may be shorter than the coordinate list or contain NaN for
/// points without elevation; both read as 0.
#[uniffi::export]
pub fn ffi_compute_track_metrics_flat(
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
    elevations: Vec<f64>,
    config: MetricsConfig,
) -> TrackMetrics {
    init_logging();
    let samples: Vec<GeoSample> = latitudes
        .iter()
        .zip(longitudes.iter())
        .enumerate()
        .map(|(i, (&lat, &lng))| {
            let elevation = elevations.get(i).copied().filter(|e| !e.is_nan());
            GeoSample::from_optional(lat, lng, elevation)
        })
        .collect();
    compute_track_metrics(&samples, &config)
}

/// Compute metrics for several tracks (parallel).
///
/// Returns one result per input track, in input order.
#[uniffi::export]
pub fn ffi_compute_metrics_batch(
    tracks: Vec<Vec<GeoSample>>,
    config: MetricsConfig,
) -> Vec<TrackMetrics> {
    init_logging();
    info!("[TrailMetricsRust] Batch of {} tracks", tracks.len());
    tracks
        .par_iter()
        .map(|samples| compute_track_metrics(samples, &config))
        .collect()
}

/// Moving-average smoothing of an elevation series.
#[uniffi::export]
pub fn ffi_smooth(values: Vec<f64>, window_size: u32) -> Vec<f64> {
    smooth(&values, window_size as usize)
}

/// Tooltip slope (percent) at a chart index.
#[uniffi::export]
pub fn ffi_slope_percent_at(chart_points: Vec<ChartPoint>, index: u32) -> f64 {
    slope_percent_at(&chart_points, index as usize)
}

/// Nearest chart index for an x-axis distance. Returns -1 for an empty chart.
#[uniffi::export]
pub fn ffi_nearest_chart_index(chart_points: Vec<ChartPoint>, distance_km: f64) -> i64 {
    nearest_chart_index(&chart_points, distance_km).map_or(-1, |i| i as i64)
}

/// Hover payload (marker position + tooltip values) for a chart index.
#[uniffi::export]
pub fn ffi_hover_info(
    samples: Vec<GeoSample>,
    metrics: TrackMetrics,
    index: u32,
) -> Option<HoverInfo> {
    hover_info(&samples, &metrics, index as usize)
}
