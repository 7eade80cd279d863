//! Track metrics computation.
//!
//! Turns an ordered sequence of [`GeoSample`]s into a [`TrackMetrics`]:
//! smoothed profile, cumulative distance, gain/loss, min/max elevation and
//! maximum slope, plus the chart series the profile widget draws.
//!
//! Two elevation series flow through this module and are never merged:
//! - **raw** elevations drive gain/loss, min/max and the max slope
//! - **smoothed** elevations drive the chart (and the per-point tooltip slope,
//!   see [`crate::hover::slope_percent_at`])
//!
//! ## Example
//! ```rust
//! use trail_metrics::{compute_track_metrics, GeoSample, MetricsConfig};
//!
//! let samples = vec![
//!     GeoSample::new(0.0, 0.000, 100.0),
//!     GeoSample::new(0.0, 0.001, 110.0),
//!     GeoSample::new(0.0, 0.002, 90.0),
//! ];
//! let metrics = compute_track_metrics(&samples, &MetricsConfig::default());
//! assert_eq!(metrics.elevation_gain, 10.0);
//! assert_eq!(metrics.elevation_loss, 20.0);
//! assert_eq!(metrics.chart_points.len(), 3);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrailMetricsError};
use crate::geo_utils::{compute_bounds, haversine_distance};
use crate::smoothing::{smooth, DEFAULT_SMOOTHING_WINDOW};
use crate::{Bounds, GeoSample, GpsPoint};

/// Default minimum segment length (meters) for a max-slope candidate.
pub const DEFAULT_MIN_SLOPE_SEGMENT_M: f64 = 3.0;

/// Configuration for the metrics pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct MetricsConfig {
    /// Neighbours on each side averaged by the elevation smoothing.
    /// Default: 5 (up to an 11-point average)
    pub smoothing_window: u32,

    /// Segments at or below this length (meters) never update the max slope.
    /// Filters GPS jitter between near-identical fixes. Default: 3.0
    pub min_slope_segment_m: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_SMOOTHING_WINDOW as u32,
            min_slope_segment_m: DEFAULT_MIN_SLOPE_SEGMENT_M,
        }
    }
}

impl MetricsConfig {
    /// Check a user-supplied configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.min_slope_segment_m.is_finite() || self.min_slope_segment_m < 0.0 {
            return Err(TrailMetricsError::InvalidConfig {
                message: format!(
                    "min_slope_segment_m must be a finite, non-negative distance (got {})",
                    self.min_slope_segment_m
                ),
            });
        }
        Ok(())
    }
}

/// One point of the elevation profile chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ChartPoint {
    /// Cumulative distance along the track in kilometers
    pub distance_km: f64,
    /// Smoothed elevation in meters
    pub elevation_m: f64,
}

/// Axis ranges for the profile chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ChartAxes {
    pub x_min_km: f64,
    pub x_max_km: f64,
    /// Lowest smoothed elevation
    pub y_min_m: f64,
    /// Highest smoothed elevation
    pub y_max_m: f64,
}

/// Statistics and series derived from one track.
///
/// Produced fresh for every load and never mutated afterwards. All series
/// are index-aligned with the input samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct TrackMetrics {
    /// Elevations as read from the track (missing values already set to 0)
    pub raw_elevations: Vec<f64>,
    /// Moving-average elevations used for display
    pub smoothed_elevations: Vec<f64>,
    /// Distance from the first sample in meters
    pub cumulative_distances: Vec<f64>,
    /// Total distance in meters
    pub total_distance: f64,
    /// Sum of raw ascents in meters
    pub elevation_gain: f64,
    /// Sum of raw descents in meters
    pub elevation_loss: f64,
    /// Lowest raw elevation (0 for an empty track)
    pub elevation_min: f64,
    /// Highest raw elevation (0 for an empty track)
    pub elevation_max: f64,
    /// Steepest raw ascent as rise/run
    pub max_slope_ratio: f64,
    /// (km, smoothed elevation) pairs for the profile chart
    pub chart_points: Vec<ChartPoint>,
    /// Bounding box for fitting the map view
    pub bounds: Option<Bounds>,
}

impl TrackMetrics {
    /// Number of samples the metrics were computed from.
    pub fn len(&self) -> usize {
        self.chart_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chart_points.is_empty()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance / 1000.0
    }

    pub fn max_slope_percent(&self) -> f64 {
        self.max_slope_ratio * 100.0
    }

    /// Axis ranges for the chart, or `None` for an empty track.
    pub fn chart_axes(&self) -> Option<ChartAxes> {
        if self.is_empty() {
            return None;
        }
        let (y_min_m, y_max_m) = self
            .smoothed_elevations
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &e| {
                (lo.min(e), hi.max(e))
            });
        Some(ChartAxes {
            x_min_km: 0.0,
            x_max_km: self.total_distance_km(),
            y_min_m,
            y_max_m,
        })
    }

    /// Serialize for a JS chart/summary consumer.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Running state of the accumulation pass.
struct Accumulator {
    total_distance: f64,
    elevation_gain: f64,
    elevation_loss: f64,
    elevation_min: f64,
    elevation_max: f64,
    max_slope_ratio: f64,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            total_distance: 0.0,
            elevation_gain: 0.0,
            elevation_loss: 0.0,
            elevation_min: f64::INFINITY,
            elevation_max: f64::NEG_INFINITY,
            max_slope_ratio: 0.0,
        }
    }

    fn observe_elevation(&mut self, raw_elevation: f64) {
        self.elevation_min = self.elevation_min.min(raw_elevation);
        self.elevation_max = self.elevation_max.max(raw_elevation);
    }

    /// Fold one segment into the totals. `delta_elevation` is raw.
    fn add_segment(&mut self, segment_distance: f64, delta_elevation: f64, min_slope_segment_m: f64) {
        self.total_distance += segment_distance;

        if delta_elevation > 0.0 {
            self.elevation_gain += delta_elevation;
        } else {
            self.elevation_loss += delta_elevation.abs();
        }

        if segment_distance > min_slope_segment_m && delta_elevation > 0.0 {
            let slope = delta_elevation / segment_distance;
            if slope > self.max_slope_ratio {
                self.max_slope_ratio = slope;
            }
        }
    }
}

/// Compute all statistics for one track in a single left-to-right pass.
///
/// Never fails: an empty track yields zero distance, zero gain/loss and
/// empty series.
pub fn compute_track_metrics(samples: &[GeoSample], config: &MetricsConfig) -> TrackMetrics {
    let raw_elevations: Vec<f64> = samples.iter().map(|s| s.elevation).collect();
    let smoothed_elevations = smooth(&raw_elevations, config.smoothing_window as usize);
    accumulate(samples, &raw_elevations, smoothed_elevations, config)
}

fn accumulate(
    samples: &[GeoSample],
    raw_elevations: &[f64],
    smoothed_elevations: Vec<f64>,
    config: &MetricsConfig,
) -> TrackMetrics {
    let mut acc = Accumulator::new();
    let mut cumulative_distances = Vec::with_capacity(samples.len());
    let mut chart_points = Vec::with_capacity(samples.len());

    for i in 0..samples.len() {
        acc.observe_elevation(raw_elevations[i]);

        if i > 0 {
            let segment_distance =
                haversine_distance(&samples[i - 1].position(), &samples[i].position());
            let delta_elevation = raw_elevations[i] - raw_elevations[i - 1];
            acc.add_segment(segment_distance, delta_elevation, config.min_slope_segment_m);
        }

        cumulative_distances.push(acc.total_distance);
        chart_points.push(ChartPoint {
            distance_km: acc.total_distance / 1000.0,
            elevation_m: smoothed_elevations[i],
        });
    }

    let (elevation_min, elevation_max) = if samples.is_empty() {
        (0.0, 0.0)
    } else {
        (acc.elevation_min, acc.elevation_max)
    };

    let positions: Vec<GpsPoint> = samples.iter().map(GeoSample::position).collect();
    let bounds = compute_bounds(&positions);

    debug!(
        "[TrailMetrics] {} samples: {:.0}m, +{:.0}m / -{:.0}m, max slope {:.1}%",
        samples.len(),
        acc.total_distance,
        acc.elevation_gain,
        acc.elevation_loss,
        acc.max_slope_ratio * 100.0
    );

    TrackMetrics {
        raw_elevations: raw_elevations.to_vec(),
        smoothed_elevations,
        cumulative_distances,
        total_distance: acc.total_distance,
        elevation_gain: acc.elevation_gain,
        elevation_loss: acc.elevation_loss,
        elevation_min,
        elevation_max,
        max_slope_ratio: acc.max_slope_ratio,
        chart_points,
        bounds,
    }
}
