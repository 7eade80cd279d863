//! Display formatting for track statistics.
//!
//! Accumulation never rounds; rounding happens here, once, for display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hover::HoverInfo;
use crate::metrics::TrackMetrics;

/// Statistics rounded for a stat card or summary line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    /// Distance in km, two decimals
    pub distance_km: f64,
    /// Whole meters
    pub elevation_gain_m: i64,
    pub elevation_loss_m: i64,
    pub elevation_min_m: i64,
    pub elevation_max_m: i64,
    /// Percent, one decimal
    pub max_slope_percent: f64,
    /// False when every raw elevation is 0 (track without elevation data)
    pub has_elevation: bool,
    pub point_count: usize,
}

impl TrackSummary {
    pub fn from_metrics(metrics: &TrackMetrics) -> Self {
        Self {
            distance_km: round_to(metrics.total_distance_km(), 2),
            elevation_gain_m: round_half_up(metrics.elevation_gain) as i64,
            elevation_loss_m: round_half_up(metrics.elevation_loss) as i64,
            elevation_min_m: round_half_up(metrics.elevation_min) as i64,
            elevation_max_m: round_half_up(metrics.elevation_max) as i64,
            max_slope_percent: round_to(metrics.max_slope_percent(), 1),
            has_elevation: metrics.raw_elevations.iter().any(|&e| e != 0.0),
            point_count: metrics.len(),
        }
    }
}

impl fmt::Display for TrackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Distance:      {:.2} km", self.distance_km)?;
        if self.has_elevation {
            writeln!(f, "Elevation +:   {} m", self.elevation_gain_m)?;
            writeln!(f, "Elevation -:   {} m", self.elevation_loss_m)?;
            writeln!(f, "Elevation min: {} m", self.elevation_min_m)?;
            writeln!(f, "Elevation max: {} m", self.elevation_max_m)?;
            write!(f, "Max slope:     {:.1} %", self.max_slope_percent)
        } else {
            write!(f, "(no elevation data)")
        }
    }
}

/// Tooltip lines for a hovered chart point.
///
/// The slope line is omitted on the first point.
pub fn format_hover_tooltip(info: &HoverInfo) -> Vec<String> {
    let mut lines = vec![format!("Altitude: {} m", round_half_up(info.elevation_m) as i64)];
    if let Some(slope) = info.slope_percent {
        lines.push(format!("Slope: {:.1} %", slope));
    }
    lines
}

/// Halves round toward +infinity, so -2.5 m reads as -2 m like 2.5 m reads as 3 m.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    round_half_up(value * factor) / factor
}
