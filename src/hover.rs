//! Hover synchronization between the elevation chart and the map.
//!
//! Chart points and track samples share one index space, so chart → map is
//! a plain index lookup. Map → chart goes through an R-tree over the sample
//! positions.

use std::cmp::Ordering;

use rstar::primitives::GeomWithData;
use rstar::RTree;
use serde::{Deserialize, Serialize};

use crate::geo_utils::{haversine_distance, EARTH_RADIUS_M};
use crate::metrics::{ChartPoint, TrackMetrics};
use crate::{GeoSample, GpsPoint};

/// Everything the tooltip and the map marker need for one hovered point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct HoverInfo {
    pub index: u32,
    /// Original (unsmoothed) sample position for the marker
    pub position: GpsPoint,
    pub distance_km: f64,
    /// Smoothed elevation, as drawn on the chart
    pub elevation_m: f64,
    /// Local slope in percent; `None` on the first point
    pub slope_percent: Option<f64>,
}

/// Marker position for chart index `index`.
pub fn position_at(samples: &[GeoSample], index: usize) -> Option<GpsPoint> {
    samples.get(index).map(GeoSample::position)
}

/// Slope in percent between chart point `index - 1` and `index`.
///
/// Computed on the smoothed series for a steadier readout. This is
/// intentionally not the same formula as [`TrackMetrics::max_slope_ratio`],
/// which uses raw elevations. Returns 0 for the first point, for an index out
/// of range and for zero-length steps.
pub fn slope_percent_at(chart_points: &[ChartPoint], index: usize) -> f64 {
    if index == 0 || index >= chart_points.len() {
        return 0.0;
    }
    let prev = &chart_points[index - 1];
    let curr = &chart_points[index];
    let distance_m = (curr.distance_km - prev.distance_km) * 1000.0;
    if distance_m > 0.0 {
        (curr.elevation_m - prev.elevation_m) / distance_m * 100.0
    } else {
        0.0
    }
}

/// Index of the chart point whose distance is closest to `distance_km`.
///
/// Binary search over the non-decreasing x axis. Ties resolve to the lower
/// index. `None` for an empty chart.
pub fn nearest_chart_index(chart_points: &[ChartPoint], distance_km: f64) -> Option<usize> {
    if chart_points.is_empty() || distance_km.is_nan() {
        return None;
    }

    // First index with distance >= target
    let upper = chart_points.partition_point(|p| p.distance_km < distance_km);
    if upper == 0 {
        return Some(0);
    }
    if upper >= chart_points.len() {
        return Some(chart_points.len() - 1);
    }

    let before = distance_km - chart_points[upper - 1].distance_km;
    let after = chart_points[upper].distance_km - distance_km;
    if before <= after {
        Some(upper - 1)
    } else {
        Some(upper)
    }
}

/// Build the hover payload for chart index `index`.
pub fn hover_info(samples: &[GeoSample], metrics: &TrackMetrics, index: usize) -> Option<HoverInfo> {
    let position = position_at(samples, index)?;
    let point = metrics.chart_points.get(index)?;
    Some(HoverInfo {
        index: index as u32,
        position,
        distance_km: point.distance_km,
        elevation_m: point.elevation_m,
        slope_percent: (index > 0).then(|| slope_percent_at(&metrics.chart_points, index)),
    })
}

/// Candidates re-ranked by great-circle distance after the planar query.
const RERANK_CANDIDATES: usize = 4;

/// Sample position projected to local meters, tagged with its chart index
/// and original coordinates.
type ProjectedSample = GeomWithData<[f64; 2], (usize, GpsPoint)>;

/// Spatial index over a track's samples, for map pointer → chart index.
///
/// Positions are projected equirectangularly around the track's mean
/// latitude, so a degree of longitude counts for `cos(lat)` of a degree of
/// latitude, as it does on the ground.
#[derive(Debug, Clone)]
pub struct TrackSpatialIndex {
    tree: RTree<ProjectedSample>,
    lng_scale: f64,
}

impl TrackSpatialIndex {
    pub fn build(samples: &[GeoSample]) -> Self {
        let lng_scale = if samples.is_empty() {
            1.0
        } else {
            let mean_lat = samples.iter().map(|s| s.latitude).sum::<f64>() / samples.len() as f64;
            mean_lat.to_radians().cos()
        };

        let projected: Vec<ProjectedSample> = samples
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let position = s.position();
                GeomWithData::new(project(&position, lng_scale), (i, position))
            })
            .collect();

        Self {
            tree: RTree::bulk_load(projected),
            lng_scale,
        }
    }

    /// Index of the sample nearest to `point` on the ground.
    ///
    /// When a track passes the same spot twice, either visit may be returned.
    pub fn nearest_index(&self, point: &GpsPoint) -> Option<usize> {
        self.tree
            .nearest_neighbor_iter(&project(point, self.lng_scale))
            .take(RERANK_CANDIDATES)
            .map(|candidate| {
                let (idx, position) = candidate.data;
                (idx, haversine_distance(point, &position))
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .map(|(idx, _)| idx)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

fn project(point: &GpsPoint, lng_scale: f64) -> [f64; 2] {
    [
        point.longitude.to_radians() * lng_scale * EARTH_RADIUS_M,
        point.latitude.to_radians() * EARTH_RADIUS_M,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(points: &[(f64, f64)]) -> Vec<ChartPoint> {
        points
            .iter()
            .map(|&(distance_km, elevation_m)| ChartPoint {
                distance_km,
                elevation_m,
            })
            .collect()
    }

    #[test]
    fn test_slope_percent_first_point_is_zero() {
        let c = chart(&[(0.0, 100.0), (0.1, 110.0)]);
        assert_eq!(slope_percent_at(&c, 0), 0.0);
    }

    #[test]
    fn test_slope_percent_interior() {
        let c = chart(&[(0.0, 100.0), (0.1, 110.0), (0.2, 105.0)]);
        assert!((slope_percent_at(&c, 1) - 10.0).abs() < 1e-9);
        assert!((slope_percent_at(&c, 2) + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_slope_percent_zero_distance() {
        let c = chart(&[(0.5, 100.0), (0.5, 140.0)]);
        assert_eq!(slope_percent_at(&c, 1), 0.0);
    }

    #[test]
    fn test_slope_percent_out_of_range() {
        let c = chart(&[(0.0, 100.0)]);
        assert_eq!(slope_percent_at(&c, 7), 0.0);
    }

    #[test]
    fn test_nearest_chart_index() {
        let c = chart(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (3.0, 0.0)]);
        assert_eq!(nearest_chart_index(&c, -1.0), Some(0));
        assert_eq!(nearest_chart_index(&c, 0.4), Some(0));
        assert_eq!(nearest_chart_index(&c, 0.5), Some(0));
        assert_eq!(nearest_chart_index(&c, 0.6), Some(1));
        assert_eq!(nearest_chart_index(&c, 1.0), Some(1));
        assert_eq!(nearest_chart_index(&c, 2.5), Some(3));
        assert_eq!(nearest_chart_index(&c, 10.0), Some(3));
        assert_eq!(nearest_chart_index(&[], 1.0), None);
    }

    #[test]
    fn test_spatial_index_nearest() {
        let samples = vec![
            GeoSample::new(48.64, 0.67, 0.0),
            GeoSample::new(48.65, 0.68, 0.0),
            GeoSample::new(48.66, 0.69, 0.0),
        ];
        let index = TrackSpatialIndex::build(&samples);
        assert_eq!(index.len(), 3);
        assert_eq!(index.nearest_index(&GpsPoint::new(48.651, 0.679)), Some(1));
        assert!(TrackSpatialIndex::build(&[]).nearest_index(&GpsPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_spatial_index_nearest_on_ground_at_high_latitude() {
        // At 60N a degree of longitude is half a degree of latitude:
        // the first sample is ~55.6m away, the second ~44.5m.
        let samples = vec![
            GeoSample::new(60.0005, 0.0, 0.0),
            GeoSample::new(60.0, 0.0008, 0.0),
        ];
        let index = TrackSpatialIndex::build(&samples);
        assert_eq!(index.nearest_index(&GpsPoint::new(60.0, 0.0)), Some(1));
    }
}
