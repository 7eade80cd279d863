//! Tests for chart <-> map hover lookups

use trail_metrics::{
    compute_track_metrics, hover_info, nearest_chart_index, position_at, slope_percent_at,
    GeoSample, GpsPoint, MetricsConfig, TrackSpatialIndex, ViewSession,
};

fn climb() -> Vec<GeoSample> {
    // 0.001 deg steps along the equator (~111m), rising then falling
    [100.0, 104.0, 112.0, 125.0, 131.0, 128.0, 120.0, 118.0]
        .iter()
        .enumerate()
        .map(|(i, &ele)| GeoSample::new(0.0, i as f64 * 0.001, ele))
        .collect()
}

#[test]
fn test_position_at_returns_original_coordinates() {
    let samples = climb();
    for (i, s) in samples.iter().enumerate() {
        assert_eq!(position_at(&samples, i), Some(GpsPoint::new(s.latitude, s.longitude)));
    }
    assert_eq!(position_at(&samples, samples.len()), None);
}

#[test]
fn test_tooltip_slope_uses_smoothed_series() {
    let samples = climb();
    let m = compute_track_metrics(&samples, &MetricsConfig::default());

    let i = 3;
    let prev = m.chart_points[i - 1];
    let curr = m.chart_points[i];
    let expected = 100.0 * (curr.elevation_m - prev.elevation_m)
        / ((curr.distance_km - prev.distance_km) * 1000.0);
    assert!((slope_percent_at(&m.chart_points, i) - expected).abs() < 1e-9);

    // The raw step 112 -> 125 would read ~11.7%; the smoothed readout is gentler
    let raw = 100.0 * 13.0 / (m.cumulative_distances[i] - m.cumulative_distances[i - 1]);
    assert!(slope_percent_at(&m.chart_points, i) < raw);
}

#[test]
fn test_hover_info_first_point_has_no_slope() {
    let samples = climb();
    let m = compute_track_metrics(&samples, &MetricsConfig::default());
    let first = hover_info(&samples, &m, 0).unwrap();
    assert_eq!(first.slope_percent, None);
    assert_eq!(first.distance_km, 0.0);

    let later = hover_info(&samples, &m, 4).unwrap();
    assert!(later.slope_percent.is_some());
    assert_eq!(later.position, samples[4].position());
    assert!(hover_info(&samples, &m, 99).is_none());
}

#[test]
fn test_nearest_chart_index_round_trips_every_point() {
    let samples = climb();
    let m = compute_track_metrics(&samples, &MetricsConfig::default());
    for (i, p) in m.chart_points.iter().enumerate() {
        assert_eq!(nearest_chart_index(&m.chart_points, p.distance_km), Some(i));
    }
}

#[test]
fn test_spatial_index_finds_sample_near_pointer() {
    let samples = climb();
    let index = TrackSpatialIndex::build(&samples);
    // Pointer slightly north of sample 5
    assert_eq!(index.nearest_index(&GpsPoint::new(0.0001, 0.005)), Some(5));
}

#[test]
fn test_session_chart_and_map_hover_agree() {
    let samples = climb();
    let mut session = ViewSession::load("climb", samples.clone(), &MetricsConfig::default());

    let from_chart = *session.hover_distance_km(0.333).unwrap();
    let from_map = *session.hover_map_position(samples[3].position()).unwrap();
    assert_eq!(from_chart.index, 3);
    assert_eq!(from_chart, from_map);
}
