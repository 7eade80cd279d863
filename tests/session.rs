//! Tests for the view session lifecycle

use trail_metrics::{ActiveTrack, GeoSample, MetricsConfig, ViewSession};

fn loop_track(n: usize, base_ele: f64) -> Vec<GeoSample> {
    (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            GeoSample::new(
                48.65 + angle.sin() * 0.01,
                0.67 + angle.cos() * 0.015,
                base_ele + angle.sin() * 40.0,
            )
        })
        .collect()
}

#[test]
fn test_summary_follows_loaded_track() {
    let config = MetricsConfig::default();
    let first = ViewSession::load("parcours1", loop_track(200, 180.0), &config);
    let second = ViewSession::load("parcours4", loop_track(50, 240.0), &config);

    let s1 = first.summary().unwrap();
    let s2 = second.summary().unwrap();
    assert_eq!(s1.point_count, 200);
    assert_eq!(s2.point_count, 50);
    assert!(s2.elevation_min_m > s1.elevation_min_m);
}

#[test]
fn test_clear_drops_everything() {
    let mut session = ViewSession::load("parcours1", loop_track(20, 200.0), &MetricsConfig::default());
    session.hover_chart_index(4);
    let session = session.clear();
    assert!(session.track().is_none());
    assert!(session.hover().is_none());
    assert!(session.summary().is_none());
}

#[test]
fn test_with_precomputed_metrics() {
    let samples = loop_track(30, 150.0);
    let metrics = trail_metrics::compute_track_metrics(&samples, &MetricsConfig::default());
    let session = ViewSession::with_track(ActiveTrack::with_metrics("pre", samples, metrics.clone()));
    assert_eq!(session.metrics(), Some(&metrics));
    assert_eq!(session.track().unwrap().spatial_index.len(), 30);
}

#[test]
fn test_empty_track_session() {
    let mut session = ViewSession::load("empty", Vec::new(), &MetricsConfig::default());
    let summary = session.summary().unwrap();
    assert_eq!(summary.point_count, 0);
    assert_eq!(summary.distance_km, 0.0);
    assert!(session.hover_distance_km(1.0).is_none());
}
