//! Tests for GPX loading

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};
use trail_metrics::{
    compute_track_metrics, load_gpx_file, parse_gpx, MetricsConfig, TrailMetricsError,
};

const ROUTE_ONLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <rte>
    <name>La butte aux loups</name>
    <rtept lat="48.6000" lon="0.6700"><ele>180</ele></rtept>
    <rtept lat="48.6010" lon="0.6700"><ele>195</ele></rtept>
    <rtept lat="48.6020" lon="0.6700"><ele>190</ele></rtept>
  </rte>
</gpx>"#;

const EMPTY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <metadata><name>nothing here</name></metadata>
</gpx>"#;

const NO_ELEVATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><trkseg>
    <trkpt lat="48.6000" lon="0.6700"></trkpt>
    <trkpt lat="48.6010" lon="0.6700"></trkpt>
  </trkseg></trk>
</gpx>"#;

#[test]
fn test_route_points_used_when_no_track() {
    let track = parse_gpx(ROUTE_ONLY.as_bytes(), "parcours7").unwrap();
    assert_eq!(track.name, "La butte aux loups");
    assert_eq!(track.samples.len(), 3);

    let m = compute_track_metrics(&track.samples, &MetricsConfig::default());
    assert_eq!(m.elevation_gain, 15.0);
    assert_eq!(m.elevation_loss, 5.0);
    // 0.002 deg of latitude
    assert!((m.total_distance - 222.39).abs() < 0.01);
}

#[test]
fn test_no_points_is_an_error() {
    let err = parse_gpx(EMPTY.as_bytes(), "empty").unwrap_err();
    assert!(matches!(err, TrailMetricsError::NoTrackPoints { .. }));
}

#[test]
fn test_missing_elevation_counted() {
    let track = parse_gpx(NO_ELEVATION.as_bytes(), "flat").unwrap();
    assert_eq!(track.name, "flat");
    assert_eq!(track.missing_elevation, 2);
    assert!(track.is_flat());
    assert!(track.samples.iter().all(|s| s.elevation == 0.0));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(ROUTE_ONLY.as_bytes()).unwrap();

    let track = load_gpx_file(file.path()).unwrap();
    assert_eq!(track.samples.len(), 3);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let err = load_gpx_file(&dir.path().join("parcours42.gpx")).unwrap_err();
    assert!(matches!(err, TrailMetricsError::Io { .. }));
    assert!(err.to_string().contains("parcours42.gpx"));
}
