//! GPX track loading.
//!
//! Reads every track segment of every track, in file order. Files with no
//! track points fall back to their route (`<rte>`) points. Points without
//! `<ele>` get elevation 0; points with invalid coordinates are dropped.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use gpx::{read, Gpx, Waypoint};
use log::{debug, warn};

use crate::error::{Result, TrailMetricsError};
use crate::GeoSample;

/// Samples read from one GPX source.
#[derive(Debug, Clone)]
pub struct ParsedTrack {
    /// Track name from the file, or the source name
    pub name: String,
    pub samples: Vec<GeoSample>,
    /// Samples that had no elevation and were set to 0
    pub missing_elevation: usize,
    /// Points skipped because of invalid coordinates
    pub dropped_points: usize,
}

impl ParsedTrack {
    /// True when no sample carried elevation data.
    pub fn is_flat(&self) -> bool {
        !self.samples.is_empty() && self.missing_elevation == self.samples.len()
    }
}

/// Parse GPX from any reader. `source_name` is used for naming and errors.
pub fn parse_gpx<R: Read>(reader: R, source_name: &str) -> Result<ParsedTrack> {
    let gpx: Gpx = read(reader).map_err(|e| TrailMetricsError::GpxParse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;

    let track_points: Vec<&Waypoint> = gpx
        .tracks
        .iter()
        .flat_map(|t| t.segments.iter())
        .flat_map(|s| s.points.iter())
        .collect();

    let waypoints: Vec<&Waypoint> = if track_points.is_empty() {
        debug!("[TrailMetrics] '{}' has no track points, using routes", source_name);
        gpx.routes.iter().flat_map(|r| r.points.iter()).collect()
    } else {
        track_points
    };

    if waypoints.is_empty() {
        return Err(TrailMetricsError::NoTrackPoints {
            source_name: source_name.to_string(),
        });
    }

    let mut samples = Vec::with_capacity(waypoints.len());
    let mut missing_elevation = 0;
    let mut dropped_points = 0;

    for wpt in waypoints {
        let point = wpt.point();
        let sample = GeoSample::from_optional(point.y(), point.x(), wpt.elevation);
        if !sample.position().is_valid() {
            dropped_points += 1;
            continue;
        }
        if wpt.elevation.is_none() {
            missing_elevation += 1;
        }
        samples.push(sample);
    }

    if dropped_points > 0 {
        warn!(
            "[TrailMetrics] '{}': dropped {} points with invalid coordinates",
            source_name, dropped_points
        );
    }

    let name = gpx
        .tracks
        .iter()
        .find_map(|t| t.name.clone())
        .or_else(|| gpx.routes.iter().find_map(|r| r.name.clone()))
        .or_else(|| gpx.metadata.as_ref().and_then(|m| m.name.clone()))
        .unwrap_or_else(|| source_name.to_string());

    Ok(ParsedTrack {
        name,
        samples,
        missing_elevation,
        dropped_points,
    })
}

/// Load and parse a GPX file from disk.
pub fn load_gpx_file(path: &Path) -> Result<ParsedTrack> {
    let file = File::open(path).map_err(|source| TrailMetricsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    parse_gpx(BufReader::new(file), source_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SEGMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Le Tremblay</name>
    <trkseg>
      <trkpt lat="48.6482" lon="0.6728"><ele>212.0</ele></trkpt>
      <trkpt lat="48.6490" lon="0.6740"><ele>218.5</ele></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="48.6501" lon="0.6752"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn test_parse_segments_in_order() {
        let track = parse_gpx(TWO_SEGMENTS.as_bytes(), "parcours1").unwrap();
        assert_eq!(track.name, "Le Tremblay");
        assert_eq!(track.samples.len(), 3);
        assert_eq!(track.samples[0].latitude, 48.6482);
        assert_eq!(track.samples[0].longitude, 0.6728);
        assert_eq!(track.samples[1].elevation, 218.5);
        assert_eq!(track.samples[2].elevation, 0.0);
        assert_eq!(track.missing_elevation, 1);
        assert!(!track.is_flat());
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = parse_gpx("not xml at all".as_bytes(), "broken").unwrap_err();
        assert!(matches!(err, TrailMetricsError::GpxParse { .. }));
    }
}
