//! # View Session
//!
//! The state a trail-map view holds for the track it is showing: the
//! samples, their metrics, the spatial index used by map-side hovering and
//! the current hover cursor.
//!
//! A session is a value owned by the presentation layer. Loading a track
//! produces a new session that replaces the previous one; nothing is patched
//! field by field, so stale chart or marker state cannot outlive its track.
//!
//! ```rust
//! use trail_metrics::{GeoSample, MetricsConfig, ViewSession};
//!
//! let samples = vec![
//!     GeoSample::new(48.6482, 0.6728, 212.0),
//!     GeoSample::new(48.6490, 0.6740, 218.5),
//! ];
//! let mut session = ViewSession::load("parcours1", samples, &MetricsConfig::default());
//! let hover = session.hover_chart_index(1).unwrap();
//! assert_eq!(hover.index, 1);
//!
//! session.leave_hover();
//! let session = session.clear();
//! assert!(session.track().is_none());
//! ```

use log::info;

use crate::hover::{hover_info, nearest_chart_index, HoverInfo, TrackSpatialIndex};
#[cfg(feature = "async")]
use crate::loader::LoadedTrack;
use crate::metrics::{compute_track_metrics, MetricsConfig, TrackMetrics};
use crate::summary::TrackSummary;
use crate::{GeoSample, GpsPoint};

/// A loaded track with everything derived from it.
#[derive(Debug, Clone)]
pub struct ActiveTrack {
    pub name: String,
    pub samples: Vec<GeoSample>,
    pub metrics: TrackMetrics,
    pub spatial_index: TrackSpatialIndex,
}

impl ActiveTrack {
    /// Compute metrics and the spatial index for `samples`.
    pub fn new(name: impl Into<String>, samples: Vec<GeoSample>, config: &MetricsConfig) -> Self {
        let metrics = compute_track_metrics(&samples, config);
        Self::with_metrics(name, samples, metrics)
    }

    /// Wrap samples whose metrics were already computed (e.g. off-thread).
    pub fn with_metrics(name: impl Into<String>, samples: Vec<GeoSample>, metrics: TrackMetrics) -> Self {
        let spatial_index = TrackSpatialIndex::build(&samples);
        Self {
            name: name.into(),
            samples,
            metrics,
            spatial_index,
        }
    }
}

/// The presentation layer's view state.
#[derive(Debug, Clone, Default)]
pub struct ViewSession {
    track: Option<ActiveTrack>,
    hover: Option<HoverInfo>,
}

impl ViewSession {
    /// A session with no track shown.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start a new session for a freshly loaded track.
    pub fn load(name: impl Into<String>, samples: Vec<GeoSample>, config: &MetricsConfig) -> Self {
        Self::with_track(ActiveTrack::new(name, samples, config))
    }

    /// Start a new session from the result of an async load.
    #[cfg(feature = "async")]
    pub fn from_loaded(loaded: LoadedTrack) -> Self {
        Self::with_track(ActiveTrack::with_metrics(
            loaded.track.name,
            loaded.track.samples,
            loaded.metrics,
        ))
    }

    pub fn with_track(track: ActiveTrack) -> Self {
        info!(
            "[TrailMetrics] Session loaded '{}' ({} points, {:.2} km)",
            track.name,
            track.samples.len(),
            track.metrics.total_distance_km()
        );
        Self {
            track: Some(track),
            hover: None,
        }
    }

    /// Drop the current track and its hover state.
    pub fn clear(self) -> Self {
        if let Some(track) = &self.track {
            info!("[TrailMetrics] Session cleared '{}'", track.name);
        }
        Self::empty()
    }

    pub fn track(&self) -> Option<&ActiveTrack> {
        self.track.as_ref()
    }

    pub fn metrics(&self) -> Option<&TrackMetrics> {
        self.track.as_ref().map(|t| &t.metrics)
    }

    pub fn summary(&self) -> Option<TrackSummary> {
        self.metrics().map(TrackSummary::from_metrics)
    }

    /// Current hover cursor, if the pointer is over the chart or track.
    pub fn hover(&self) -> Option<&HoverInfo> {
        self.hover.as_ref()
    }

    /// Pointer over chart index `index`. An index outside the track clears
    /// the cursor.
    pub fn hover_chart_index(&mut self, index: usize) -> Option<&HoverInfo> {
        self.hover = self
            .track
            .as_ref()
            .and_then(|t| hover_info(&t.samples, &t.metrics, index));
        self.hover.as_ref()
    }

    /// Pointer over the chart at `distance_km` on the x axis.
    pub fn hover_distance_km(&mut self, distance_km: f64) -> Option<&HoverInfo> {
        let index = self
            .track
            .as_ref()
            .and_then(|t| nearest_chart_index(&t.metrics.chart_points, distance_km));
        match index {
            Some(i) => self.hover_chart_index(i),
            None => {
                self.hover = None;
                None
            }
        }
    }

    /// Pointer over the map near `position`.
    pub fn hover_map_position(&mut self, position: GpsPoint) -> Option<&HoverInfo> {
        let index = self
            .track
            .as_ref()
            .and_then(|t| t.spatial_index.nearest_index(&position));
        match index {
            Some(i) => self.hover_chart_index(i),
            None => {
                self.hover = None;
                None
            }
        }
    }

    /// Pointer left the chart: the marker goes away.
    pub fn leave_hover(&mut self) {
        self.hover = None;
    }
}
