//! Single-shot asynchronous track loading.
//!
//! Parsing and the metrics pass run on tokio's blocking pool and produce
//! exactly one result. A caller that starts a new load simply drops the
//! previous future or ignores its result; nothing is shared between loads.

use std::path::PathBuf;

use log::info;

use crate::error::{Result, TrailMetricsError};
use crate::gpx_loader::{load_gpx_file, ParsedTrack};
use crate::metrics::{compute_track_metrics, MetricsConfig, TrackMetrics};

/// A parsed track together with its metrics.
///
/// Turned into a view state with [`ViewSession::from_loaded`](crate::ViewSession::from_loaded).
#[derive(Debug, Clone)]
pub struct LoadedTrack {
    pub track: ParsedTrack,
    pub metrics: TrackMetrics,
}

/// Load a GPX file and compute its metrics off the async runtime.
pub async fn load_track(path: impl Into<PathBuf>, config: MetricsConfig) -> Result<LoadedTrack> {
    let path = path.into();
    config.validate()?;

    let handle = tokio::task::spawn_blocking(move || -> Result<LoadedTrack> {
        let track = load_gpx_file(&path)?;
        let metrics = compute_track_metrics(&track.samples, &config);
        info!(
            "[TrailMetrics] Loaded '{}' from {}: {} points",
            track.name,
            path.display(),
            track.samples.len()
        );
        Ok(LoadedTrack { track, metrics })
    });

    handle.await.map_err(|e| TrailMetricsError::TaskFailed {
        message: e.to_string(),
    })?
}
