//! Metrics for many tracks at once (route catalogs, folder summaries).
//!
//! Tracks are independent, so with the `parallel` feature each one is
//! computed on the rayon pool. Output order always matches input order.

use crate::metrics::{compute_track_metrics, MetricsConfig, TrackMetrics};
use crate::GeoSample;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Compute metrics for a set of named tracks.
pub fn compute_metrics_batch(
    tracks: &[(String, Vec<GeoSample>)],
    config: &MetricsConfig,
) -> Vec<(String, TrackMetrics)> {
    #[cfg(feature = "parallel")]
    let iter = tracks.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = tracks.iter();

    iter.map(|(name, samples)| (name.clone(), compute_track_metrics(samples, config)))
        .collect()
}
