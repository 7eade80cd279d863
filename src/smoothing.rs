//! Elevation smoothing for the profile chart.
//!
//! A centered moving average whose window is clipped at the track ends:
//! edge points average over fewer neighbours instead of padded values.

/// Default number of neighbours on each side of a point.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Centered moving average over `[i - window_size, i + window_size]`,
/// clipped to the bounds of `values`.
///
/// The output always has the same length as the input. A `window_size` of 0
/// returns the input unchanged.
///
/// # Example
/// ```
/// use trail_metrics::smooth;
///
/// let smoothed = smooth(&[1.0, 2.0, 3.0, 4.0, 5.0], 1);
/// assert_eq!(smoothed, vec![1.5, 2.0, 3.0, 4.0, 4.5]);
/// ```
pub fn smooth(values: &[f64], window_size: usize) -> Vec<f64> {
    if window_size == 0 || values.len() < 2 {
        return values.to_vec();
    }

    let last = values.len() - 1;
    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(window_size);
            let end = i.saturating_add(window_size).min(last);
            let window = &values[start..=end];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}
