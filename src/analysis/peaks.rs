//! Peak Detection for Oscillation Metrics
//!
//! Cycles show up as alternating local maxima and minima in a population
//! series. Period is the mean spacing between consecutive peaks; amplitude
//! is the mean height of a peak pair above the trough between them; the
//! phase lag between two species is the delay from one's first peak to the
//! other's next.

use ndarray::ArrayView1;

/// Indices of local maxima exceeding both neighbours by `prominence`
pub(crate) fn local_maxima(series: ArrayView1<'_, f64>, prominence: f64) -> Vec<usize> {
    let n = series.len();
    if n < 3 {
        return Vec::new();
    }
    (1..n - 1)
        .filter(|&i| {
            series[i] - series[i - 1] > prominence && series[i] - series[i + 1] > prominence
        })
        .collect()
}

/// Mean time between consecutive peaks; needs at least two
pub(crate) fn mean_period(times: &[f64], peaks: &[usize]) -> Option<f64> {
    if peaks.len() < 2 {
        return None;
    }
    let total: f64 = peaks
        .windows(2)
        .map(|pair| times[pair[1]] - times[pair[0]])
        .sum();
    Some(total / (peaks.len() - 1) as f64)
}

/// Mean peak-above-trough height over consecutive peak pairs
///
/// The trough is the series minimum between the two peaks, so a value
/// always exists when there are at least two peaks.
pub(crate) fn mean_amplitude(series: ArrayView1<'_, f64>, peaks: &[usize]) -> Option<f64> {
    if peaks.len() < 2 {
        return None;
    }
    let total: f64 = peaks
        .windows(2)
        .map(|pair| {
            let trough = (pair[0]..=pair[1])
                .map(|i| series[i])
                .fold(f64::INFINITY, f64::min);
            (series[pair[0]] + series[pair[1]]) / 2.0 - trough
        })
        .sum();
    Some(total / (peaks.len() - 1) as f64)
}

/// Delay from the leader's first peak to the follower's next peak
pub(crate) fn phase_lag(times: &[f64], leader: &[usize], follower: &[usize]) -> Option<f64> {
    let first = *leader.first()?;
    let next = follower.iter().find(|&&i| i > first)?;
    Some(times[*next] - times[first])
}
