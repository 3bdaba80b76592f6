//! Per-Species Summary Statistics

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Basic statistics of one species' time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub species: String,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// std_dev / mean; zero when the mean is zero
    pub coefficient_of_variation: f64,
}

pub(crate) fn summarize(species: &str, series: ArrayView1<'_, f64>) -> SeriesSummary {
    let n = series.len() as f64;
    let mean = series.sum() / n;
    let variance = series.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    let min = series.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let coefficient_of_variation = if mean > 0.0 { std_dev / mean } else { 0.0 };

    SeriesSummary {
        species: species.to_string(),
        mean,
        std_dev,
        min,
        max,
        coefficient_of_variation,
    }
}
