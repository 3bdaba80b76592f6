//! Analysis Thresholds
//!
//! The tolerances behind equilibrium, extinction and oscillation detection
//! are choices, not model invariants, so they are carried on a config
//! record instead of being buried as magic numbers. [`AnalysisConfig::default`]
//! documents the values used by [`analyze`](crate::analyze).

use serde::{Deserialize, Serialize};

/// Tunable thresholds for trajectory analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Populations at or below this count as zero for extinction detection
    pub extinction_epsilon: f64,
    /// Fraction of the trajectory tail inspected for an equilibrium
    pub equilibrium_window: f64,
    /// Maximum relative span (max − min over the window, relative to the
    /// window mean) for a species to count as settled
    pub equilibrium_tolerance: f64,
    /// Minimum excess over both neighbours for a sample to count as a peak;
    /// zero means strict neighbour comparison
    pub peak_prominence: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            extinction_epsilon: 1e-6,
            equilibrium_window: 0.1,
            equilibrium_tolerance: 0.01,
            peak_prominence: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.extinction_epsilon, 1e-6);
        assert_eq!(config.equilibrium_window, 0.1);
        assert_eq!(config.equilibrium_tolerance, 0.01);
        assert_eq!(config.peak_prominence, 0.0);
    }
}
