//! Metrics: Stability, Equilibria, Cycles, Extinctions
//!
//! A fresh [`Metrics`] value is derived per trajectory; nothing is cached
//! and the input is never mutated, so repeated calls agree exactly.
//!
//! Classification priority (first match wins):
//!
//! 1. **Extinct**: some species is gone for good before the run ends
//! 2. **Diverging**: the integrator hit the numeric bound
//! 3. **Stable**: every species settled inside the final window
//! 4. **Oscillating**: the reference series shows a repeating cycle
//! 5. **Stable**: bounded, non-oscillating fallback
//!
//! The reference series for cycle metrics is the first species, the prey
//! in the two-species model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::config::AnalysisConfig;
use crate::analysis::peaks;
use crate::analysis::summary::{summarize, SeriesSummary};
use crate::error::AnalysisError;
use crate::solver::trajectory::Trajectory;

/// Overall character of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stability {
    Stable,
    Oscillating,
    Diverging,
    Extinct,
}

/// A species that reached zero and never recovered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtinctionEvent {
    pub species: String,
    /// First time the population was gone for the rest of the run
    pub time: f64,
}

/// Summary statistics derived from one trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub stability: Stability,
    /// Final-window means, present when every species settled
    pub equilibrium: Option<BTreeMap<String, f64>>,
    /// Mean time between peaks of the reference series
    pub period: Option<f64>,
    /// Mean peak-above-trough height of the reference series
    pub amplitude: Option<f64>,
    /// Delay from a reference-series peak to the second species' response
    pub phase_lag: Option<f64>,
    /// Extinctions in time order
    pub extinction_events: Vec<ExtinctionEvent>,
    /// Per-species basic statistics, in trajectory species order
    pub summaries: Vec<SeriesSummary>,
}

/// Analyze with the default thresholds
pub fn analyze(trajectory: &Trajectory) -> Result<Metrics, AnalysisError> {
    analyze_with(&AnalysisConfig::default(), trajectory)
}

/// Analyze with explicit thresholds
pub fn analyze_with(
    config: &AnalysisConfig,
    trajectory: &Trajectory,
) -> Result<Metrics, AnalysisError> {
    if trajectory.is_empty() {
        return Err(AnalysisError::EmptyTrajectory);
    }

    let extinction_events = detect_extinctions(config, trajectory);

    let summaries: Vec<SeriesSummary> = trajectory
        .species()
        .iter()
        .enumerate()
        .map(|(i, id)| summarize(id, trajectory.series(i)))
        .collect();

    // A single sample cannot support window or cycle estimates
    if trajectory.len() < 2 {
        let stability = if extinction_events.is_empty() {
            Stability::Stable
        } else {
            Stability::Extinct
        };
        return Ok(Metrics {
            stability,
            equilibrium: None,
            period: None,
            amplitude: None,
            phase_lag: None,
            extinction_events,
            summaries,
        });
    }

    let equilibrium = if trajectory.diverged() {
        None
    } else {
        estimate_equilibrium(config, trajectory)
    };

    let reference_peaks = peaks::local_maxima(trajectory.series(0), config.peak_prominence);
    let period = peaks::mean_period(trajectory.times(), &reference_peaks);
    let amplitude = peaks::mean_amplitude(trajectory.series(0), &reference_peaks);
    let phase_lag = if trajectory.n_species() >= 2 {
        let follower_peaks = peaks::local_maxima(trajectory.series(1), config.peak_prominence);
        peaks::phase_lag(trajectory.times(), &reference_peaks, &follower_peaks)
    } else {
        None
    };

    let stability = if !extinction_events.is_empty() {
        Stability::Extinct
    } else if trajectory.diverged() {
        Stability::Diverging
    } else if equilibrium.is_some() {
        Stability::Stable
    } else if reference_peaks.len() >= 2 {
        Stability::Oscillating
    } else {
        Stability::Stable
    };

    Ok(Metrics {
        stability,
        equilibrium,
        period,
        amplitude,
        phase_lag,
        extinction_events,
        summaries,
    })
}

/// A species is extinct if its population stays at or below epsilon from
/// some index through the end of the run; the event time is that first
/// index.
fn detect_extinctions(config: &AnalysisConfig, trajectory: &Trajectory) -> Vec<ExtinctionEvent> {
    let len = trajectory.len();
    let mut events = Vec::new();

    for (i, id) in trajectory.species().iter().enumerate() {
        let series = trajectory.series(i);
        let mut run = 0;
        while run < len && series[len - 1 - run] <= config.extinction_epsilon {
            run += 1;
        }
        if run > 0 {
            events.push(ExtinctionEvent {
                species: id.clone(),
                time: trajectory.time(len - run),
            });
        }
    }

    events.sort_by(|a, b| a.time.total_cmp(&b.time));
    events
}

/// Mean of the final window per species, if every species' relative span
/// over that window is inside the tolerance
fn estimate_equilibrium(
    config: &AnalysisConfig,
    trajectory: &Trajectory,
) -> Option<BTreeMap<String, f64>> {
    let len = trajectory.len();
    let window = ((len as f64 * config.equilibrium_window).ceil() as usize)
        .clamp(2, len);
    let start = len - window;

    let mut means = BTreeMap::new();
    for (i, id) in trajectory.species().iter().enumerate() {
        let series = trajectory.series(i);
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for k in start..len {
            let value = series[k];
            min = min.min(value);
            max = max.max(value);
            sum += value;
        }
        let mean = sum / window as f64;
        let span = max - min;
        let scale = mean.abs().max(config.extinction_epsilon);
        if span / scale >= config.equilibrium_tolerance {
            return None;
        }
        means.insert(id.clone(), mean);
    }

    Some(means)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::events::EventSchedule;
    use crate::model::food_web::{FoodWeb, Species};
    use crate::model::params::LotkaVolterraParams;
    use crate::{simulate, simulate_multi};
    use ndarray::Array2;

    fn classic_run() -> Trajectory {
        simulate(&LotkaVolterraParams::classic(), &EventSchedule::empty()).expect("valid params")
    }

    #[test]
    fn test_classic_run_oscillates() {
        let metrics = analyze(&classic_run()).expect("non-empty trajectory");
        assert_eq!(metrics.stability, Stability::Oscillating);

        let amplitude = metrics.amplitude.expect("amplitude");
        assert!(amplitude > 0.0, "amplitude {amplitude}");

        let period = metrics.period.expect("period");
        assert!(
            (5.0..30.0).contains(&period),
            "period {period} outside the plausible band"
        );
        assert!(metrics.equilibrium.is_none());
    }

    #[test]
    fn test_predator_peaks_lag_prey_peaks() {
        let metrics = analyze(&classic_run()).expect("non-empty trajectory");
        let lag = metrics.phase_lag.expect("both series peak");
        assert!(lag > 0.0, "lag {lag}");
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let traj = classic_run();
        let first = analyze(&traj).expect("ok");
        let second = analyze(&traj).expect("ok");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_ecosystem_extinct_from_start() {
        let mut params = LotkaVolterraParams::classic();
        params.initial_prey = 0.0;
        params.initial_predator = 0.0;
        let traj = simulate(&params, &EventSchedule::empty()).expect("valid params");
        let metrics = analyze(&traj).expect("non-empty trajectory");

        assert_eq!(metrics.stability, Stability::Extinct);
        assert_eq!(metrics.extinction_events.len(), 2);
        for event in &metrics.extinction_events {
            assert_eq!(event.time, 0.0, "{} late: {}", event.species, event.time);
        }
    }

    #[test]
    fn test_logistic_producer_settles_at_capacity() {
        let mut web = FoodWeb::new(200.0, 0.1);
        web.add_species(Species::new("grass", 0.5, 0.0, 100.0).with_capacity(1000.0));
        let traj = simulate_multi(&web, &EventSchedule::empty()).expect("valid web");
        let metrics = analyze(&traj).expect("non-empty trajectory");

        assert_eq!(metrics.stability, Stability::Stable);
        let equilibrium = metrics.equilibrium.expect("settled");
        let grass = equilibrium["grass"];
        assert!((grass - 1000.0).abs() < 1.0, "equilibrium {grass}");
    }

    #[test]
    fn test_zero_growth_producer_is_stable() {
        let mut web = FoodWeb::new(100.0, 0.1);
        web.add_species(Species::new("lichen", 0.0, 0.0, 50.0));
        let traj = simulate_multi(&web, &EventSchedule::empty()).expect("valid web");
        let metrics = analyze(&traj).expect("non-empty trajectory");

        assert_eq!(metrics.stability, Stability::Stable);
        assert_eq!(metrics.equilibrium.expect("constant")["lichen"], 50.0);
    }

    #[test]
    fn test_unbounded_producer_classified_diverging() {
        let mut web = FoodWeb::new(100.0, 0.1);
        web.add_species(Species::new("algae", 1.0, 0.0, 1000.0));
        let traj = simulate_multi(&web, &EventSchedule::empty()).expect("valid web");
        let metrics = analyze(&traj).expect("non-empty trajectory");

        assert_eq!(metrics.stability, Stability::Diverging);
        assert!(metrics.equilibrium.is_none());
    }

    #[test]
    fn test_empty_trajectory_is_an_error() {
        let traj = Trajectory::new(vec!["prey".into()], Vec::new(), Array2::zeros((0, 1)), false);
        assert_eq!(analyze(&traj), Err(AnalysisError::EmptyTrajectory));
    }

    #[test]
    fn test_single_sample_defaults_to_stable() {
        let traj = Trajectory::new(
            vec!["prey".into()],
            vec![0.0],
            Array2::from_elem((1, 1), 5.0),
            false,
        );
        let metrics = analyze(&traj).expect("one sample is enough");
        assert_eq!(metrics.stability, Stability::Stable);
        assert!(metrics.equilibrium.is_none());
        assert!(metrics.period.is_none());
        assert!(metrics.amplitude.is_none());
    }

    #[test]
    fn test_single_extinct_sample_reports_extinct() {
        let traj = Trajectory::new(
            vec!["prey".into()],
            vec![0.0],
            Array2::zeros((1, 1)),
            false,
        );
        let metrics = analyze(&traj).expect("one sample is enough");
        assert_eq!(metrics.stability, Stability::Extinct);
        assert_eq!(metrics.extinction_events.len(), 1);
    }

    #[test]
    fn test_summaries_cover_every_species() {
        let metrics = analyze(&classic_run()).expect("ok");
        assert_eq!(metrics.summaries.len(), 2);
        assert_eq!(metrics.summaries[0].species, "prey");
        assert!(metrics.summaries[0].max > metrics.summaries[0].min);
    }
}
