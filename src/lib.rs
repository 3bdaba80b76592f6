//! # ecosim
//!
//! Predator-Prey Population Dynamics: Lotka-Volterra Simulation
//! with Environmental Events and Trajectory Analysis
//!
//! ## Model
//!
//! The core integrates the classic two-species Lotka-Volterra equations
//!
//!   dx/dt = α·x − β·x·y
//!   dy/dt = δ·x·y − γ·y
//!
//! and their generalized N-species form over a food web of directed,
//! weighted interactions. Runs are perturbed mid-flight by scheduled
//! environmental events (climate shifts, habitat loss, disease outbreaks,
//! custom rate modifiers), each applied exactly once at its trigger time.
//!
//! ## Pipeline
//!
//! 1. **Parameters**: a validated [`LotkaVolterraParams`] record or a
//!    [`FoodWeb`] graph, plus an [`EventSchedule`]. Malformed inputs are
//!    rejected before any integration work begins.
//!
//! 2. **Integration**: fixed-step 4th-order Runge-Kutta over the full time
//!    window. Populations are floored at zero and extinct species stay
//!    extinct; numeric blow-ups end the run early and flag the trajectory
//!    as diverged instead of failing it.
//!
//! 3. **Analysis**: [`analyze`] derives equilibrium estimates, oscillation
//!    period and amplitude, phase lag, extinction events, per-species
//!    statistics and an overall [`Stability`] classification from the
//!    finished [`Trajectory`].
//!
//! Every run is a pure, sequential function of its inputs: identical
//! inputs produce identical trajectories.
//!
//! ## Entry points
//!
//! ```
//! use ecosim::{analyze, simulate, EventSchedule, LotkaVolterraParams, Stability};
//!
//! let params = LotkaVolterraParams::classic();
//! let trajectory = simulate(&params, &EventSchedule::empty())?;
//! let metrics = analyze(&trajectory)?;
//! assert_eq!(metrics.stability, Stability::Oscillating);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod error;
pub mod model;
pub mod solver;
pub mod systems;

// Re-exports from error
pub use error::{AnalysisError, Result, ValidationError};

// Re-exports from model
pub use model::{
    // Two-species parameters
    LotkaVolterraParams,
    // Event scheduling
    EnvironmentalEvent,
    EventKind,
    EventSchedule,
    EventTarget,
    ModifierMode,
    RateParam,
    // N-species graphs
    FoodWeb,
    Interaction,
    Species,
    // Preset table
    PresetScenario,
};
pub use model::presets::{find as find_preset, preset_scenarios};

// Re-exports from systems
pub use systems::{EcosystemDynamics, PairDynamics, WebDynamics, PREDATOR_ID, PREY_ID};

// Re-exports from solver
pub use solver::{Trajectory, POPULATION_BOUND};

// Re-exports from analysis
pub use analysis::{
    analyze, analyze_with, AnalysisConfig, ExtinctionEvent, Metrics, SeriesSummary, Stability,
};

/// Run the two-species model over its full time window
///
/// Validates the parameters and the schedule first; a run that starts
/// always returns a complete trajectory, with divergence and extinction
/// recorded as data on it.
pub fn simulate(
    params: &LotkaVolterraParams,
    events: &EventSchedule,
) -> Result<Trajectory, ValidationError> {
    params.validate()?;
    solver::integrate(PairDynamics::new(params), events)
}

/// Run the N-species model over its full time window
///
/// Validates the web (unknown interaction endpoints, duplicate ids,
/// negative rates) and the schedule before integrating.
pub fn simulate_multi(
    web: &FoodWeb,
    events: &EventSchedule,
) -> Result<Trajectory, ValidationError> {
    web.validate()?;
    solver::integrate(WebDynamics::new(web), events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_params_fail_before_integration() {
        let mut params = LotkaVolterraParams::classic();
        params.prey_growth_rate = -1.0;
        assert!(simulate(&params, &EventSchedule::empty()).is_err());
    }

    #[test]
    fn test_invalid_web_fails_before_integration() {
        let mut web = FoodWeb::new(100.0, 0.1);
        web.add_species(Species::new("hare", 0.9, 0.0, 80.0));
        web.add_interaction(Interaction::new("hare", "lynx", 0.01));
        assert_eq!(
            simulate_multi(&web, &EventSchedule::empty()),
            Err(ValidationError::UnknownSpecies("lynx".into()))
        );
    }

    #[test]
    fn test_web_encoding_of_the_pair_tracks_it() {
        let params = LotkaVolterraParams::classic();
        let pair = simulate(&params, &EventSchedule::empty()).expect("valid params");

        let mut web = FoodWeb::new(params.duration, params.time_step);
        web.add_species(Species::new(PREY_ID, params.prey_growth_rate, 0.0, params.initial_prey));
        web.add_species(Species::new(
            PREDATOR_ID,
            0.0,
            params.predator_death_rate,
            params.initial_predator,
        ));
        web.add_predation(
            PREY_ID,
            PREDATOR_ID,
            params.predation_rate,
            params.predator_growth_rate,
        );
        let multi = simulate_multi(&web, &EventSchedule::empty()).expect("valid web");

        assert_eq!(pair.len(), multi.len());
        for step in 0..pair.len() {
            for i in 0..2 {
                let a = pair.population(step, i);
                let b = multi.population(step, i);
                assert!(
                    (a - b).abs() <= 1e-9 * a.abs().max(1.0),
                    "step {step}, species {i}: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_presets_all_run() {
        for preset in preset_scenarios() {
            let trajectory =
                simulate(&preset.params, &preset.events).expect(preset.name);
            assert_eq!(trajectory.len(), preset.params.n_steps() + 1);
            analyze(&trajectory).expect(preset.name);
        }
    }

    #[test]
    fn test_epidemic_preset_culls_predator() {
        let preset = find_preset("Epidemic Scenario").expect("known preset");
        let baseline = simulate(&preset.params, &EventSchedule::empty()).expect("valid params");
        let perturbed = simulate(&preset.params, &preset.events).expect("valid preset");

        let trigger = (50.0 / preset.params.time_step).round() as usize;
        let expected = baseline.population(trigger, 1) * 0.6;
        assert!(
            (perturbed.population(trigger, 1) - expected).abs() < 1e-9,
            "expected 40% cull at the trigger step"
        );
    }
}
