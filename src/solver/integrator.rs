//! Fixed-Step RK4 Integration with Scheduled Events
//!
//! One run is a pure, sequential function of its inputs: the same model and
//! schedule always produce the same trajectory. The loop walks the time
//! grid `t_k = k·dt`; at each boundary it
//!
//! 1. fires every not-yet-applied event whose trigger time has been
//!    reached (in trigger order, ties in insertion order), so an event's
//!    instantaneous effect is visible in the sample at its trigger step,
//! 2. records the sample,
//! 3. advances the state with a classic 4th-order Runge-Kutta step.
//!
//! Populations are floored at zero. A species that reaches zero is extinct:
//! its derivative is held at zero for the rest of the run, so it cannot
//! spontaneously recover. If any population leaves the finite range or
//! exceeds [`POPULATION_BOUND`], integration halts and the remaining
//! samples repeat the last finite state; the trajectory is flagged
//! diverged rather than failing the run.

use ndarray::Array2;

use crate::error::ValidationError;
use crate::model::events::EventSchedule;
use crate::solver::trajectory::Trajectory;
use crate::systems::traits::EcosystemDynamics;

/// Populations beyond this are treated as numerical divergence
pub const POPULATION_BOUND: f64 = 1e12;

/// Integrate a model over its full time window, applying scheduled events
///
/// Fails fast on an event the model cannot resolve; divergence and
/// extinction are recorded on the trajectory, never raised.
pub fn integrate<S: EcosystemDynamics>(
    mut system: S,
    schedule: &EventSchedule,
) -> Result<Trajectory, ValidationError> {
    schedule.validate(system.duration())?;
    for event in schedule.events() {
        system.validate_event(event)?;
    }

    let n = system.n_species();
    let dt = system.time_step();
    let n_steps = ((system.duration() / dt).round() as usize).max(1);
    // tolerance for matching trigger times against the float time grid
    let boundary_eps = dt * 1e-9;

    let species = system.species_ids();
    let mut y = system.initial_state();
    let mut extinct = vec![false; n];
    latch_extinct(&mut y, &mut extinct, &species, 0.0);

    let mut times = Vec::with_capacity(n_steps + 1);
    let mut populations = Array2::zeros((n_steps + 1, n));
    let mut diverged = false;

    let events = schedule.events();
    let mut next_event = 0;

    // Scratch buffers reused across steps
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut stage = vec![0.0; n];

    for step in 0..=n_steps {
        let t = step as f64 * dt;

        // Fire events whose trigger has been reached; anything still
        // pending at the final boundary (trigger at exactly t = duration)
        // fires before the last sample.
        while !diverged
            && next_event < events.len()
            && (step == n_steps || events[next_event].trigger_time <= t + boundary_eps)
        {
            let event = &events[next_event];
            log::debug!(
                "event {:?} on {:?} fires at t = {:.4}",
                event.kind,
                event.target,
                t
            );
            system.apply_event(event, &mut y);
            latch_extinct(&mut y, &mut extinct, &species, t);
            next_event += 1;
        }

        times.push(t);
        for i in 0..n {
            populations[[step, i]] = y[i];
        }

        if diverged || step == n_steps {
            continue;
        }

        // k1
        eval(&system, &y, &mut k1, &extinct);
        // k2
        for i in 0..n {
            stage[i] = y[i] + k1[i] * dt / 2.0;
        }
        eval(&system, &stage, &mut k2, &extinct);
        // k3
        for i in 0..n {
            stage[i] = y[i] + k2[i] * dt / 2.0;
        }
        eval(&system, &stage, &mut k3, &extinct);
        // k4
        for i in 0..n {
            stage[i] = y[i] + k3[i] * dt;
        }
        eval(&system, &stage, &mut k4, &extinct);

        let mut finite = true;
        for i in 0..n {
            let next = y[i] + (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) * dt / 6.0;
            if !next.is_finite() {
                finite = false;
                break;
            }
            stage[i] = next;
        }

        if !finite {
            diverged = true;
            log::warn!(
                "non-finite state at t = {:.4}; padding with last finite state",
                t + dt
            );
            continue;
        }

        y.copy_from_slice(&stage);
        latch_extinct(&mut y, &mut extinct, &species, t + dt);

        if y.iter().any(|&p| p > POPULATION_BOUND) {
            diverged = true;
            log::warn!("population bound exceeded at t = {:.4}", t + dt);
        }
    }

    Ok(Trajectory::new(species, times, populations, diverged))
}

/// Evaluate derivatives, holding extinct species at zero
fn eval<S: EcosystemDynamics>(system: &S, y: &[f64], dy: &mut [f64], extinct: &[bool]) {
    system.derivatives(y, dy);
    for (d, &gone) in dy.iter_mut().zip(extinct) {
        if gone {
            *d = 0.0;
        }
    }
}

/// Floor populations at zero and latch newly extinct species
fn latch_extinct(y: &mut [f64], extinct: &mut [bool], species: &[String], t: f64) {
    for i in 0..y.len() {
        if extinct[i] {
            y[i] = 0.0;
        } else if y[i] <= 0.0 {
            y[i] = 0.0;
            extinct[i] = true;
            log::debug!("{} extinct at t = {:.4}", species[i], t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::events::{EnvironmentalEvent, EventTarget};
    use crate::model::food_web::{FoodWeb, Species};
    use crate::model::params::LotkaVolterraParams;
    use crate::systems::pair::PairDynamics;
    use crate::systems::web::WebDynamics;

    fn run(params: &LotkaVolterraParams, schedule: &EventSchedule) -> Trajectory {
        integrate(PairDynamics::new(params), schedule).expect("valid inputs")
    }

    #[test]
    fn test_trajectory_shape() {
        let params = LotkaVolterraParams::classic();
        let traj = run(&params, &EventSchedule::empty());
        assert_eq!(traj.len(), params.n_steps() + 1);
        assert_eq!(traj.species(), &["prey", "predator"]);
        assert!(traj.times().windows(2).all(|w| w[1] > w[0]));
        assert!((traj.time(0) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let params = LotkaVolterraParams::classic();
        let a = run(&params, &EventSchedule::empty());
        let b = run(&params, &EventSchedule::empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_populations_never_negative() {
        let params = LotkaVolterraParams::classic();
        let traj = run(&params, &EventSchedule::empty());
        for step in 0..traj.len() {
            for i in 0..traj.n_species() {
                assert!(
                    traj.population(step, i) >= 0.0,
                    "negative population at step {step}"
                );
            }
        }
    }

    #[test]
    fn test_empty_ecosystem_stays_empty() {
        let mut params = LotkaVolterraParams::classic();
        params.initial_prey = 0.0;
        params.initial_predator = 0.0;
        let traj = run(&params, &EventSchedule::empty());
        for step in 0..traj.len() {
            assert_eq!(traj.population(step, 0), 0.0);
            assert_eq!(traj.population(step, 1), 0.0);
        }
    }

    #[test]
    fn test_identity_event_changes_nothing() {
        let params = LotkaVolterraParams::classic();
        let baseline = run(&params, &EventSchedule::empty());
        for event in [
            EnvironmentalEvent::climate_change(10.0, 0.0, EventTarget::Both),
            EnvironmentalEvent::habitat_loss(10.0, 0.0, EventTarget::Both),
            EnvironmentalEvent::disease(10.0, 0.0, EventTarget::Both),
        ] {
            let perturbed = run(&params, &EventSchedule::from_events(vec![event.clone()]));
            assert_eq!(baseline, perturbed, "identity {:?} altered the run", event.kind);
        }
    }

    #[test]
    fn test_total_habitat_loss_extinguishes_prey() {
        let params = LotkaVolterraParams::classic();
        let schedule = EventSchedule::from_events(vec![EnvironmentalEvent::habitat_loss(
            10.0,
            1.0,
            EventTarget::Prey,
        )]);
        let traj = run(&params, &schedule);

        let trigger = (10.0 / params.time_step).round() as usize;
        assert!(traj.population(trigger - 1, 0) > 0.0);
        for step in trigger..traj.len() {
            assert_eq!(traj.population(step, 0), 0.0, "prey revived at step {step}");
        }
        // with no prey the predator only decays
        let at_trigger = traj.population(trigger, 1);
        let at_end = traj.population(traj.len() - 1, 1);
        assert!(
            at_end < at_trigger * 1e-4,
            "predator did not decay: {at_trigger} -> {at_end}"
        );
        for step in trigger..traj.len() - 1 {
            assert!(traj.population(step + 1, 1) <= traj.population(step, 1));
        }
    }

    #[test]
    fn test_disease_halves_predator_at_trigger() {
        let params = LotkaVolterraParams::classic();
        let baseline = run(&params, &EventSchedule::empty());
        let schedule = EventSchedule::from_events(vec![EnvironmentalEvent::disease(
            10.0,
            0.5,
            EventTarget::Predator,
        )]);
        let traj = run(&params, &schedule);

        let trigger = (10.0 / params.time_step).round() as usize;
        let expected = baseline.population(trigger, 1) * 0.5;
        assert!(
            (traj.population(trigger, 1) - expected).abs() < 1e-12,
            "expected exact 50% drop, got {} vs {}",
            traj.population(trigger, 1),
            expected
        );
        // suppressed relative to the healthy run while the orbits are still
        // in phase
        for step in trigger + 1..trigger + 200 {
            assert!(
                traj.population(step, 1) < baseline.population(step, 1),
                "diseased predator above baseline at step {step}"
            );
        }
    }

    #[test]
    fn test_unbounded_producer_diverges_and_pads() {
        let mut web = FoodWeb::new(100.0, 0.1);
        web.add_species(Species::new("algae", 1.0, 0.0, 1000.0));
        let traj = integrate(WebDynamics::new(&web), &EventSchedule::empty()).expect("valid web");

        assert!(traj.diverged());
        assert_eq!(traj.len(), web.n_steps() + 1);
        // padded tail repeats the last finite state
        let last = traj.population(traj.len() - 1, 0);
        let second_last = traj.population(traj.len() - 2, 0);
        assert_eq!(last, second_last);
        assert!(last.is_finite());
    }

    #[test]
    fn test_event_rejected_before_any_work() {
        let params = LotkaVolterraParams::classic();
        let schedule = EventSchedule::from_events(vec![EnvironmentalEvent::disease(
            params.duration + 1.0,
            0.5,
            EventTarget::Prey,
        )]);
        assert!(integrate(PairDynamics::new(&params), &schedule).is_err());
    }
}
