//! Model Seam: Standardized API for the Fixed-Step Integrator
//!
//! Both population models, the two-species pair and the N-species web,
//! implement [`EcosystemDynamics`], so the integrator is written once:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   EcosystemDynamics Trait                   │
//! ├────────────────────────────────────────────────────────────┤
//! │  + species_ids()     - Labels, index-aligned with state     │
//! │  + initial_state()   - Population vector at t = 0           │
//! │  + derivatives()     - Evaluate dy/dt at a state            │
//! │  + validate_event()  - Reject unresolvable targets up front │
//! │  + apply_event()     - Mutate rates and/or populations      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! `apply_event` is only called with events that passed `validate_event`,
//! so application itself is infallible.

use crate::error::ValidationError;
use crate::model::events::EnvironmentalEvent;

/// A population model the fixed-step integrator can advance
pub trait EcosystemDynamics {
    /// Species labels, index-aligned with the state vector
    fn species_ids(&self) -> Vec<String>;

    /// Number of species (state vector length)
    fn n_species(&self) -> usize;

    /// Population vector at t = 0
    fn initial_state(&self) -> Vec<f64>;

    /// Simulated time span
    fn duration(&self) -> f64;

    /// Fixed integration step
    fn time_step(&self) -> f64;

    /// Evaluate dy/dt at state `y` into `dy` (both of length `n_species`)
    fn derivatives(&self, y: &[f64], dy: &mut [f64]);

    /// Can this model resolve the event's target and parameter?
    fn validate_event(&self, event: &EnvironmentalEvent) -> Result<(), ValidationError>;

    /// Apply a validated event: mutate rates on `self`, populations in `y`
    fn apply_event(&mut self, event: &EnvironmentalEvent, y: &mut [f64]);
}

/// Cull a population by a fraction, flooring at zero
pub(crate) fn cull(population: f64, fraction: f64) -> f64 {
    (population * (1.0 - fraction)).max(0.0)
}

/// Scale a rate, keeping it non-negative
pub(crate) fn scale_rate(rate: f64, factor: f64) -> f64 {
    (rate * factor).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cull_floors_at_zero() {
        assert_eq!(cull(100.0, 0.25), 75.0);
        assert_eq!(cull(100.0, 1.0), 0.0);
        assert_eq!(cull(100.0, 1.5), 0.0);
    }

    #[test]
    fn test_scale_rate_clamps() {
        assert_eq!(scale_rate(0.4, 1.5), 0.6000000000000001);
        assert_eq!(scale_rate(0.4, -2.0), 0.0);
    }
}
