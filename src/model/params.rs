//! Two-Species Lotka-Volterra Parameters
//!
//! The classic predator-prey model:
//!
//!   dx/dt = α·x − β·x·y
//!   dy/dt = δ·x·y − γ·y
//!
//! where:
//! - x: prey population
//! - y: predator population
//! - α: prey growth rate
//! - β: predation rate (prey mortality per encounter)
//! - γ: predator death rate
//! - δ: predator growth rate (energy gained per encounter)
//!
//! The non-trivial equilibrium sits at (x*, y*) = (γ/δ, α/β); orbits around
//! it are closed, so the unperturbed system oscillates indefinitely.

use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Validated parameter set for a two-species run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotkaVolterraParams {
    /// Prey growth rate α
    pub prey_growth_rate: f64,
    /// Predation rate β (prey death per predator encounter)
    pub predation_rate: f64,
    /// Predator death rate γ
    pub predator_death_rate: f64,
    /// Predator growth rate δ (conversion of prey into predators)
    pub predator_growth_rate: f64,
    /// Prey population at t = 0
    pub initial_prey: f64,
    /// Predator population at t = 0
    pub initial_predator: f64,
    /// Simulated time span
    pub duration: f64,
    /// Fixed integration step
    pub time_step: f64,
}

impl LotkaVolterraParams {
    /// Create a validated parameter set
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        prey_growth_rate: f64,
        predation_rate: f64,
        predator_death_rate: f64,
        predator_growth_rate: f64,
        initial_prey: f64,
        initial_predator: f64,
        duration: f64,
        time_step: f64,
    ) -> Result<Self, ValidationError> {
        let params = Self {
            prey_growth_rate,
            predation_rate,
            predator_death_rate,
            predator_growth_rate,
            initial_prey,
            initial_predator,
            duration,
            time_step,
        };
        params.validate()?;
        Ok(params)
    }

    /// Textbook demo values: oscillating orbit far from equilibrium
    pub fn classic() -> Self {
        Self {
            prey_growth_rate: 1.1,
            predation_rate: 0.4,
            predator_death_rate: 0.4,
            predator_growth_rate: 0.1,
            initial_prey: 10.0,
            initial_predator: 10.0,
            duration: 50.0,
            time_step: 0.01,
        }
    }

    /// Check every invariant; cheap enough to call on every run
    pub fn validate(&self) -> Result<(), ValidationError> {
        let rates = [
            ("prey_growth_rate", self.prey_growth_rate),
            ("predation_rate", self.predation_rate),
            ("predator_death_rate", self.predator_death_rate),
            ("predator_growth_rate", self.predator_growth_rate),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::NegativeRate { field, value });
            }
        }

        let populations = [
            ("initial_prey", self.initial_prey),
            ("initial_predator", self.initial_predator),
        ];
        for (field, value) in populations {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::NegativePopulation { field, value });
            }
        }

        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ValidationError::InvalidDuration(self.duration));
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(ValidationError::InvalidTimeStep(self.time_step));
        }
        if self.time_step >= self.duration {
            return Err(ValidationError::TimeStepExceedsDuration {
                time_step: self.time_step,
                duration: self.duration,
            });
        }

        Ok(())
    }

    /// Number of integration steps a run will take
    pub fn n_steps(&self) -> usize {
        ((self.duration / self.time_step).round() as usize).max(1)
    }

    /// Add Gaussian noise to the initial populations
    ///
    /// Useful for sensitivity sweeps around a preset. Populations stay
    /// non-negative. A zero or negative `noise_std` is a no-op.
    pub fn perturb(&mut self, noise_std: f64) {
        if noise_std <= 0.0 || !noise_std.is_finite() {
            return;
        }
        let mut rng = rand::rng();
        let Ok(normal) = Normal::new(0.0, noise_std) else {
            return;
        };

        self.initial_prey = (self.initial_prey + normal.sample(&mut rng)).max(0.0);
        self.initial_predator = (self.initial_predator + normal.sample(&mut rng)).max(0.0);
    }
}

impl Default for LotkaVolterraParams {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_is_valid() {
        assert!(LotkaVolterraParams::classic().validate().is_ok());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut params = LotkaVolterraParams::classic();
        params.predation_rate = -0.1;
        assert_eq!(
            params.validate(),
            Err(ValidationError::NegativeRate {
                field: "predation_rate",
                value: -0.1,
            })
        );
    }

    #[test]
    fn test_zero_rate_allowed() {
        let mut params = LotkaVolterraParams::classic();
        params.prey_growth_rate = 0.0;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_nan_population_rejected() {
        let mut params = LotkaVolterraParams::classic();
        params.initial_prey = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_time_step_must_be_below_duration() {
        let mut params = LotkaVolterraParams::classic();
        params.time_step = params.duration;
        assert_eq!(
            params.validate(),
            Err(ValidationError::TimeStepExceedsDuration {
                time_step: params.duration,
                duration: params.duration,
            })
        );
    }

    #[test]
    fn test_zero_time_step_rejected() {
        let mut params = LotkaVolterraParams::classic();
        params.time_step = 0.0;
        assert_eq!(
            params.validate(),
            Err(ValidationError::InvalidTimeStep(0.0))
        );
    }

    #[test]
    fn test_n_steps_rounds() {
        let mut params = LotkaVolterraParams::classic();
        params.duration = 10.0;
        params.time_step = 0.1;
        assert_eq!(params.n_steps(), 100);
    }

    #[test]
    fn test_perturb_keeps_populations_non_negative() {
        let mut params = LotkaVolterraParams::classic();
        params.initial_prey = 0.001;
        params.initial_predator = 0.001;
        for _ in 0..50 {
            let mut p = params.clone();
            p.perturb(1.0);
            assert!(p.initial_prey >= 0.0 && p.initial_predator >= 0.0);
        }
    }
}
