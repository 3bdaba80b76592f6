//! Two-Species Lotka-Volterra Dynamics
//!
//! State vector: `[prey, predator]`. Derivatives:
//!
//!   dx/dt = α·x − β·x·y
//!   dy/dt = δ·x·y − γ·y
//!
//! Event semantics:
//!
//! - ClimateChange scales the growth rate (α for prey, δ for the predator)
//!   by `1 + magnitude`.
//! - HabitatLoss culls the population by the `magnitude` fraction.
//! - Disease culls and raises the death rate by `1 + magnitude`. The prey's
//!   only mortality channel is predation, so its death rate is β; the
//!   predator's is γ.
//! - Custom applies an additive or multiplicative modifier to one named
//!   rate. Rates never go below zero.

use crate::error::ValidationError;
use crate::model::events::{
    EnvironmentalEvent, EventKind, EventTarget, ModifierMode, RateParam,
};
use crate::model::params::LotkaVolterraParams;

use super::traits::{cull, scale_rate, EcosystemDynamics};

/// Species label of the prey series
pub const PREY_ID: &str = "prey";
/// Species label of the predator series
pub const PREDATOR_ID: &str = "predator";

/// Runnable two-species model; owns its rates for the duration of one run
#[derive(Debug, Clone)]
pub struct PairDynamics {
    /// Prey growth rate α
    alpha: f64,
    /// Predation rate β
    beta: f64,
    /// Predator death rate γ
    gamma: f64,
    /// Predator growth rate δ
    delta: f64,
    initial_prey: f64,
    initial_predator: f64,
    duration: f64,
    time_step: f64,
}

impl PairDynamics {
    /// Build from a validated parameter set
    pub fn new(params: &LotkaVolterraParams) -> Self {
        Self {
            alpha: params.prey_growth_rate,
            beta: params.predation_rate,
            gamma: params.predator_death_rate,
            delta: params.predator_growth_rate,
            initial_prey: params.initial_prey,
            initial_predator: params.initial_predator,
            duration: params.duration,
            time_step: params.time_step,
        }
    }

    /// Which sides of the pair an event target addresses
    fn resolve_target(target: &EventTarget) -> Result<(bool, bool), ValidationError> {
        match target {
            EventTarget::Prey => Ok((true, false)),
            EventTarget::Predator => Ok((false, true)),
            EventTarget::Both | EventTarget::AllSpecies => Ok((true, true)),
            EventTarget::Species(id) if id == PREY_ID => Ok((true, false)),
            EventTarget::Species(id) if id == PREDATOR_ID => Ok((false, true)),
            EventTarget::Species(id) => Err(ValidationError::UnknownEventTarget(id.clone())),
        }
    }

    fn modify(rate: f64, mode: ModifierMode, magnitude: f64) -> f64 {
        match mode {
            ModifierMode::Additive => (rate + magnitude).max(0.0),
            ModifierMode::Multiplicative => scale_rate(rate, magnitude),
        }
    }
}

impl EcosystemDynamics for PairDynamics {
    fn species_ids(&self) -> Vec<String> {
        vec![PREY_ID.to_string(), PREDATOR_ID.to_string()]
    }

    fn n_species(&self) -> usize {
        2
    }

    fn initial_state(&self) -> Vec<f64> {
        vec![self.initial_prey, self.initial_predator]
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn time_step(&self) -> f64 {
        self.time_step
    }

    fn derivatives(&self, y: &[f64], dy: &mut [f64]) {
        let (x, p) = (y[0], y[1]);
        dy[0] = self.alpha * x - self.beta * x * p;
        dy[1] = self.delta * x * p - self.gamma * p;
    }

    fn validate_event(&self, event: &EnvironmentalEvent) -> Result<(), ValidationError> {
        Self::resolve_target(&event.target).map(|_| ())
    }

    fn apply_event(&mut self, event: &EnvironmentalEvent, y: &mut [f64]) {
        let (prey, predator) = match Self::resolve_target(&event.target) {
            Ok(flags) => flags,
            // validate_event already ran; unreachable in practice
            Err(_) => return,
        };

        match &event.kind {
            EventKind::ClimateChange => {
                let factor = 1.0 + event.magnitude;
                if prey {
                    self.alpha = scale_rate(self.alpha, factor);
                }
                if predator {
                    self.delta = scale_rate(self.delta, factor);
                }
            }
            EventKind::HabitatLoss => {
                if prey {
                    y[0] = cull(y[0], event.magnitude);
                }
                if predator {
                    y[1] = cull(y[1], event.magnitude);
                }
            }
            EventKind::Disease => {
                let factor = 1.0 + event.magnitude;
                if prey {
                    y[0] = cull(y[0], event.magnitude);
                    self.beta = scale_rate(self.beta, factor);
                }
                if predator {
                    y[1] = cull(y[1], event.magnitude);
                    self.gamma = scale_rate(self.gamma, factor);
                }
            }
            EventKind::Custom { parameter, mode } => match parameter {
                RateParam::GrowthRate => {
                    if prey {
                        self.alpha = Self::modify(self.alpha, *mode, event.magnitude);
                    }
                    if predator {
                        self.delta = Self::modify(self.delta, *mode, event.magnitude);
                    }
                }
                RateParam::DeathRate => {
                    if prey {
                        self.beta = Self::modify(self.beta, *mode, event.magnitude);
                    }
                    if predator {
                        self.gamma = Self::modify(self.gamma, *mode, event.magnitude);
                    }
                }
                // shared rates: the target selects nothing extra
                RateParam::PredationRate => {
                    self.beta = Self::modify(self.beta, *mode, event.magnitude);
                }
                RateParam::ConversionRate => {
                    self.delta = Self::modify(self.delta, *mode, event.magnitude);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> PairDynamics {
        PairDynamics::new(&LotkaVolterraParams::classic())
    }

    #[test]
    fn test_derivatives_match_equations() {
        let sys = system();
        let mut dy = [0.0; 2];
        sys.derivatives(&[10.0, 10.0], &mut dy);
        // dx/dt = 1.1*10 - 0.4*10*10 = -29, dp/dt = 0.1*10*10 - 0.4*10 = 6
        assert!((dy[0] - (-29.0)).abs() < 1e-12, "got {}", dy[0]);
        assert!((dy[1] - 6.0).abs() < 1e-12, "got {}", dy[1]);
    }

    #[test]
    fn test_climate_change_scales_growth() {
        let mut sys = system();
        let mut y = [10.0, 10.0];
        let event = EnvironmentalEvent::climate_change(0.0, -0.5, EventTarget::Prey);
        sys.apply_event(&event, &mut y);
        assert!((sys.alpha - 0.55).abs() < 1e-12);
        // predator growth untouched
        assert!((sys.delta - 0.1).abs() < 1e-12);
        assert_eq!(y, [10.0, 10.0]);
    }

    #[test]
    fn test_habitat_loss_culls_population() {
        let mut sys = system();
        let mut y = [100.0, 40.0];
        let event = EnvironmentalEvent::habitat_loss(0.0, 0.25, EventTarget::Both);
        sys.apply_event(&event, &mut y);
        assert_eq!(y, [75.0, 30.0]);
    }

    #[test]
    fn test_disease_culls_and_raises_death_rate() {
        let mut sys = system();
        let mut y = [100.0, 40.0];
        let event = EnvironmentalEvent::disease(0.0, 0.5, EventTarget::Predator);
        sys.apply_event(&event, &mut y);
        assert_eq!(y, [100.0, 20.0]);
        assert!((sys.gamma - 0.6).abs() < 1e-12, "gamma = {}", sys.gamma);
    }

    #[test]
    fn test_custom_additive_modifier() {
        let mut sys = system();
        let mut y = [10.0, 10.0];
        let event = EnvironmentalEvent::custom(
            0.0,
            RateParam::PredationRate,
            ModifierMode::Additive,
            0.1,
            EventTarget::Both,
        );
        sys.apply_event(&event, &mut y);
        assert!((sys.beta - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_species_target_rejected() {
        let sys = system();
        let event =
            EnvironmentalEvent::disease(0.0, 0.5, EventTarget::Species("wolf".into()));
        assert_eq!(
            sys.validate_event(&event),
            Err(ValidationError::UnknownEventTarget("wolf".into()))
        );
    }

    #[test]
    fn test_species_target_by_id_resolves() {
        let sys = system();
        let event = EnvironmentalEvent::disease(0.0, 0.5, EventTarget::Species("prey".into()));
        assert!(sys.validate_event(&event).is_ok());
    }
}
