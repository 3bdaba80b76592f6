//! Generalized Lotka-Volterra Dynamics over a Food Web
//!
//! State vector: one entry per species, in declaration order. Each
//! derivative is the intrinsic term plus the summed pairwise interactions:
//!
//!   dy_i/dt = r_i·y_i·(1 − y_i/K_i) − d_i·y_i + Σ_j a_ij·y_i·y_j
//!
//! The logistic factor applies to the growth term only, and only when a
//! carrying capacity is set; death stays linear. With the matrix entries
//! of a single predation link this reduces to the two-species equations.
//!
//! Events address species by id (or all at once); the two-species
//! `Prey`/`Predator`/`Both` targets and the shared pair rates have no
//! meaning here and are rejected before a run starts.

use ndarray::Array2;

use crate::error::ValidationError;
use crate::model::events::{EnvironmentalEvent, EventKind, EventTarget, ModifierMode, RateParam};
use crate::model::food_web::FoodWeb;

use super::traits::{cull, scale_rate, EcosystemDynamics};

/// Runnable N-species model; owns its rates for the duration of one run
#[derive(Debug, Clone)]
pub struct WebDynamics {
    ids: Vec<String>,
    /// Intrinsic growth rates r_i
    growth: Vec<f64>,
    /// Intrinsic death rates d_i
    death: Vec<f64>,
    /// Optional carrying capacities K_i
    capacity: Vec<Option<f64>>,
    /// `matrix[[i, j]]`: effect of species j on species i
    matrix: Array2<f64>,
    initial: Vec<f64>,
    duration: f64,
    time_step: f64,
}

impl WebDynamics {
    /// Build from a validated food web
    pub fn new(web: &FoodWeb) -> Self {
        let species = web.species();
        Self {
            ids: species.iter().map(|s| s.id.clone()).collect(),
            growth: species.iter().map(|s| s.growth_rate).collect(),
            death: species.iter().map(|s| s.death_rate).collect(),
            capacity: species.iter().map(|s| s.carrying_capacity).collect(),
            matrix: web.interaction_matrix(),
            initial: species.iter().map(|s| s.initial_population).collect(),
            duration: web.duration,
            time_step: web.time_step,
        }
    }

    /// State indices an event target addresses
    fn resolve_target(&self, target: &EventTarget) -> Result<Vec<usize>, ValidationError> {
        match target {
            EventTarget::AllSpecies => Ok((0..self.ids.len()).collect()),
            EventTarget::Species(id) => match self.ids.iter().position(|s| s == id) {
                Some(index) => Ok(vec![index]),
                None => Err(ValidationError::UnknownEventTarget(id.clone())),
            },
            EventTarget::Prey | EventTarget::Predator | EventTarget::Both => {
                Err(ValidationError::TargetNotApplicable {
                    target: target.label(),
                    model: "a food web",
                })
            }
        }
    }

    fn modify(rate: f64, mode: ModifierMode, magnitude: f64) -> f64 {
        match mode {
            ModifierMode::Additive => (rate + magnitude).max(0.0),
            ModifierMode::Multiplicative => scale_rate(rate, magnitude),
        }
    }
}

impl EcosystemDynamics for WebDynamics {
    fn species_ids(&self) -> Vec<String> {
        self.ids.clone()
    }

    fn n_species(&self) -> usize {
        self.ids.len()
    }

    fn initial_state(&self) -> Vec<f64> {
        self.initial.clone()
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn time_step(&self) -> f64 {
        self.time_step
    }

    fn derivatives(&self, y: &[f64], dy: &mut [f64]) {
        let n = self.ids.len();
        for i in 0..n {
            let growth = match self.capacity[i] {
                Some(k) => self.growth[i] * y[i] * (1.0 - y[i] / k),
                None => self.growth[i] * y[i],
            };
            let mut rate = growth - self.death[i] * y[i];
            for j in 0..n {
                rate += self.matrix[[i, j]] * y[i] * y[j];
            }
            dy[i] = rate;
        }
    }

    fn validate_event(&self, event: &EnvironmentalEvent) -> Result<(), ValidationError> {
        self.resolve_target(&event.target)?;
        if let EventKind::Custom { parameter, .. } = &event.kind {
            match parameter {
                RateParam::GrowthRate | RateParam::DeathRate => {}
                RateParam::PredationRate | RateParam::ConversionRate => {
                    return Err(ValidationError::ParamNotApplicable {
                        param: parameter.label(),
                        model: "a food web (pairwise rates live on interaction edges)",
                    });
                }
            }
        }
        Ok(())
    }

    fn apply_event(&mut self, event: &EnvironmentalEvent, y: &mut [f64]) {
        let indices = match self.resolve_target(&event.target) {
            Ok(indices) => indices,
            // validate_event already ran; unreachable in practice
            Err(_) => return,
        };

        match &event.kind {
            EventKind::ClimateChange => {
                let factor = 1.0 + event.magnitude;
                for i in indices {
                    self.growth[i] = scale_rate(self.growth[i], factor);
                }
            }
            EventKind::HabitatLoss => {
                for i in indices {
                    y[i] = cull(y[i], event.magnitude);
                }
            }
            EventKind::Disease => {
                let factor = 1.0 + event.magnitude;
                for i in indices {
                    y[i] = cull(y[i], event.magnitude);
                    self.death[i] = scale_rate(self.death[i], factor);
                }
            }
            EventKind::Custom { parameter, mode } => {
                for i in indices {
                    match parameter {
                        RateParam::GrowthRate => {
                            self.growth[i] = Self::modify(self.growth[i], *mode, event.magnitude);
                        }
                        RateParam::DeathRate => {
                            self.death[i] = Self::modify(self.death[i], *mode, event.magnitude);
                        }
                        // rejected by validate_event
                        RateParam::PredationRate | RateParam::ConversionRate => {}
                    }
                }
            }
        }
    }
}
