//! Food Webs: N-Species Interaction Graphs
//!
//! The generalized Lotka-Volterra model. Each species carries an intrinsic
//! growth and death rate; pairwise effects are directed weighted edges:
//!
//!   dy_i/dt = (r_i − d_i)·y_i·(1 − y_i/K_i) + Σ_j a_ij·y_i·y_j
//!
//! where `a_ij` is the summed coefficient of edges from species j to
//! species i. Coefficient signs encode the relationship:
//!
//! - predation: negative on the prey side, positive on the predator side
//! - competition: negative both ways
//! - mutualism: positive both ways
//!
//! The logistic factor only applies when a carrying capacity K_i is set;
//! without one the intrinsic term is plain exponential growth or decay.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One species in the web
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Unique id, used by interactions and event targets
    pub id: String,
    /// Intrinsic growth rate r
    pub growth_rate: f64,
    /// Intrinsic death rate d
    pub death_rate: f64,
    /// Population at t = 0
    pub initial_population: f64,
    /// Optional carrying capacity K; None means unbounded intrinsic growth
    pub carrying_capacity: Option<f64>,
}

impl Species {
    pub fn new(
        id: impl Into<String>,
        growth_rate: f64,
        death_rate: f64,
        initial_population: f64,
    ) -> Self {
        Self {
            id: id.into(),
            growth_rate,
            death_rate,
            initial_population,
            carrying_capacity: None,
        }
    }

    /// Same species, bounded by a carrying capacity
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.carrying_capacity = Some(capacity);
        self
    }
}

/// Directed weighted edge: the effect of `source` on `target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub source: String,
    pub target: String,
    /// Contribution `coefficient · y_source · y_target` to the target's derivative
    pub coefficient: f64,
}

impl Interaction {
    pub fn new(source: impl Into<String>, target: impl Into<String>, coefficient: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            coefficient,
        }
    }
}

/// Validated N-species model: species set, interaction edges, run window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodWeb {
    species: Vec<Species>,
    interactions: Vec<Interaction>,
    /// Simulated time span
    pub duration: f64,
    /// Fixed integration step
    pub time_step: f64,
}

impl FoodWeb {
    /// Empty web; populate with [`add_species`](Self::add_species) and the
    /// interaction helpers
    pub fn new(duration: f64, time_step: f64) -> Self {
        Self {
            species: Vec::new(),
            interactions: Vec::new(),
            duration,
            time_step,
        }
    }

    pub fn add_species(&mut self, species: Species) -> &mut Self {
        self.species.push(species);
        self
    }

    pub fn add_interaction(&mut self, interaction: Interaction) -> &mut Self {
        self.interactions.push(interaction);
        self
    }

    /// Predation link: prey loses, predator gains
    pub fn add_predation(&mut self, prey: &str, predator: &str, loss: f64, gain: f64) -> &mut Self {
        self.add_interaction(Interaction::new(predator, prey, -loss));
        self.add_interaction(Interaction::new(prey, predator, gain));
        self
    }

    /// Competition link: both sides lose
    pub fn add_competition(&mut self, a: &str, b: &str, strength: f64) -> &mut Self {
        self.add_interaction(Interaction::new(a, b, -strength));
        self.add_interaction(Interaction::new(b, a, -strength));
        self
    }

    /// Mutualism link: both sides gain
    pub fn add_mutualism(&mut self, a: &str, b: &str, strength: f64) -> &mut Self {
        self.add_interaction(Interaction::new(a, b, strength));
        self.add_interaction(Interaction::new(b, a, strength));
        self
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn n_species(&self) -> usize {
        self.species.len()
    }

    /// Index of a species id, if it exists
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.species.iter().position(|s| s.id == id)
    }

    /// Number of integration steps a run will take
    pub fn n_steps(&self) -> usize {
        ((self.duration / self.time_step).round() as usize).max(1)
    }

    /// Dense interaction matrix: `a[[i, j]]` is the summed effect of
    /// species j on species i
    pub fn interaction_matrix(&self) -> Array2<f64> {
        let n = self.species.len();
        let mut matrix = Array2::zeros((n, n));
        for edge in &self.interactions {
            // validate() guarantees both lookups succeed
            if let (Some(target), Some(source)) =
                (self.index_of(&edge.target), self.index_of(&edge.source))
            {
                matrix[[target, source]] += edge.coefficient;
            }
        }
        matrix
    }

    /// Reject malformed webs before any integration begins
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.species.is_empty() {
            return Err(ValidationError::EmptyFoodWeb);
        }

        for (i, species) in self.species.iter().enumerate() {
            if self.species[..i].iter().any(|s| s.id == species.id) {
                return Err(ValidationError::DuplicateSpecies(species.id.clone()));
            }
            if !species.growth_rate.is_finite() || species.growth_rate < 0.0 {
                return Err(ValidationError::NegativeRate {
                    field: "growth_rate",
                    value: species.growth_rate,
                });
            }
            if !species.death_rate.is_finite() || species.death_rate < 0.0 {
                return Err(ValidationError::NegativeRate {
                    field: "death_rate",
                    value: species.death_rate,
                });
            }
            if !species.initial_population.is_finite() || species.initial_population < 0.0 {
                return Err(ValidationError::NegativePopulation {
                    field: "initial_population",
                    value: species.initial_population,
                });
            }
            if let Some(capacity) = species.carrying_capacity {
                if !capacity.is_finite() || capacity <= 0.0 {
                    return Err(ValidationError::InvalidCarryingCapacity {
                        species: species.id.clone(),
                        capacity,
                    });
                }
            }
        }

        for edge in &self.interactions {
            if self.index_of(&edge.source).is_none() {
                return Err(ValidationError::UnknownSpecies(edge.source.clone()));
            }
            if self.index_of(&edge.target).is_none() {
                return Err(ValidationError::UnknownSpecies(edge.target.clone()));
            }
            if !edge.coefficient.is_finite() {
                return Err(ValidationError::NonFiniteCoefficient {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    coefficient: edge.coefficient,
                });
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
}
