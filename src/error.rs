//! Error types for simulation setup and trajectory analysis.
//!
//! Only malformed inputs are errors. Ecological outcomes that a caller must
//! visualize (divergence, extinction) are carried as data on
//! [`Trajectory`](crate::Trajectory) and [`Metrics`](crate::Metrics),
//! never raised.

use thiserror::Error;

/// Crate-wide result type
pub type Result<T, E = ValidationError> = std::result::Result<T, E>;

/// Rejected before any integration work begins
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be finite and non-negative, got {value}")]
    NegativeRate { field: &'static str, value: f64 },

    #[error("{field} must be finite and non-negative, got {value}")]
    NegativePopulation { field: &'static str, value: f64 },

    #[error("duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    #[error("time_step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("time_step ({time_step}) must be smaller than duration ({duration})")]
    TimeStepExceedsDuration { time_step: f64, duration: f64 },

    #[error("event trigger time {trigger_time} outside simulation window [0, {duration}]")]
    EventOutOfWindow { trigger_time: f64, duration: f64 },

    #[error("event magnitude must be finite, got {0}")]
    NonFiniteMagnitude(f64),

    #[error("event targets unknown species \"{0}\"")]
    UnknownEventTarget(String),

    #[error("event target {target} is not meaningful for {model}")]
    TargetNotApplicable { target: &'static str, model: &'static str },

    #[error("parameter {param} does not exist in {model}")]
    ParamNotApplicable { param: &'static str, model: &'static str },

    #[error("food web has no species")]
    EmptyFoodWeb,

    #[error("duplicate species id \"{0}\"")]
    DuplicateSpecies(String),

    #[error("interaction references unknown species \"{0}\"")]
    UnknownSpecies(String),

    #[error("interaction \"{source}\" -> \"{target}\" has non-finite coefficient {coefficient}")]
    NonFiniteCoefficient {
        source: String,
        target: String,
        coefficient: f64,
    },

    #[error("species \"{species}\" carrying capacity must be positive, got {capacity}")]
    InvalidCarryingCapacity { species: String, capacity: f64 },
}

/// Raised by [`analyze`](crate::analyze) when a trajectory carries no data at all
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("cannot analyze an empty trajectory")]
    EmptyTrajectory,
}
