//! Environmental Events: Discrete Mid-Run Perturbations
//!
//! An event fires once, at the first step boundary at or past its trigger
//! time, and modifies either the populations or the rates of the species it
//! targets:
//!
//! - **ClimateChange**: scales the growth rate of the targeted species by
//!   `1 + magnitude` for the rest of the run. A negative magnitude models
//!   stress, a positive one a favourable shift.
//! - **HabitatLoss**: instantly culls the targeted populations by the
//!   `magnitude` fraction (floored at zero).
//! - **Disease**: culls by the `magnitude` fraction and raises the targeted
//!   species' death rate by the same proportion for the rest of the run.
//! - **Custom**: additive or multiplicative modifier on one named rate.
//!
//! Events are immutable once scheduled. A schedule keeps them ordered by
//! trigger time, with insertion order breaking ties.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Which species an event applies to
///
/// `Prey`/`Predator`/`Both` address the two-species model; food webs are
/// addressed by id or all at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTarget {
    Prey,
    Predator,
    Both,
    /// Every species in the model
    AllSpecies,
    /// A single species, by id
    Species(String),
}

impl EventTarget {
    /// Short label for error messages
    pub fn label(&self) -> &'static str {
        match self {
            EventTarget::Prey => "Prey",
            EventTarget::Predator => "Predator",
            EventTarget::Both => "Both",
            EventTarget::AllSpecies => "AllSpecies",
            EventTarget::Species(_) => "Species",
        }
    }
}

/// Named rate a [`EventKind::Custom`] event modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateParam {
    /// Intrinsic growth: α for prey, δ for predators, per-species r in a web
    GrowthRate,
    /// Mortality: β for prey, γ for predators, per-species d in a web
    DeathRate,
    /// β in the two-species model (no web counterpart)
    PredationRate,
    /// δ in the two-species model (no web counterpart)
    ConversionRate,
}

impl RateParam {
    pub fn label(&self) -> &'static str {
        match self {
            RateParam::GrowthRate => "GrowthRate",
            RateParam::DeathRate => "DeathRate",
            RateParam::PredationRate => "PredationRate",
            RateParam::ConversionRate => "ConversionRate",
        }
    }
}

/// How a custom modifier combines with the current rate value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierMode {
    /// `rate += magnitude`
    Additive,
    /// `rate *= magnitude`
    Multiplicative,
}

/// Closed set of event kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    ClimateChange,
    HabitatLoss,
    Disease,
    Custom {
        parameter: RateParam,
        mode: ModifierMode,
    },
}

/// One scheduled perturbation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalEvent {
    /// Simulation time at which the event fires
    pub trigger_time: f64,
    /// What the event does
    pub kind: EventKind,
    /// Effect size; fraction for culls, rate factor otherwise
    pub magnitude: f64,
    /// Which species it applies to
    pub target: EventTarget,
}

impl EnvironmentalEvent {
    pub fn climate_change(trigger_time: f64, magnitude: f64, target: EventTarget) -> Self {
        Self {
            trigger_time,
            kind: EventKind::ClimateChange,
            magnitude,
            target,
        }
    }

    pub fn habitat_loss(trigger_time: f64, magnitude: f64, target: EventTarget) -> Self {
        Self {
            trigger_time,
            kind: EventKind::HabitatLoss,
            magnitude,
            target,
        }
    }

    pub fn disease(trigger_time: f64, magnitude: f64, target: EventTarget) -> Self {
        Self {
            trigger_time,
            kind: EventKind::Disease,
            magnitude,
            target,
        }
    }

    pub fn custom(
        trigger_time: f64,
        parameter: RateParam,
        mode: ModifierMode,
        magnitude: f64,
        target: EventTarget,
    ) -> Self {
        Self {
            trigger_time,
            kind: EventKind::Custom { parameter, mode },
            magnitude,
            target,
        }
    }

    /// Model-independent checks; target resolution is checked by the model
    pub fn validate(&self, duration: f64) -> Result<(), ValidationError> {
        if !self.trigger_time.is_finite()
            || self.trigger_time < 0.0
            || self.trigger_time > duration
        {
            return Err(ValidationError::EventOutOfWindow {
                trigger_time: self.trigger_time,
                duration,
            });
        }
        if !self.magnitude.is_finite() {
            return Err(ValidationError::NonFiniteMagnitude(self.magnitude));
        }
        Ok(())
    }
}

/// Ordered sequence of events, sorted by trigger time
///
/// The sort is stable: events sharing a trigger time fire in the order they
/// were scheduled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSchedule {
    events: Vec<EnvironmentalEvent>,
}

impl EventSchedule {
    /// Empty schedule (the common case)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a schedule from events in any order
    pub fn from_events(events: Vec<EnvironmentalEvent>) -> Self {
        let mut schedule = Self { events };
        schedule.sort();
        schedule
    }

    /// Add one event, keeping the schedule ordered
    pub fn push(&mut self, event: EnvironmentalEvent) {
        self.events.push(event);
        self.sort();
    }

    fn sort(&mut self) {
        self.events
            .sort_by(|a, b| a.trigger_time.total_cmp(&b.trigger_time));
    }

    /// Events in firing order
    pub fn events(&self) -> &[EnvironmentalEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Model-independent validation of every event
    pub fn validate(&self, duration: f64) -> Result<(), ValidationError> {
        for event in &self.events {
            event.validate(duration)?;
        }
        Ok(())
    }
}
