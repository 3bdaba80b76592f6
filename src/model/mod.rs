//! Input Data Model: Parameters, Events, Food Webs, Presets
//!
//! Everything a caller hands to the simulation core lives here:
//!
//! - [`LotkaVolterraParams`]: validated two-species parameter record
//! - [`EnvironmentalEvent`] / [`EventSchedule`]: scheduled perturbations
//! - [`FoodWeb`]: N-species interaction graph for the generalized model
//! - [`presets`]: read-only table of preset scenarios
//!
//! All records are plain serde-serializable data. Validation happens up
//! front; a record that passes [`LotkaVolterraParams::validate`] or
//! [`FoodWeb::validate`] will never fail mid-run.

pub mod events;
pub mod food_web;
pub mod params;
pub mod presets;

pub use events::{
    EnvironmentalEvent, EventKind, EventSchedule, EventTarget, ModifierMode, RateParam,
};
pub use food_web::{FoodWeb, Interaction, Species};
pub use params::LotkaVolterraParams;
pub use presets::PresetScenario;
