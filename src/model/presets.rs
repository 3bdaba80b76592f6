//! Preset Scenarios
//!
//! A read-only table of ready-to-run parameter sets, loaded once by the
//! caller at startup. Each entry pairs a [`LotkaVolterraParams`] value with
//! an (often empty) [`EventSchedule`] and a blurb for the scenario picker.
//! Nothing here is mutated at runtime; [`preset_scenarios`] builds fresh
//! literals on every call.
//!
//! Durations come with a 1000-sample resolution, so `time_step` is
//! `duration / 1000`.

use serde::Serialize;

use crate::model::events::{EnvironmentalEvent, EventSchedule, EventTarget};
use crate::model::params::LotkaVolterraParams;

/// One entry of the scenario picker
#[derive(Debug, Clone, Serialize)]
pub struct PresetScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub params: LotkaVolterraParams,
    pub events: EventSchedule,
}

fn params(
    alpha: f64,
    beta: f64,
    gamma: f64,
    delta: f64,
    prey: f64,
    predator: f64,
    duration: f64,
) -> LotkaVolterraParams {
    LotkaVolterraParams {
        prey_growth_rate: alpha,
        predation_rate: beta,
        predator_death_rate: gamma,
        predator_growth_rate: delta,
        initial_prey: prey,
        initial_predator: predator,
        duration,
        time_step: duration / 1000.0,
    }
}

/// The full preset table, in picker order
pub fn preset_scenarios() -> Vec<PresetScenario> {
    vec![
        PresetScenario {
            name: "Desert Ecosystem",
            description: "A desert ecosystem with limited resources. Features lower \
                          reproduction rates and higher mortality.",
            params: params(0.6, 0.2, 0.4, 0.08, 70.0, 30.0, 150.0),
            events: EventSchedule::empty(),
        },
        PresetScenario {
            name: "Forest Ecosystem",
            description: "A forest ecosystem with abundant resources. Features higher \
                          reproduction rates and generally stable populations.",
            params: params(1.2, 0.15, 0.3, 0.12, 120.0, 40.0, 150.0),
            events: EventSchedule::empty(),
        },
        PresetScenario {
            name: "Marine Ecosystem",
            description: "A marine ecosystem with high biodiversity. Features high prey \
                          reproduction but specialized predators.",
            params: params(1.5, 0.1, 0.25, 0.08, 200.0, 30.0, 150.0),
            events: EventSchedule::empty(),
        },
        PresetScenario {
            name: "Unstable Ecosystem",
            description: "An ecosystem on the brink. Features extreme parameter values \
                          that lead to oscillatory behavior or population crashes.",
            params: params(1.8, 0.3, 0.2, 0.2, 50.0, 40.0, 150.0),
            events: EventSchedule::empty(),
        },
        PresetScenario {
            name: "Arctic Ecosystem",
            description: "A cold environment with slow growth rates but strong resilience.",
            params: params(0.5, 0.05, 0.3, 0.1, 150.0, 20.0, 150.0),
            events: EventSchedule::empty(),
        },
        PresetScenario {
            name: "Island Ecosystem",
            description: "An isolated ecosystem with specialized species and limited \
                          resources.",
            params: params(1.0, 0.2, 0.35, 0.15, 80.0, 15.0, 150.0),
            events: EventSchedule::empty(),
        },
        PresetScenario {
            name: "Grassland Ecosystem",
            description: "An open ecosystem with abundant primary producers and visible \
                          predator-prey dynamics.",
            params: params(1.3, 0.12, 0.28, 0.09, 180.0, 35.0, 150.0),
            events: EventSchedule::empty(),
        },
        PresetScenario {
            name: "Climate Change Scenario",
            description: "A simulation of climate change impacts on a standard ecosystem.",
            params: params(1.1, 0.1, 0.3, 0.1, 100.0, 50.0, 200.0),
            events: EventSchedule::from_events(vec![EnvironmentalEvent::climate_change(
                50.0,
                -0.18,
                EventTarget::Both,
            )]),
        },
        PresetScenario {
            name: "Habitat Loss Scenario",
            description: "A simulation of progressive habitat destruction on ecosystem \
                          dynamics.",
            params: params(1.1, 0.1, 0.3, 0.1, 100.0, 50.0, 200.0),
            events: EventSchedule::from_events(vec![EnvironmentalEvent::habitat_loss(
                50.0,
                0.35,
                EventTarget::Both,
            )]),
        },
        PresetScenario {
            name: "Epidemic Scenario",
            description: "A simulation of disease outbreak hitting the predator \
                          population.",
            params: params(1.1, 0.1, 0.3, 0.1, 100.0, 50.0, 200.0),
            events: EventSchedule::from_events(vec![EnvironmentalEvent::disease(
                50.0,
                0.4,
                EventTarget::Predator,
            )]),
        },
    ]
}

/// Look a preset up by its picker name
pub fn find(name: &str) -> Option<PresetScenario> {
    preset_scenarios().into_iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_validates() {
        for preset in preset_scenarios() {
            assert!(
                preset.params.validate().is_ok(),
                "{} has invalid params",
                preset.name
            );
            assert!(
                preset.events.validate(preset.params.duration).is_ok(),
                "{} has an invalid schedule",
                preset.name
            );
        }
    }

    #[test]
    fn test_find_by_name() {
        let preset = find("Epidemic Scenario").expect("known preset");
        assert_eq!(preset.events.len(), 1);
        assert!(find("Tundra Ecosystem").is_none());
    }

    #[test]
    fn test_resolution_is_a_thousand_samples() {
        for preset in preset_scenarios() {
            assert_eq!(preset.params.n_steps(), 1000, "{}", preset.name);
        }
    }
}
