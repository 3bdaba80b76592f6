//! Food Web Walkthrough
//!
//! Builds the three-species forest and marine chains, integrates both,
//! and prints the derived metrics side by side. The marine run also takes
//! a habitat-loss hit to its producer to show event targeting by id.

use ecosim::{
    analyze, simulate_multi, EnvironmentalEvent, EventSchedule, EventTarget, FoodWeb, Species,
    Trajectory,
};

/// Plants -> herbivores -> carnivores
fn forest_web() -> FoodWeb {
    let mut web = FoodWeb::new(100.0, 0.1);
    web.add_species(Species::new("plants", 0.5, 0.0, 500.0).with_capacity(1000.0));
    web.add_species(Species::new("herbivores", 0.0, 0.2, 100.0));
    web.add_species(Species::new("carnivores", 0.0, 0.3, 30.0));
    web.add_predation("plants", "herbivores", 0.01, 0.02);
    web.add_predation("herbivores", "carnivores", 0.02, 0.01);
    web
}

/// Phytoplankton -> zooplankton -> small fish
fn marine_web() -> FoodWeb {
    let mut web = FoodWeb::new(100.0, 0.1);
    web.add_species(Species::new("phytoplankton", 0.8, 0.0, 800.0).with_capacity(2000.0));
    web.add_species(Species::new("zooplankton", 0.0, 0.1, 200.0));
    web.add_species(Species::new("small fish", 0.0, 0.2, 100.0));
    web.add_predation("phytoplankton", "zooplankton", 0.01, 0.02);
    web.add_predation("zooplankton", "small fish", 0.02, 0.01);
    web
}

fn report(name: &str, web: &FoodWeb, trajectory: &Trajectory) {
    println!("\n{name}:");
    println!(
        "  {} species, {} interactions, {} samples",
        web.n_species(),
        web.interactions().len(),
        trajectory.len()
    );

    let finals = trajectory.final_sample();
    for (i, species) in trajectory.species().iter().enumerate() {
        println!(
            "  {:<14} {:>8.1} -> {:>8.1}",
            species,
            trajectory.population(0, i),
            finals[i]
        );
    }

    let metrics = analyze(trajectory).expect("trajectory is non-empty");
    println!("  stability: {:?}", metrics.stability);
    if let Some(equilibrium) = &metrics.equilibrium {
        for (species, level) in equilibrium {
            println!("  equilibrium {species}: {level:.1}");
        }
    }
    for event in &metrics.extinction_events {
        println!("  extinction: {} at t = {:.1}", event.species, event.time);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Generalized Lotka-Volterra: Food Web Chains");
    println!("═══════════════════════════════════════════════════════════════");

    let forest = forest_web();
    let forest_run =
        simulate_multi(&forest, &EventSchedule::empty()).expect("forest web is valid");
    report("Forest chain", &forest, &forest_run);

    let marine = marine_web();
    let marine_run =
        simulate_multi(&marine, &EventSchedule::empty()).expect("marine web is valid");
    report("Marine chain", &marine, &marine_run);

    // Wipe out most of the plankton bloom halfway through
    let schedule = EventSchedule::from_events(vec![EnvironmentalEvent::habitat_loss(
        50.0,
        0.7,
        EventTarget::Species("phytoplankton".into()),
    )]);
    let stressed_run = simulate_multi(&marine, &schedule).expect("schedule is valid");
    report("Marine chain, 70% producer habitat loss at t = 50", &marine, &stressed_run);
}
