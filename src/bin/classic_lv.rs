//! Classic Lotka-Volterra Walkthrough
//!
//! Runs the textbook oscillating scenario, prints its cycle metrics, then
//! repeats the run with a predator epidemic scheduled halfway through to
//! show how a single event reshapes the orbit.

use ecosim::{
    analyze, simulate, EnvironmentalEvent, EventSchedule, EventTarget, LotkaVolterraParams,
    Metrics,
};

fn print_metrics(metrics: &Metrics) {
    println!("  Stability:  {:?}", metrics.stability);
    match metrics.period {
        Some(period) => println!("  Period:     {:.2}", period),
        None => println!("  Period:     -"),
    }
    match metrics.amplitude {
        Some(amplitude) => println!("  Amplitude:  {:.2}", amplitude),
        None => println!("  Amplitude:  -"),
    }
    match metrics.phase_lag {
        Some(lag) => println!("  Phase lag:  {:.2} (predator peaks after prey)", lag),
        None => println!("  Phase lag:  -"),
    }
    for event in &metrics.extinction_events {
        println!("  Extinction: {} at t = {:.2}", event.species, event.time);
    }
    for summary in &metrics.summaries {
        println!(
            "  {:<9} mean {:>7.2}  min {:>7.2}  max {:>7.2}  cv {:.3}",
            summary.species, summary.mean, summary.min, summary.max,
            summary.coefficient_of_variation
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Lotka-Volterra: Classic Predator-Prey Oscillation");
    println!("═══════════════════════════════════════════════════════════════\n");

    let params = LotkaVolterraParams::classic();

    println!("Parameters:");
    println!("  α (prey growth)     = {:.2}", params.prey_growth_rate);
    println!("  β (predation)       = {:.2}", params.predation_rate);
    println!("  γ (predator death)  = {:.2}", params.predator_death_rate);
    println!("  δ (predator growth) = {:.2}", params.predator_growth_rate);
    println!(
        "  initial populations = ({:.0}, {:.0})",
        params.initial_prey, params.initial_predator
    );
    println!(
        "  window = [0, {:.0}], dt = {}",
        params.duration, params.time_step
    );

    let trajectory = simulate(&params, &EventSchedule::empty()).expect("classic params are valid");

    println!("\nTrajectory samples:");
    println!("  {:>6}  {:>10}  {:>10}", "t", "prey", "predator");
    let stride = trajectory.len() / 10;
    for step in (0..trajectory.len()).step_by(stride.max(1)) {
        println!(
            "  {:>6.1}  {:>10.3}  {:>10.3}",
            trajectory.time(step),
            trajectory.population(step, 0),
            trajectory.population(step, 1)
        );
    }

    let metrics = analyze(&trajectory).expect("trajectory is non-empty");
    println!("\nMetrics (unperturbed):");
    print_metrics(&metrics);

    // Same system, epidemic among the predators at t = 25
    println!("\n───────────────────────────────────────────────────────────────");
    println!("  Perturbed run: 50% predator epidemic at t = 25");
    println!("───────────────────────────────────────────────────────────────\n");

    let schedule = EventSchedule::from_events(vec![EnvironmentalEvent::disease(
        25.0,
        0.5,
        EventTarget::Predator,
    )]);
    let perturbed = simulate(&params, &schedule).expect("schedule is valid");
    let perturbed_metrics = analyze(&perturbed).expect("trajectory is non-empty");

    let trigger = (25.0 / params.time_step).round() as usize;
    println!(
        "  predator just before / at the outbreak: {:.3} -> {:.3}",
        perturbed.population(trigger - 1, 1),
        perturbed.population(trigger, 1)
    );

    println!("\nMetrics (perturbed):");
    print_metrics(&perturbed_metrics);
}
