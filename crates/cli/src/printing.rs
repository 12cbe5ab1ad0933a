//! Human-readable reports.
//!
//! Everything here goes to stderr except `print_parameters`, so stdout of
//! `run` and `batch` stays a single JSON document.

use strand_sim::errors::ValidationErrors;
use strand_sim::simulation::Configuration;
use strand_sim::trace::Trace;

pub fn print_validation_errors(source: &str, errors: &ValidationErrors) {
    eprintln!("❌ {source}: {} validation error(s)", errors.len());
    for error in errors.iter() {
        eprintln!("  • {error}");
    }
}

pub fn print_run_summary(source: &str, trace: &Trace) {
    let Ok(state) = trace.final_state() else {
        return;
    };
    eprintln!(
        "✓ {source}: {} tick(s), {} protein(s), {} virus(es)",
        trace.len(),
        state.proteins.len(),
        state.viruses.len()
    );
}

pub fn print_parameters(config: &Configuration) {
    let sim = &config.simulation;
    println!("\n📋 Simulation Configuration");
    println!("  • Max Ticks: {} [--max-ticks]", sim.max_ticks);
    println!("  • Tick Origin: {}", sim.tick_origin);
    match sim.seed {
        Some(seed) => println!("  • Random Seed: {seed} [--seed]"),
        None => println!("  • Random Seed: None [--seed]"),
    }
    println!(
        "  • Transcription Error Rate: {:.2e} [--mutation-rate]",
        sim.mutation_rate
    );
    if !sim.initial_environment.is_empty() {
        println!("  • Initial Environment:");
        for (key, value) in &sim.initial_environment {
            println!("    - {key} = {value}");
        }
    }

    println!("\n🕸️  Pathway Graph");
    if config.graph.connect_root {
        println!(
            "  • Root Protein: {} [--root-node-index]",
            config.graph.root_node_index
        );
    } else {
        println!("  • Root Protein: None [--no-root]");
    }

    println!("\n⚙️  Runner");
    println!(
        "  • Max Concurrent: {} [--jobs]",
        config.runner.max_concurrent
    );
    println!("  • Timeout: {} ms [--timeout-ms]", config.runner.timeout_ms);
    println!();
}
