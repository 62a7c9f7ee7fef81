//! Demonstration of state space sampling across backends and strategies
//!
//! Run with `RUST_LOG=simq_statespace=debug` to see backend selection.

use num_complex::Complex32;
use simq_statespace::{
    get_state_space, get_state_space_with_config, SamplingStrategy, StateSpaceConfig,
};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> simq_statespace::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== State Space Sampling Demonstration ===\n");

    demo_statistical_accuracy()?;
    demo_strategies()?;
    demo_backend_scaling()?;

    Ok(())
}

fn uniform(num_qubits: usize) -> Vec<Complex32> {
    let dimension = 1usize << num_qubits;
    vec![Complex32::new(1.0 / (dimension as f32).sqrt(), 0.0); dimension]
}

fn demo_statistical_accuracy() -> simq_statespace::Result<()> {
    println!("Demo 1: Statistical Accuracy");
    println!("-----------------------------");

    let probs = [0.05f32, 0.2, 0.05, 0.2, 0.05, 0.2, 0.05, 0.2];
    let mut space = get_state_space(3, 1)?;
    space.create_state()?;
    for (i, &p) in probs.iter().enumerate() {
        space.set_amplitude(i as u64, Complex32::new(p.sqrt(), 0.0))?;
    }

    let shots = 100_000;
    let counts = space.sample_counts(shots)?;

    println!("Backend: {}", space.backend());
    println!("Results from {} shots:", shots);
    println!("{:>8} {:>8} {:>12} {:>10}", "Outcome", "Count", "Frequency", "Error");
    println!("{:-<40}", "");

    for (outcome, &p) in probs.iter().enumerate() {
        let outcome = outcome as u64;
        let freq = counts.frequency(outcome);
        println!(
            "|{:03b}⟩   {:>8} {:>10.2}%   {:>8.4}%",
            outcome,
            counts.get_count(outcome),
            freq * 100.0,
            (freq - p as f64).abs() * 100.0
        );
    }

    println!();
    Ok(())
}

fn demo_strategies() -> simq_statespace::Result<()> {
    println!("Demo 2: Sampling Strategies");
    println!("----------------------------");

    let num_qubits = 12;
    let shots = 100_000;

    println!("State: {} qubits (uniform superposition)", num_qubits);
    println!("Shots: {}\n", shots);
    println!("{:>14} {:>12} {:>18}", "Strategy", "Time", "Throughput");
    println!("{:-<46}", "");

    for strategy in [
        SamplingStrategy::Cdf,
        SamplingStrategy::Alias,
        SamplingStrategy::SortedSweep,
    ] {
        let config = StateSpaceConfig::new().with_strategy(strategy);
        let mut space = get_state_space_with_config(num_qubits, 1, config)?;
        space.create_state()?;
        space.set_amplitudes(&uniform(num_qubits))?;

        let mut samples = Vec::with_capacity(shots);
        let start = Instant::now();
        space.sample_state(shots, &mut samples)?;
        let elapsed = start.elapsed();

        println!(
            "{:>14} {:>10.3} ms {:>12.2} M/s",
            format!("{:?}", strategy),
            elapsed.as_secs_f64() * 1000.0,
            shots as f64 / elapsed.as_secs_f64() / 1_000_000.0
        );
    }

    println!();
    Ok(())
}

fn demo_backend_scaling() -> simq_statespace::Result<()> {
    println!("Demo 3: Thread Budget Scaling");
    println!("------------------------------");

    let num_qubits = 16;
    let shots = 1_000_000;

    println!("State: {} qubits, {} shots\n", num_qubits, shots);
    println!("{:>8} {:>10} {:>12} {:>18}", "Threads", "Backend", "Time", "Throughput");
    println!("{:-<52}", "");

    for &threads in &[1, 2, 4, 8] {
        let mut space = get_state_space(num_qubits, threads)?;
        space.create_state()?;
        space.set_amplitudes(&uniform(num_qubits))?;

        let mut samples = Vec::with_capacity(shots);
        let start = Instant::now();
        space.sample_state(shots, &mut samples)?;
        let elapsed = start.elapsed();

        println!(
            "{:>8} {:>10} {:>10.3} ms {:>12.2} M/s",
            threads,
            space.backend().name(),
            elapsed.as_secs_f64() * 1000.0,
            shots as f64 / elapsed.as_secs_f64() / 1_000_000.0
        );
    }

    println!();
    Ok(())
}
