//! Benchmarks the cached chooser against a linear scan for repeated picks
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::process;
use std::time::Instant;
use weightedrand::{linear, Choice, Chooser, Error};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    /// Number of weighted choices to pick from
    #[arg(short, long, default_value_t = 1000)]
    choices: usize,
    /// Picks per episode
    #[arg(short, long, default_value_t = 100000)]
    picks: usize,
    #[arg(short, long, default_value_t = 10)]
    episodes: usize,
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Largest weight given to a generated choice
    #[arg(short, long, default_value_t = 1000)]
    max_weight: u64,
}

fn run_chooser(weights: &[u64], picks: usize, rng: &mut StdRng) -> Result<f64, Error> {
    let start = Instant::now();
    let chooser = Chooser::new(
        weights
            .iter()
            .enumerate()
            .map(|(i, weight)| Choice::new(i, *weight)),
    )?;
    for _ in 0..picks {
        chooser.pick_with(rng)?;
    }
    Ok(start.elapsed().as_secs_f64())
}

fn run_linear(weights: &[u64], picks: usize, rng: &mut StdRng) -> Result<f64, Error> {
    let start = Instant::now();
    for _ in 0..picks {
        let items: Vec<(usize, u64)> = weights.iter().copied().enumerate().collect();
        linear::weighted_random(items, rng)?;
    }
    Ok(start.elapsed().as_secs_f64())
}

fn report(label: &str, picks: usize, elapsed: f64) {
    println!(
        "{}: {} picks in {:.4} seconds ({:.2} picks per second)",
        label,
        picks,
        elapsed,
        picks as f64 / elapsed
    );
}

fn main() {
    let args = Args::parse();
    println!(
        "===\nChoices: {}, Picks: {}, Episodes: {}, Seed: {}",
        args.choices, args.picks, args.episodes, args.seed
    );
    println!("---");
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let weights: Vec<u64> = (0..args.choices)
        .map(|_| rng.gen_range(0..=args.max_weight))
        .collect();

    let mut chooser_durations = Vec::with_capacity(args.episodes);
    let mut linear_durations = Vec::with_capacity(args.episodes);
    for episode in 0..args.episodes {
        log::info!("Starting episode {}", episode);
        let result = run_chooser(&weights, args.picks, &mut rng).and_then(|chooser_elapsed| {
            run_linear(&weights, args.picks, &mut rng)
                .map(|linear_elapsed| (chooser_elapsed, linear_elapsed))
        });
        match result {
            Ok((chooser_elapsed, linear_elapsed)) => {
                report("chooser", args.picks, chooser_elapsed);
                report("linear ", args.picks, linear_elapsed);
                chooser_durations.push(chooser_elapsed);
                linear_durations.push(linear_elapsed);
            }
            Err(err) => {
                eprintln!("Benchmark failed: {}", err);
                process::exit(1);
            }
        }
    }

    println!("---");
    for (label, durations) in [("chooser", &chooser_durations), ("linear ", &linear_durations)] {
        let total: f64 = durations.iter().sum();
        println!(
            "{}: average duration {:.4} seconds, {:.2} picks per second",
            label,
            total / durations.len().max(1) as f64,
            (durations.len() * args.picks) as f64 / total
        );
    }
}
