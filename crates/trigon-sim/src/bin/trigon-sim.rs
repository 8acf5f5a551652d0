//! Trigon simulation runner
//!
//! Runs a simulation and prints every round's points.
//!
//! ```text
//! trigon-sim [rounds] [seed] [config.json]
//! ```
//!
//! Set `TRIGON_OUTPUT=json` to print one JSON snapshot per line instead.

use std::env;
use std::process;
use std::str::FromStr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trigon_sim::{RoundSnapshot, RunOutcome, Simulation, SimulationConfig};

const USAGE: &str = "usage: trigon-sim [rounds] [seed] [config.json]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trigon_sim=info,trigon_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();

    let (max_rounds, seed) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    let mut config = match args.get(3) {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let json = env::var("TRIGON_OUTPUT").is_ok_and(|v| v == "json");

    tracing::info!(
        seed = config.seed,
        points = config.point_count,
        max_rounds,
        "starting simulation"
    );

    let mut sim = Simulation::new(config)?;
    print_snapshot(&sim.snapshot(), json)?;

    let mut outcome = RunOutcome::RoundLimit { round: sim.round() };
    for _ in 0..max_rounds {
        let before = sim.round();
        outcome = sim.run(1)?;
        if sim.round() > before {
            print_snapshot(&sim.snapshot(), json)?;
        }
        if !matches!(outcome, RunOutcome::RoundLimit { .. }) {
            break;
        }
    }

    match outcome {
        RunOutcome::Converged { round } => println!("\nConverged after {} rounds", round),
        RunOutcome::Looped(event) => {
            println!();
            println!("---------- IT LOOPED ----------");
            println!("First occurrence: {}", event.first_round);
            println!("Latest occurrence: {}", event.round);
        }
        RunOutcome::RoundLimit { round } => println!("\nStopped after {} rounds", round),
    }

    Ok(())
}

/// Round budget (default 5500) and optional seed override.
fn parse_args(args: &[String]) -> Result<(u64, Option<u64>), String> {
    let rounds = parse_arg(args, 1, "rounds")?.unwrap_or(5_500);
    let seed = parse_arg(args, 2, "seed")?;
    Ok((rounds, seed))
}

fn parse_arg<T: FromStr>(args: &[String], index: usize, name: &str) -> Result<Option<T>, String> {
    args.get(index)
        .map(|s| {
            s.parse()
                .map_err(|_| format!("{} must be a non-negative integer, got {:?}", name, s))
        })
        .transpose()
}

fn print_snapshot(snapshot: &RoundSnapshot, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }

    println!("\n---------- Round: {} ----------\n", snapshot.round);
    for point in &snapshot.points {
        let partners: Vec<u32> = point.partners.iter().map(|p| p.0).collect();
        println!("ID: {}, Partners: {:?}, Coord: {}", point.id, partners, point.coord);
    }
    Ok(())
}
