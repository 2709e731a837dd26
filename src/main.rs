//! Command-line runner for collision-avoidance scenarios

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use searoom::avoidance::{AvoidanceStrategy, BacktrackingStrategy, ReactiveStrategy};
use searoom::core::error::{Result, SearoomError};
use searoom::scenario::{random_scenario, Scenario};
use searoom::simulation::{Observation, Simulation, SimulationEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyKind {
    /// One-time starboard maneuvers with automatic revert
    Reactive,
    /// Bounded backtracking search over planned deviations
    Planner,
}

#[derive(Parser, Debug)]
#[command(name = "searoom", about = "COLREGS collision-avoidance simulation")]
struct Args {
    /// Scenario TOML file to run
    #[arg(long, conflicts_with = "random")]
    scenario: Option<PathBuf>,

    /// Generate a random scenario with this many vessels instead
    #[arg(long)]
    random: Option<usize>,

    /// Seed for random scenario generation
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Avoidance strategy
    #[arg(long, value_enum, default_value_t = StrategyKind::Reactive)]
    strategy: StrategyKind,

    /// Hard cap on simulated steps
    #[arg(long, default_value_t = 5000)]
    max_steps: u64,

    /// Emit one JSON world snapshot per step on stdout
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("searoom=info".parse().unwrap()))
        .init();

    if let Err(error) = run(Args::parse()) {
        tracing::error!(%error, "simulation failed");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let scenario = match (&args.scenario, args.random) {
        (Some(path), _) => Scenario::load(path)?,
        (None, Some(count)) => random_scenario(count, args.seed),
        (None, None) => {
            return Err(SearoomError::InvalidScenario(
                "pass --scenario <file> or --random <count>".into(),
            ))
        }
    };

    let strategy: Box<dyn AvoidanceStrategy> = match args.strategy {
        StrategyKind::Reactive => Box::new(ReactiveStrategy::new()),
        StrategyKind::Planner => Box::new(BacktrackingStrategy::new()),
    };

    let world = scenario.build_world();
    let vessel_count = world.len();
    let mut simulation = Simulation::new(world, scenario.config, strategy)?;
    tracing::info!(
        vessels = vessel_count,
        strategy = simulation.strategy_name(),
        "starting simulation"
    );

    for _ in 0..args.max_steps {
        if simulation.is_complete() {
            break;
        }
        let events = simulation.step();
        for event in &events {
            report(event);
        }
        if args.json {
            println!(
                "{}",
                serde_json::to_string(&Observation::capture(&simulation.world))?
            );
        }
    }

    if simulation.is_complete() {
        tracing::info!(steps = simulation.world.time_step, "all vessels arrived");
    } else {
        tracing::warn!(
            steps = simulation.world.time_step,
            "step cap reached before all vessels arrived"
        );
    }
    Ok(())
}

fn report(event: &SimulationEvent) {
    match event {
        SimulationEvent::StatusChanged { vessel, from, to } => {
            tracing::info!(%vessel, ?from, ?to, "status changed");
        }
        SimulationEvent::EncounterClassified {
            a,
            b,
            status,
            kind,
            role_a,
            role_b,
        } => {
            tracing::info!(%a, %b, ?status, ?kind, ?role_a, ?role_b, "encounter");
        }
        SimulationEvent::ManeuverIssued {
            vessel,
            heading_delta_deg,
            speed_delta_kn,
        } => {
            tracing::info!(
                %vessel,
                helm = heading_delta_deg,
                throttle = speed_delta_kn,
                "maneuver issued"
            );
        }
        SimulationEvent::CourseResumed { vessel } => {
            tracing::info!(%vessel, "course resumed");
        }
        SimulationEvent::VesselArrived { vessel, step } => {
            tracing::info!(%vessel, step, "vessel arrived");
        }
        SimulationEvent::ScenarioComplete { step } => {
            tracing::info!(step, "scenario complete");
        }
    }
}
