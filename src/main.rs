use anyhow::{Context, Result};
use clap::Parser;
use mycelia_lib::model::config::SimConfig;
use mycelia_lib::model::environment::DayCycle;
use mycelia_lib::model::metrics::init_logging;
use mycelia_lib::model::world::World;
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless fungal colony simulation", long_about = None)]
struct Args {
    /// Custom config file path (defaults apply when missing)
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Simulated seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Speed multiplier applied to every tick (0 pauses)
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Random fungi planted at start
    #[arg(long, default_value_t = 6)]
    spawn: usize,

    /// Print final statistics as JSON
    #[arg(long)]
    report: bool,
}

fn load_config(path: &str) -> Result<SimConfig> {
    if !Path::new(path).exists() {
        info!(path, "Config file not found, using defaults");
        return Ok(SimConfig::default());
    }
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    SimConfig::from_toml(&content).with_context(|| format!("Invalid config in {path}"))
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    anyhow::ensure!(
        args.speed.is_finite() && args.speed >= 0.0,
        "Speed must be a non-negative number"
    );

    let mut config = load_config(&args.config)?;
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }
    let clock = DayCycle::from(&config.day_cycle);
    let mut world = World::new(config)?;
    let planted = world.seed_random(args.spawn);
    info!(
        planted = planted.len(),
        width = world.tiles().width(),
        height = world.tiles().height(),
        "World ready"
    );

    let dt = args.dt * args.speed;
    for _ in 0..args.ticks {
        let sun_rate = clock.sun_rate_per_tile(world.elapsed);
        world.update(dt, sun_rate)?;
        if world.organism_count() == 0 && world.spores().is_empty() {
            info!(tick = world.tick, "All fungi died out");
            break;
        }
    }

    let stats = world.stats();
    info!(
        tick = stats.tick,
        cells = stats.cell_count,
        organisms = stats.organism_count,
        max_generation = stats.max_generation,
        "Simulation finished"
    );
    if args.report {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    Ok(())
}
