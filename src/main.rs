use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use thicket::{
    engine::{average_tick_time, EngineBuilder, EngineSettings},
    rates::{RangeCheck, SpreadGate},
    render::Renderer,
    scenario::{Scenario, ScenarioLoader},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Plant competition on a grid of suitability levels")]
struct Cli {
    /// Path to a scenario YAML file
    #[arg(long, required_unless_present = "map", conflicts_with = "map")]
    scenario: Option<PathBuf>,

    /// Path to a JSON map file (runs with default scenario settings)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Override tick count
    #[arg(long)]
    ticks: Option<u64>,

    /// Seed the run; omitted seeds are drawn from entropy and logged
    #[arg(long)]
    seed: Option<u64>,

    /// Test the live range in the second branch of every rate lookup
    #[arg(long)]
    corrected_ranges: bool,

    /// Gate spreading on the spread rate instead of the growth rate
    #[arg(long)]
    spread_rate_gate: bool,

    /// Override frame export interval in ticks (0 disables)
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for exported frames
    #[arg(long, default_value = "snapshots")]
    snapshot_dir: PathBuf,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Only print the final grid
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut scenario = match (&cli.scenario, &cli.map) {
        (Some(path), _) => ScenarioLoader::new(".").load(path)?,
        (None, Some(map)) => Scenario::for_map(map),
        (None, None) => anyhow::bail!("either --scenario or --map is required"),
    };
    if cli.corrected_ranges {
        scenario.rules.range_check = RangeCheck::Corrected;
    }
    if cli.spread_rate_gate {
        scenario.rules.spread_gate = SpreadGate::SpreadRate;
    }
    if cli.no_color {
        scenario.render.color = false;
    }

    let map = scenario.load_map()?;
    let ticks = scenario.ticks(cli.ticks);
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: cli.seed.or(scenario.seed),
        snapshot_interval_ticks: cli
            .snapshot_interval
            .unwrap_or(scenario.snapshot_interval_ticks),
        snapshot_dir: cli.snapshot_dir,
    };
    let mut engine = EngineBuilder::new(settings).build();
    let mut grid = map.build_grid(scenario.rules, &mut engine.seeding_rng())?;
    let renderer = Renderer::new(scenario.render.clone());

    if !cli.quiet {
        println!("{}", renderer.render(&grid.snapshot(&scenario.name)));
    }
    let reports = engine.run_with_hook(&mut grid, ticks, |snapshot| {
        if !cli.quiet {
            println!("{}", renderer.render(&snapshot));
        }
    })?;
    if cli.quiet {
        println!("{}", renderer.render(&grid.snapshot(&scenario.name)));
    }

    for (species, count) in grid.species_census() {
        log::info!("{species}: {count} plants");
    }
    if let Some(average) = average_tick_time(&reports) {
        log::info!(
            "{} ticks, {:.3}ms per tick on average",
            reports.len(),
            average.as_secs_f64() * 1_000.0
        );
    }
    println!(
        "Scenario '{}' completed for {} ticks (seed {}). Final population: {}",
        scenario.name,
        ticks,
        engine.seed(),
        grid.population()
    );
    Ok(())
}
