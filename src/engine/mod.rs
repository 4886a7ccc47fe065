use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::{
    rng::{RngManager, StreamRng, SEEDING_STREAM, SIMULATION_STREAM},
    snapshot::{GridSnapshot, SnapshotWriter},
    world::{SimulationGrid, TickOutcome},
};

pub struct EngineSettings {
    pub scenario_name: String,
    /// `None` draws a fresh seed from OS entropy.
    pub seed: Option<u64>,
    pub snapshot_interval_ticks: u64,
    pub snapshot_dir: PathBuf,
}

pub struct EngineBuilder {
    settings: EngineSettings,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn build(self) -> Engine {
        let rng = match self.settings.seed {
            Some(seed) => RngManager::new(seed),
            None => RngManager::from_entropy(),
        };
        log::info!(
            "scenario '{}' using seed {}",
            self.settings.scenario_name,
            rng.seed()
        );
        Engine {
            rng,
            snapshot_writer: SnapshotWriter::new(
                &self.settings.snapshot_dir,
                self.settings.snapshot_interval_ticks,
            ),
            settings: self.settings,
        }
    }
}

/// Per-tick summary handed back to callers.
#[derive(Clone, Debug)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub duration: Duration,
    pub frame: Option<PathBuf>,
}

pub struct Engine {
    rng: RngManager,
    snapshot_writer: SnapshotWriter,
    settings: EngineSettings,
}

impl Engine {
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn scenario_name(&self) -> &str {
        &self.settings.scenario_name
    }

    /// Stream for initial seeding, independent of the simulation stream.
    pub fn seeding_rng(&mut self) -> StreamRng<'_> {
        self.rng.stream(SEEDING_STREAM)
    }

    pub fn step(&mut self, grid: &mut SimulationGrid) -> Result<TickReport> {
        let start = Instant::now();
        let outcome = grid.tick(&mut self.rng.stream(SIMULATION_STREAM));
        let duration = start.elapsed();
        log::debug!(
            "step {} took {:.3}ms: {} births, {} deaths, {} alive",
            outcome.step,
            duration.as_secs_f64() * 1_000.0,
            outcome.births,
            outcome.deaths,
            outcome.population
        );
        let frame = self
            .snapshot_writer
            .maybe_write(grid, &self.settings.scenario_name)?;
        Ok(TickReport {
            outcome,
            duration,
            frame,
        })
    }

    pub fn run(&mut self, grid: &mut SimulationGrid, ticks: u64) -> Result<Vec<TickReport>> {
        let mut reports = Vec::new();
        for _ in 0..ticks {
            reports.push(self.step(grid)?);
        }
        Ok(reports)
    }

    /// Runs `ticks` steps, passing a snapshot of the grid to `hook` after each.
    pub fn run_with_hook<F>(
        &mut self,
        grid: &mut SimulationGrid,
        ticks: u64,
        mut hook: F,
    ) -> Result<Vec<TickReport>>
    where
        F: FnMut(GridSnapshot),
    {
        let mut reports = Vec::new();
        for _ in 0..ticks {
            reports.push(self.step(grid)?);
            hook(grid.snapshot(&self.settings.scenario_name));
        }
        Ok(reports)
    }
}

/// Mean wall-clock time per tick, if any ticks ran.
pub fn average_tick_time(reports: &[TickReport]) -> Option<Duration> {
    if reports.is_empty() {
        return None;
    }
    let total: Duration = reports.iter().map(|r| r.duration).sum();
    Some(total / reports.len() as u32)
}
