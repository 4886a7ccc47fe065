use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::species::SpeciesId;
use crate::world::SimulationGrid;

/// The plant a tile shows on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominantView {
    pub species: String,
    pub species_id: SpeciesId,
    pub marker: char,
    pub stage: u32,
    pub multi_season: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub coord: usize,
    pub level: i32,
    pub occupants: usize,
    pub dominant: Option<DominantView>,
}

/// Read-only view of a grid after some number of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub scenario: String,
    pub step: u64,
    pub dim_x: usize,
    pub dim_y: usize,
    pub population: usize,
    pub captured_at: DateTime<Utc>,
    pub tiles: Vec<TileSnapshot>,
}

impl GridSnapshot {
    pub fn markers(&self) -> Vec<Option<char>> {
        self.tiles
            .iter()
            .map(|tile| tile.dominant.as_ref().map(|d| d.marker))
            .collect()
    }
}

/// Writes a JSON frame every `interval` steps. An interval of zero disables output.
pub struct SnapshotWriter {
    output_dir: PathBuf,
    interval: u64,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl AsRef<Path>, interval: u64) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            interval,
        }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn maybe_write(
        &self,
        grid: &SimulationGrid,
        scenario_name: &str,
    ) -> Result<Option<PathBuf>, SnapshotError> {
        let step = grid.step_count();
        if self.interval == 0 || step % self.interval != 0 {
            return Ok(None);
        }
        self.write(&grid.snapshot(scenario_name)).map(Some)
    }

    pub fn write(&self, snapshot: &GridSnapshot) -> Result<PathBuf, SnapshotError> {
        let dir = self.output_dir.join(&snapshot.scenario);
        fs::create_dir_all(&dir)?;
        let file_path = dir.join(format!("tick_{:06}.json", snapshot.step));
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&file_path, json)?;
        log::debug!("wrote frame {}", file_path.display());
        Ok(file_path)
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
