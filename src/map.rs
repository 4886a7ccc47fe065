//! Map files: grid dimensions, per-tile suitability levels and two species.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rates::RuleSet;
use crate::spatial::GridShape;
use crate::species::{LevelRange, SpeciesId, SpeciesTemplate};
use crate::world::SimulationGrid;

/// Probability that a tile starts with the first species.
pub const FIRST_SPECIES_COVER: f64 = 0.2;
/// Threshold for the second, independent draw that seeds the second species.
pub const SECOND_SPECIES_COVER: f64 = 0.4;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed map description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("map dimensions must be positive, got {dim_x}x{dim_y}")]
    InvalidDimensions { dim_x: i64, dim_y: i64 },
    #[error("grid has {actual} levels but the dimensions need {expected}")]
    GridLengthMismatch { expected: usize, actual: usize },
    #[error("species '{name}' is invalid: {reason}")]
    InvalidSpecies { name: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSpec {
    pub name: String,
    pub best_low: i32,
    pub best_high: i32,
    pub live_low: i32,
    pub live_high: i32,
    pub max_stage: u32,
    pub mature_stage: u32,
    pub multi_season: bool,
    #[serde(default)]
    pub marker: Option<char>,
}

impl SpeciesSpec {
    fn validate(&self) -> Result<(), MapError> {
        let invalid = |reason: &str| MapError::InvalidSpecies {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.best_low > self.best_high {
            return Err(invalid("best_low exceeds best_high"));
        }
        if self.live_low > self.live_high {
            return Err(invalid("live_low exceeds live_high"));
        }
        if self.max_stage == 0 {
            return Err(invalid("max_stage must be at least 1"));
        }
        Ok(())
    }

    pub fn template(&self, id: SpeciesId) -> SpeciesTemplate {
        let template = SpeciesTemplate::new(
            id,
            self.name.clone(),
            LevelRange::new(self.best_low, self.best_high),
            LevelRange::new(self.live_low, self.live_high),
            self.max_stage,
            self.mature_stage,
            self.multi_season,
        );
        match self.marker {
            Some(marker) => template.with_marker(marker),
            None => template,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    pub dim_x: i64,
    pub dim_y: i64,
    pub grid: Vec<i32>,
    pub plant1: SpeciesSpec,
    pub plant2: SpeciesSpec,
}

impl MapFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses and validates a map description.
    pub fn from_json_str(text: &str) -> Result<Self, MapError> {
        let map: MapFile = serde_json::from_str(text)?;
        map.validate()?;
        Ok(map)
    }

    pub fn validate(&self) -> Result<(), MapError> {
        let expected = self.tile_count().ok_or(MapError::InvalidDimensions {
            dim_x: self.dim_x,
            dim_y: self.dim_y,
        })?;
        if self.grid.len() != expected {
            return Err(MapError::GridLengthMismatch {
                expected,
                actual: self.grid.len(),
            });
        }
        self.plant1.validate()?;
        self.plant2.validate()
    }

    /// Number of tiles the dimensions describe, or `None` when either side is
    /// non-positive or the product does not fit in memory indices.
    fn tile_count(&self) -> Option<usize> {
        if self.dim_x <= 0 || self.dim_y <= 0 {
            return None;
        }
        self.dim_x
            .checked_mul(self.dim_y)
            .and_then(|count| usize::try_from(count).ok())
    }

    pub fn shape(&self) -> GridShape {
        GridShape::new(self.dim_x as usize, self.dim_y as usize)
    }

    pub fn species(&self) -> Vec<Arc<SpeciesTemplate>> {
        vec![
            Arc::new(self.plant1.template(SpeciesId(0))),
            Arc::new(self.plant2.template(SpeciesId(1))),
        ]
    }

    pub fn build_empty_grid(&self, rules: RuleSet) -> Result<SimulationGrid, MapError> {
        self.validate()?;
        SimulationGrid::new(self.shape(), self.grid.clone(), self.species(), rules)
    }

    /// Builds the grid and seeds it.
    ///
    /// Each tile draws once; below [`FIRST_SPECIES_COVER`] it gets the first
    /// species. Otherwise it draws again and below [`SECOND_SPECIES_COVER`]
    /// gets the second species.
    pub fn build_grid<R: Rng + ?Sized>(
        &self,
        rules: RuleSet,
        rng: &mut R,
    ) -> Result<SimulationGrid, MapError> {
        let mut grid = self.build_empty_grid(rules)?;
        for coord in 0..grid.tiles().len() {
            let species = if rng.gen::<f64>() < FIRST_SPECIES_COVER {
                Some(SpeciesId(0))
            } else if rng.gen::<f64>() < SECOND_SPECIES_COVER {
                Some(SpeciesId(1))
            } else {
                None
            };
            if let Some(species) = species {
                grid.spawn(coord, species);
            }
        }
        log::info!(
            "seeded {}x{} grid with {} plants",
            self.dim_x,
            self.dim_y,
            grid.population()
        );
        Ok(grid)
    }
}
