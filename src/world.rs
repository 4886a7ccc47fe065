use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::map::MapError;
use crate::plant::{Plant, PlantId};
use crate::rates::RuleSet;
use crate::snapshot::{DominantView, GridSnapshot, TileSnapshot};
use crate::spatial::{GridShape, TilePos};
use crate::species::{SpeciesId, SpeciesTemplate};
use crate::tile::Tile;

/// Counts produced by one [`SimulationGrid::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub step: u64,
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
}

pub struct SimulationGrid {
    shape: GridShape,
    tiles: Vec<Tile>,
    species: Vec<Arc<SpeciesTemplate>>,
    rules: RuleSet,
    step_count: u64,
    next_plant: u64,
}

impl SimulationGrid {
    /// Builds an unseeded grid. `levels` is row-major and must cover every tile.
    pub fn new(
        shape: GridShape,
        levels: Vec<i32>,
        species: Vec<Arc<SpeciesTemplate>>,
        rules: RuleSet,
    ) -> Result<Self, MapError> {
        if levels.len() != shape.tile_count() {
            return Err(MapError::GridLengthMismatch {
                expected: shape.tile_count(),
                actual: levels.len(),
            });
        }
        let tiles = levels
            .into_iter()
            .enumerate()
            .map(|(coord, level)| Tile::new(level, coord))
            .collect();
        Ok(Self {
            shape,
            tiles,
            species,
            rules,
            step_count: 0,
            next_plant: 0,
        })
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn species(&self) -> &[Arc<SpeciesTemplate>] {
        &self.species
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, coord: usize) -> Option<&Tile> {
        self.tiles.get(coord)
    }

    pub fn tile_mut(&mut self, coord: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(coord)
    }

    pub fn tile_at(&self, x: usize, y: usize) -> Option<&Tile> {
        self.shape
            .pos_to_coord(TilePos { x, y })
            .and_then(|coord| self.tiles.get(coord))
    }

    pub fn population(&self) -> usize {
        self.tiles.iter().map(Tile::population).sum()
    }

    /// Number of living plants per species name. Species with no plants report zero.
    pub fn species_census(&self) -> BTreeMap<String, usize> {
        let mut census: BTreeMap<String, usize> = self
            .species
            .iter()
            .map(|species| (species.name.clone(), 0))
            .collect();
        for plant in self.tiles.iter().flat_map(Tile::plants) {
            *census.entry(plant.species().name.clone()).or_default() += 1;
        }
        census
    }

    /// Places a new stage-0 plant of `species` on tile `coord`.
    pub fn spawn(&mut self, coord: usize, species: SpeciesId) -> Option<PlantId> {
        let template = Arc::clone(self.species.get(species.index())?);
        if coord >= self.tiles.len() {
            return None;
        }
        let id = self.allocate();
        self.tiles[coord].add_plant(Plant::new(id, template));
        Some(id)
    }

    /// Runs one step over every tile in coordinate order.
    ///
    /// Each tile grows, seeds its neighbors, then prunes. Seedlings land in the
    /// live grid immediately, so a tile visited later in the same step grows and
    /// prunes the seedlings it just received.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        self.step_count += 1;
        let rules = self.rules;
        let mut births = 0;
        let mut deaths = 0;
        let mut seedlings: Vec<(usize, Arc<SpeciesTemplate>)> = Vec::new();

        for coord in 0..self.tiles.len() {
            self.tiles[coord].grow_all(rules, rng);

            let neighbors = self.shape.neighbors(coord);
            let tile = &self.tiles[coord];
            for plant in tile.plants() {
                for &target in &neighbors {
                    if plant.spread(tile.level(), rules, rng) {
                        seedlings.push((target, Arc::clone(plant.species())));
                    }
                }
            }
            for (target, species) in seedlings.drain(..) {
                let id = self.allocate();
                self.tiles[target].add_plant(Plant::new(id, species));
                births += 1;
            }

            deaths += self.tiles[coord].prune_dead(rules, rng);
        }

        let outcome = TickOutcome {
            step: self.step_count,
            births,
            deaths,
            population: self.population(),
        };
        log::trace!(
            "step {}: {} births, {} deaths, {} alive",
            outcome.step,
            outcome.births,
            outcome.deaths,
            outcome.population
        );
        outcome
    }

    pub fn snapshot(&self, scenario: &str) -> GridSnapshot {
        let tiles = self
            .tiles
            .iter()
            .map(|tile| TileSnapshot {
                coord: tile.coord(),
                level: tile.level(),
                occupants: tile.population(),
                dominant: tile.dominant_plant().map(|plant| DominantView {
                    species: plant.species().name.clone(),
                    species_id: plant.species().id,
                    marker: plant.species().marker,
                    stage: plant.current_stage(),
                    multi_season: plant.species().multi_season,
                }),
            })
            .collect();
        GridSnapshot {
            scenario: scenario.to_string(),
            step: self.step_count,
            dim_x: self.shape.width(),
            dim_y: self.shape.height(),
            population: self.population(),
            captured_at: chrono::Utc::now(),
            tiles,
        }
    }

    fn allocate(&mut self) -> PlantId {
        let id = PlantId::new(self.next_plant);
        self.next_plant += 1;
        id
    }
}
