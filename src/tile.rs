use std::cmp::Ordering;

use rand::Rng;

use crate::plant::{dominance, Plant};
use crate::rates::RuleSet;

#[derive(Debug, Clone)]
pub struct Tile {
    level: i32,
    coord: usize,
    plants: Vec<Plant>,
}

impl Tile {
    pub fn new(level: i32, coord: usize) -> Self {
        Self {
            level,
            coord,
            plants: Vec::new(),
        }
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    pub fn coord(&self) -> usize {
        self.coord
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn population(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn add_plant(&mut self, plant: Plant) {
        debug_assert!(
            !self.plants.iter().any(|p| p.id() == plant.id()),
            "plant {:?} already on tile {}",
            plant.id(),
            self.coord
        );
        self.plants.push(plant);
    }

    pub fn grow_all<R: Rng + ?Sized>(&mut self, rules: RuleSet, rng: &mut R) {
        let level = self.level;
        for plant in &mut self.plants {
            plant.grow(level, rules, rng);
        }
    }

    /// Removes plants whose death check fires and returns how many were removed.
    ///
    /// Every plant is judged against the population at the start of the pass.
    pub fn prune_dead<R: Rng + ?Sized>(&mut self, rules: RuleSet, rng: &mut R) -> usize {
        let crowd = self.plants.len();
        if crowd == 0 {
            return 0;
        }
        let level = self.level;
        self.plants.retain(|plant| !plant.end(level, crowd, rules, rng));
        crowd - self.plants.len()
    }

    /// The most dominant occupant; among exact ties the earliest arrival wins.
    pub fn dominant_plant(&self) -> Option<&Plant> {
        self.plants.iter().reduce(|best, plant| {
            if dominance(plant, best) == Ordering::Greater {
                plant
            } else {
                best
            }
        })
    }
}
