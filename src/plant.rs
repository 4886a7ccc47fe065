use std::cmp::Ordering;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rates::{self, RuleSet};
use crate::species::SpeciesTemplate;

/// Identity of a plant instance. Compared for equality only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlantId(u64);

impl PlantId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Plant {
    id: PlantId,
    species: Arc<SpeciesTemplate>,
    current_stage: u32,
}

impl Plant {
    pub fn new(id: PlantId, species: Arc<SpeciesTemplate>) -> Self {
        Self {
            id,
            species,
            current_stage: 0,
        }
    }

    pub fn id(&self) -> PlantId {
        self.id
    }

    pub fn species(&self) -> &Arc<SpeciesTemplate> {
        &self.species
    }

    pub fn current_stage(&self) -> u32 {
        self.current_stage
    }

    /// Fraction of the species lifespan reached so far.
    pub fn maturity(&self) -> f64 {
        self.current_stage as f64 / self.species.max_stage as f64
    }

    pub fn is_mature(&self) -> bool {
        self.current_stage >= self.species.mature_stage
    }

    /// Advances one stage with probability equal to the growth rate at `level`.
    pub fn grow<R: Rng + ?Sized>(&mut self, level: i32, rules: RuleSet, rng: &mut R) {
        let draw: f64 = rng.gen();
        if draw < rates::growth_rate(&self.species, level, rules) {
            self.current_stage += 1;
        }
    }

    /// Decides whether this plant seeds one neighboring tile.
    pub fn spread<R: Rng + ?Sized>(&self, level: i32, rules: RuleSet, rng: &mut R) -> bool {
        let draw: f64 = rng.gen();
        draw < rates::spread_gate_rate(&self.species, level, rules) && self.is_mature()
    }

    /// Decides whether this plant dies at the end of the tick.
    ///
    /// Crowding scales the draw by `1/sqrt(num_plants)`; age kills single-season
    /// plants past `max_stage` regardless of the draw.
    pub fn end<R: Rng + ?Sized>(
        &self,
        level: i32,
        num_plants: usize,
        rules: RuleSet,
        rng: &mut R,
    ) -> bool {
        let draw: f64 = rng.gen();
        let crowding = (num_plants.max(1) as f64).sqrt();
        let aged_out =
            self.current_stage > self.species.max_stage && !self.species.multi_season;
        draw / crowding < rates::death_rate(&self.species, level, rules) || aged_out
    }

    /// A seedling of the same species carrying a fresh identity.
    pub fn offspring(&self, id: PlantId) -> Plant {
        Plant::new(id, Arc::clone(&self.species))
    }
}

impl PartialEq for Plant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Plant {}

/// Orders plants by maturity fraction, then multi-season over single-season.
pub fn dominance(a: &Plant, b: &Plant) -> Ordering {
    a.maturity()
        .partial_cmp(&b.maturity())
        .unwrap_or(Ordering::Equal)
        .then(a.species.multi_season.cmp(&b.species.multi_season))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use crate::species::{LevelRange, SpeciesId};

    fn species(max_stage: u32, mature_stage: u32, multi_season: bool) -> Arc<SpeciesTemplate> {
        Arc::new(SpeciesTemplate::new(
            SpeciesId(0),
            "moss",
            LevelRange::new(0, 10),
            LevelRange::new(0, 20),
            max_stage,
            mature_stage,
            multi_season,
        ))
    }

    fn plant_at_stage(id: u64, species: &Arc<SpeciesTemplate>, stage: u32) -> Plant {
        let mut plant = Plant::new(PlantId::new(id), Arc::clone(species));
        plant.current_stage = stage;
        plant
    }

    #[test]
    fn grow_advances_only_below_growth_rate() {
        let s = species(5, 2, false);
        let mut plant = Plant::new(PlantId::new(1), s);
        plant.grow(5, RuleSet::default(), &mut ScriptedRng::constant(0.99));
        assert_eq!(plant.current_stage(), 1);
        // Growth rate is zero outside the best range under literal rules.
        plant.grow(15, RuleSet::default(), &mut ScriptedRng::constant(0.0));
        assert_eq!(plant.current_stage(), 1);
    }

    #[test]
    fn spread_requires_maturity() {
        let s = species(5, 2, false);
        let mut rng = ScriptedRng::constant(0.0);
        assert!(!plant_at_stage(1, &s, 1).spread(5, RuleSet::default(), &mut rng));
        assert!(plant_at_stage(2, &s, 2).spread(5, RuleSet::default(), &mut rng));
    }

    #[test]
    fn spread_gates_on_growth_rate_by_default() {
        let s = species(5, 0, false);
        let plant = plant_at_stage(1, &s, 0);
        // 0.7 is above the spread rate but below the growth rate.
        assert!(plant.spread(5, RuleSet::default(), &mut ScriptedRng::constant(0.7)));
        assert!(!plant.spread(5, RuleSet::corrected(), &mut ScriptedRng::constant(0.7)));
    }

    #[test]
    fn spread_always_consumes_a_draw() {
        let s = species(5, 3, false);
        let mut rng = ScriptedRng::constant(0.0);
        plant_at_stage(1, &s, 0).spread(5, RuleSet::default(), &mut rng);
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn end_applies_age_limit_to_single_season_only() {
        let annual = species(3, 1, false);
        let perennial = species(3, 1, true);
        let mut rng = ScriptedRng::constant(0.99);
        assert!(!plant_at_stage(1, &annual, 3).end(5, 1, RuleSet::default(), &mut rng));
        assert!(plant_at_stage(2, &annual, 4).end(5, 1, RuleSet::default(), &mut rng));
        assert!(!plant_at_stage(3, &perennial, 40).end(5, 1, RuleSet::default(), &mut rng));
    }

    #[test]
    fn end_treats_empty_crowd_as_single_plant() {
        let annual = species(10, 2, false);
        let plant = plant_at_stage(1, &annual, 1);
        let mut rng = ScriptedRng::constant(0.5);
        let lone = plant.end(50, 1, RuleSet::default(), &mut rng);
        assert_eq!(plant.end(50, 0, RuleSet::default(), &mut rng), lone);
        assert!(lone);
    }

    #[test]
    fn end_crowding_raises_death_odds() {
        let s = species(5, 1, true);
        let plant = plant_at_stage(1, &s, 0);
        // Outside both ranges: death rate 0.8. 0.9 survives alone, dies among four.
        assert!(!plant.end(50, 1, RuleSet::default(), &mut ScriptedRng::constant(0.9)));
        assert!(plant.end(50, 4, RuleSet::default(), &mut ScriptedRng::constant(0.9)));
    }

    #[test]
    fn offspring_resets_stage_and_identity() {
        let s = species(5, 1, false);
        let parent = plant_at_stage(7, &s, 4);
        let child = parent.offspring(PlantId::new(8));
        assert_eq!(child.current_stage(), 0);
        assert!(Arc::ptr_eq(child.species(), parent.species()));
        assert_ne!(child.id(), parent.id());
        assert_ne!(child, parent);
    }

    #[test]
    fn dominance_prefers_maturity_then_multi_season() {
        let annual = species(10, 1, false);
        let perennial = species(10, 1, true);
        let young = plant_at_stage(1, &perennial, 2);
        let old = plant_at_stage(2, &annual, 9);
        let old_perennial = plant_at_stage(3, &perennial, 9);
        assert_eq!(dominance(&old, &young), Ordering::Greater);
        assert_eq!(dominance(&old_perennial, &old), Ordering::Greater);
        assert_eq!(dominance(&old, &plant_at_stage(4, &annual, 9)), Ordering::Equal);
    }
}
