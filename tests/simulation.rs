use std::sync::Arc;

use thicket::{
    rng::ScriptedRng,
    spatial::GridShape,
    LevelRange, RuleSet, SimulationGrid, SpeciesId, SpeciesTemplate,
};

fn species(max_stage: u32, mature_stage: u32, multi_season: bool) -> Arc<SpeciesTemplate> {
    Arc::new(SpeciesTemplate::new(
        SpeciesId(0),
        "sedge",
        LevelRange::new(0, 10),
        LevelRange::new(0, 100),
        max_stage,
        mature_stage,
        multi_season,
    ))
}

fn grid(width: usize, levels: Vec<i32>, species: Arc<SpeciesTemplate>) -> SimulationGrid {
    let shape = GridShape::new(width, levels.len() / width);
    SimulationGrid::new(shape, levels, vec![species], RuleSet::default()).expect("valid grid")
}

#[test]
fn single_season_plant_dies_after_passing_max_stage() {
    let mut grid = grid(1, vec![5], species(3, 1, false));
    grid.spawn(0, SpeciesId(0)).unwrap();
    // Zero draws always grow in the best range, where the death rate is zero.
    let mut rng = ScriptedRng::constant(0.0);

    for expected_stage in 1..=3 {
        grid.tick(&mut rng);
        let plants = grid.tile(0).unwrap().plants();
        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].current_stage(), expected_stage);
    }

    // Stage 4 exceeds max_stage; the age check fires in the same tick's prune.
    let outcome = grid.tick(&mut rng);
    assert_eq!(outcome.deaths, 1);
    assert!(grid.tile(0).unwrap().is_empty());

    grid.tick(&mut rng);
    assert_eq!(grid.step_count(), 5);
    assert_eq!(grid.population(), 0);
}

#[test]
fn multi_season_plant_outlives_max_stage() {
    let mut grid = grid(1, vec![5], species(3, 1, true));
    grid.spawn(0, SpeciesId(0)).unwrap();
    let mut rng = ScriptedRng::constant(0.0);
    for _ in 0..10 {
        grid.tick(&mut rng);
    }
    assert_eq!(grid.tile(0).unwrap().plants()[0].current_stage(), 10);
}

#[test]
fn mature_plant_seeds_its_neighbor() {
    // Tile 1 is outside the best range, so its seedling cannot grow this tick.
    let mut grid = grid(2, vec![5, 50], species(6, 1, false));
    grid.spawn(0, SpeciesId(0)).unwrap();
    let mut rng = ScriptedRng::new(&[
        0.0,  // tile 0 grows to the mature stage
        0.0,  // tile 0 spreads to tile 1
        0.0,  // tile 0 prune: best range, survives
        0.0,  // tile 1 grow: zero growth rate
        0.0,  // tile 1 spread: seedling is not mature
        0.99, // tile 1 prune: 0.99 clears the 0.8 background death rate
    ]);

    let outcome = grid.tick(&mut rng);
    assert_eq!(outcome.births, 1);
    assert_eq!(rng.consumed(), 6);

    let parent = &grid.tile(0).unwrap().plants()[0];
    let seedlings = grid.tile(1).unwrap().plants();
    assert_eq!(seedlings.len(), 1);
    assert_eq!(seedlings[0].current_stage(), 0);
    assert!(Arc::ptr_eq(seedlings[0].species(), parent.species()));
    assert_ne!(seedlings[0].id(), parent.id());
}

#[test]
fn spread_draws_once_per_neighbor() {
    // Middle of a 3x3 grid: four neighbors, one draw each.
    let mut grid = grid(3, vec![5; 9], species(6, 0, false));
    grid.spawn(4, SpeciesId(0)).unwrap();
    let outcome = grid.tick(&mut ScriptedRng::constant(0.0));
    // Tile 4 seeds 1, 7, 3 and 5. Tiles 5, 7 and 8 are visited afterwards, so
    // their seedlings grow and spread within the same tick: 4 + 3 + 3 + 2 * 2.
    assert_eq!(outcome.births, 14);
    for coord in [1, 3, 5, 7] {
        assert!(!grid.tile(coord).unwrap().is_empty(), "tile {coord} empty");
    }
    assert!(grid.tile(0).unwrap().is_empty());
}

#[test]
fn dominant_plant_prefers_multi_season_on_equal_maturity() {
    let template = |id, name: &str, multi_season| {
        Arc::new(SpeciesTemplate::new(
            SpeciesId(id),
            name,
            LevelRange::new(0, 10),
            LevelRange::new(0, 10),
            10,
            20,
            multi_season,
        ))
    };
    let shape = GridShape::new(1, 1);
    let species = vec![template(0, "annual", false), template(1, "perennial", true)];
    let mut grid = SimulationGrid::new(shape, vec![5], species, RuleSet::default()).unwrap();
    let mut rng = ScriptedRng::constant(0.0);

    grid.spawn(0, SpeciesId(1)).unwrap();
    grid.spawn(0, SpeciesId(0)).unwrap();
    for _ in 0..4 {
        grid.tick(&mut rng);
    }
    grid.spawn(0, SpeciesId(0)).unwrap();
    for _ in 0..5 {
        grid.tick(&mut rng);
    }

    let tile = grid.tile(0).unwrap();
    let fractions: Vec<f64> = tile.plants().iter().map(|p| p.maturity()).collect();
    assert_eq!(fractions, vec![0.9, 0.9, 0.5]);
    assert_eq!(tile.dominant_plant().unwrap().species().name, "perennial");
}
