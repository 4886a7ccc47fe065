pub mod engine;
pub mod map;
pub mod plant;
pub mod rates;
pub mod render;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod spatial;
pub mod species;
pub mod tile;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings, TickReport};
pub use map::{MapError, MapFile};
pub use plant::{Plant, PlantId};
pub use rates::{RangeCheck, Rates, RuleSet, SpreadGate};
pub use species::{LevelRange, SpeciesId, SpeciesTemplate};
pub use tile::Tile;
pub use world::{SimulationGrid, TickOutcome};
