use serde::{Deserialize, Serialize};

/// Identifier assigned to a species by the map loader, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesId(pub u32);

impl SpeciesId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Inclusive interval of suitability levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    pub low: i32,
    pub high: i32,
}

impl LevelRange {
    pub fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, level: i32) -> bool {
        self.low <= level && level <= self.high
    }
}

/// Immutable description of a plant species, shared by all of its instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTemplate {
    pub id: SpeciesId,
    pub name: String,
    pub best_range: LevelRange,
    pub live_range: LevelRange,
    pub max_stage: u32,
    pub mature_stage: u32,
    pub multi_season: bool,
    pub marker: char,
}

impl SpeciesTemplate {
    /// Builds a template whose marker is the first character of `name`.
    pub fn new(
        id: SpeciesId,
        name: impl Into<String>,
        best_range: LevelRange,
        live_range: LevelRange,
        max_stage: u32,
        mature_stage: u32,
        multi_season: bool,
    ) -> Self {
        let name = name.into();
        let marker = name.chars().next().unwrap_or('?');
        Self {
            id,
            name,
            best_range,
            live_range,
            max_stage,
            mature_stage,
            multi_season,
            marker,
        }
    }

    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }
}
