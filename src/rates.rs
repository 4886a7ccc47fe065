//! Environment-dependent growth, spread and death rates.
//!
//! Growth/spread and death are resolved by two separate three-way checks
//! (best range, second range, fallback). Under [`RangeCheck::Literal`] the
//! second check tests the best range again, which leaves the "live" row of
//! the table unreachable.

use serde::{Deserialize, Serialize};

use crate::species::{LevelRange, SpeciesTemplate};

pub const BEST_GROWTH_RATE: f64 = 1.0;
pub const BEST_SPREAD_RATE: f64 = 0.5;
pub const BEST_DEATH_RATE: f64 = 0.0;
pub const LIVE_GROWTH_RATE: f64 = 0.8;
pub const LIVE_SPREAD_RATE: f64 = 0.0;
pub const LIVE_DEATH_RATE: f64 = 0.3;
pub const BACKGROUND_DEATH_RATE: f64 = 0.8;

/// Which interval the second branch of each rate lookup tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeCheck {
    /// Re-tests the best range; the live rates are never returned.
    #[default]
    Literal,
    /// Tests the live range.
    Corrected,
}

/// Which rate gates a mature plant's spread attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadGate {
    #[default]
    GrowthRate,
    SpreadRate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub range_check: RangeCheck,
    #[serde(default)]
    pub spread_gate: SpreadGate,
}

impl RuleSet {
    pub fn corrected() -> Self {
        Self {
            range_check: RangeCheck::Corrected,
            spread_gate: SpreadGate::SpreadRate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub growth: f64,
    pub spread: f64,
    pub death: f64,
}

fn second_range(species: &SpeciesTemplate, rules: RuleSet) -> LevelRange {
    match rules.range_check {
        RangeCheck::Literal => species.best_range,
        RangeCheck::Corrected => species.live_range,
    }
}

pub fn growth_rate(species: &SpeciesTemplate, level: i32, rules: RuleSet) -> f64 {
    if species.best_range.contains(level) {
        return BEST_GROWTH_RATE;
    }
    if second_range(species, rules).contains(level) {
        return LIVE_GROWTH_RATE;
    }
    0.0
}

pub fn spread_rate(species: &SpeciesTemplate, level: i32, rules: RuleSet) -> f64 {
    if species.best_range.contains(level) {
        return BEST_SPREAD_RATE;
    }
    if second_range(species, rules).contains(level) {
        return LIVE_SPREAD_RATE;
    }
    0.0
}

pub fn death_rate(species: &SpeciesTemplate, level: i32, rules: RuleSet) -> f64 {
    if species.best_range.contains(level) {
        return BEST_DEATH_RATE;
    }
    if second_range(species, rules).contains(level) {
        return LIVE_DEATH_RATE;
    }
    BACKGROUND_DEATH_RATE
}

/// Rate used by the spread decision under the given rules.
pub fn spread_gate_rate(species: &SpeciesTemplate, level: i32, rules: RuleSet) -> f64 {
    match rules.spread_gate {
        SpreadGate::GrowthRate => growth_rate(species, level, rules),
        SpreadGate::SpreadRate => spread_rate(species, level, rules),
    }
}

pub fn rates(species: &SpeciesTemplate, level: i32, rules: RuleSet) -> Rates {
    Rates {
        growth: growth_rate(species, level, rules),
        spread: spread_rate(species, level, rules),
        death: death_rate(species, level, rules),
    }
}
