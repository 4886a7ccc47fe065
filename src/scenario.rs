use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{map::MapFile, rates::RuleSet, render::RenderConfig};

fn default_ticks() -> u64 {
    20
}

/// A run description: which map to load and how to drive it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Map file path, relative to the scenario file's directory.
    pub map: PathBuf,
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    #[serde(default)]
    pub snapshot_interval_ticks: u64,
    #[serde(default)]
    pub rules: RuleSet,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Scenario {
    /// A scenario for a bare map file, named after the file stem.
    pub fn for_map(map: impl AsRef<Path>) -> Self {
        let map = map.as_ref().to_path_buf();
        let name = map
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "map".into());
        Self {
            name,
            description: None,
            seed: None,
            map,
            ticks: default_ticks(),
            snapshot_interval_ticks: 0,
            rules: RuleSet::default(),
            render: RenderConfig::default(),
        }
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.unwrap_or(self.ticks)
    }

    pub fn load_map(&self) -> Result<MapFile> {
        MapFile::load(&self.map)
            .with_context(|| format!("Failed to load map {}", self.map.display()))
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let mut scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if scenario.map.is_relative() {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            scenario.map = dir.join(&scenario.map);
        }
        Ok(scenario)
    }
}
