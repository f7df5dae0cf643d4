use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use skirmish_core::{BotTuning, MapConfig, PlayerTuning, SimulationConfig};

/// Settings read from the optional TOML file. Missing tables and keys keep
/// their defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Tick rate, tile size and other world constants.
    pub(crate) simulation: SimulationConfig,
    /// Player combat tuning.
    pub(crate) player: PlayerTuning,
    /// Enemy state machine tuning.
    pub(crate) bot: BotTuning,
    /// Map size and enemy density.
    pub(crate) map: MapConfig,
}

impl Config {
    /// Reads the file at `path`, or returns the defaults when no path is set.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load config from {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse config toml contents")?;
        ensure!(
            config.player.attack_damage > 0,
            "player attack_damage must be positive, got {}",
            config.player.attack_damage
        );
        ensure!(
            config.bot.attack_damage > 0,
            "bot attack_damage must be positive, got {}",
            config.bot.attack_damage
        );
        Ok(config)
    }

    /// Replaces the map dimensions given on the command line.
    pub(crate) fn override_map(&mut self, width: Option<usize>, height: Option<usize>) {
        if let Some(width) = width {
            self.map.width = width;
        }
        if let Some(height) = height {
            self.map.height = height;
        }
    }
}
