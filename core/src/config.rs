//! Tuning knobs injected into the world and its systems at construction time.
//!
//! Every struct deserializes with `#[serde(default)]`, so a configuration
//! file only needs to mention the values it overrides.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Health;

/// Rectangular collision extent sampled around an entity's centre point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Extent along the x axis in world units.
    pub width: f32,
    /// Extent along the y axis in world units.
    pub height: f32,
}

impl Footprint {
    /// Creates a footprint with explicit dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half extents of the footprint.
    #[must_use]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) / 2.0
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::new(8.0, 8.0)
    }
}

/// Constants shared by the whole simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Logic ticks per simulated second.
    pub frame_rate: u32,
    /// Edge length of a square tile in world units.
    pub tile_size: u32,
    /// Walking speed in world units per millisecond.
    pub walk_velocity_per_ms: f32,
    /// Collision extent used for movement and spawn placement.
    pub entity_footprint: Footprint,
    /// Maximum number of floating damage texts kept alive at once.
    pub floating_text_limit: usize,
}

impl SimulationConfig {
    /// Duration of one fixed logic tick.
    ///
    /// Computed in integer nanoseconds, so accumulating many ticks never
    /// drifts. A zero frame rate is treated as one tick per second.
    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Tile edge length as a float for world-space math.
    #[must_use]
    pub fn tile_length(&self) -> f32 {
        self.tile_size as f32
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            tile_size: 32,
            walk_velocity_per_ms: 0.08,
            entity_footprint: Footprint::default(),
            floating_text_limit: 1000,
        }
    }
}

/// Player combat tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Radius of the area swing around the player.
    pub attack_radius: f32,
    /// Damage dealt to every enemy caught in the swing.
    pub attack_damage: Health,
    /// Health the player spawns with.
    pub maximum_health: Health,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            attack_radius: 100.0,
            attack_damage: 2,
            maximum_health: 100,
        }
    }
}

/// Enemy state machine tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotTuning {
    /// Distance at which a wandering bot notices the player.
    pub notice_radius: f32,
    /// Distance at which a chasing bot stops to attack.
    pub attack_radius: f32,
    /// Distance beyond which a chasing bot gives up.
    pub pursuit_radius: f32,
    /// Distance beyond which an attacking bot resumes the chase.
    pub disengage_radius: f32,
    /// Time between two hits, in milliseconds.
    pub attack_interval_ms: u64,
    /// Damage dealt per hit.
    pub attack_damage: Health,
    /// Chance numerator for a spontaneous wander change per tick.
    pub wander_odds: i32,
    /// Chance denominator for a spontaneous wander change per tick.
    pub wander_odds_out_of: i32,
    /// Health each bot spawns with.
    pub maximum_health: Health,
}

impl BotTuning {
    /// Time between two hits.
    #[must_use]
    pub fn attack_interval(&self) -> Duration {
        Duration::from_millis(self.attack_interval_ms)
    }
}

impl Default for BotTuning {
    fn default() -> Self {
        Self {
            notice_radius: 400.0,
            attack_radius: 40.0,
            pursuit_radius: 600.0,
            disengage_radius: 60.0,
            attack_interval_ms: 1000,
            attack_damage: 1,
            wander_odds: 10,
            wander_odds_out_of: 2000,
            maximum_health: 100,
        }
    }
}

/// Procedural map and population settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Number of tile columns.
    pub width: usize,
    /// Number of tile rows.
    pub height: usize,
    /// Enemy population per tile, truncated after scaling.
    pub enemies_per_tile: f32,
}

impl MapConfig {
    /// Number of enemies to spawn for the configured map size.
    #[must_use]
    pub fn enemy_count(&self) -> usize {
        let tiles = self.width.saturating_mul(self.height) as f32;
        (tiles * self.enemies_per_tile.max(0.0)) as usize
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            enemies_per_tile: 0.02,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tick_is_one_sixtieth_of_a_second() {
        let config = SimulationConfig::default();
        let tick = config.tick_duration();
        assert_eq!(tick, Duration::from_nanos(16_666_666));
        assert_eq!(tick.as_millis(), 16);
    }

    #[test]
    fn zero_frame_rate_does_not_divide_by_zero() {
        let config = SimulationConfig {
            frame_rate: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(config.tick_duration(), Duration::from_secs(1));
    }

    #[test]
    fn default_population_matches_density() {
        assert_eq!(MapConfig::default().enemy_count(), 5000);
        let tiny = MapConfig {
            width: 10,
            height: 10,
            enemies_per_tile: 0.05,
        };
        assert_eq!(tiny.enemy_count(), 5);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let parsed: BotTuning = toml::from_str("notice_radius = 250.0\nattack_damage = 3\n")
            .expect("valid bot tuning");
        assert_eq!(parsed.notice_radius, 250.0);
        assert_eq!(parsed.attack_damage, 3);
        assert_eq!(parsed.pursuit_radius, BotTuning::default().pursuit_radius);
        assert_eq!(parsed.attack_interval(), Duration::from_secs(1));
    }

    #[test]
    fn nested_footprint_parses_from_table() {
        let parsed: SimulationConfig =
            toml::from_str("frame_rate = 30\n[entity_footprint]\nwidth = 12.0\nheight = 6.0\n")
                .expect("valid simulation config");
        assert_eq!(parsed.frame_rate, 30);
        assert_eq!(parsed.entity_footprint, Footprint::new(12.0, 6.0));
        assert_eq!(parsed.floating_text_limit, 1000);
    }
}
