#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Placement of the player and the enemy population on walkable tiles.
//!
//! Every position is a tile centre picked by rejection sampling against the
//! configured entity footprint. Draw order is fixed so a seeded run always
//! spawns the same population.

use glam::{UVec2, Vec2};
use skirmish_core::{Activity, BotTuning, Direction, PlayerTuning, RandomSource, SpriteSheetId};
use skirmish_system_behavior::{BotAi, InputHandle, PlayerController};
use skirmish_world::{collision, Body, GameObject, LogicEntity, TileMap, VisualEntity, World};
use thiserror::Error;
use tracing::{debug, warn};

/// Number of candidate tiles tried before placement gives up.
pub const MAX_SPAWN_ATTEMPTS: usize = 100;

/// Sprite sheet reserved for the player character.
pub const PLAYER_SPRITE_SHEET: SpriteSheetId = SpriteSheetId::new(0);

const PLAYER_SPRITE_SIZE: UVec2 = UVec2::splat(64);

const DEFAULT_ROSTER: [EnemyArchetype; 10] = [
    EnemyArchetype::new("bat", SpriteSheetId::new(1), UVec2::splat(64), 4),
    EnemyArchetype::new("bee", SpriteSheetId::new(2), UVec2::splat(32), 2),
    EnemyArchetype::new("big_worm", SpriteSheetId::new(3), UVec2::splat(64), 18),
    EnemyArchetype::new("eyeball", SpriteSheetId::new(4), UVec2::splat(64), 17),
    EnemyArchetype::new("ghost", SpriteSheetId::new(5), UVec2::splat(64), 13),
    EnemyArchetype::new("man_eater_flower", SpriteSheetId::new(6), UVec2::splat(128), 28),
    EnemyArchetype::new("pumpking", SpriteSheetId::new(7), UVec2::splat(64), 10),
    EnemyArchetype::new("slime", SpriteSheetId::new(8), UVec2::splat(64), 20),
    EnemyArchetype::new("small_worm", SpriteSheetId::new(9), UVec2::splat(64), 19),
    EnemyArchetype::new("snake", SpriteSheetId::new(10), UVec2::splat(64), 18),
];

/// Errors raised while placing actors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    /// No walkable tile was found within the attempt budget.
    #[error("no walkable spawn point found after {attempts} attempts")]
    PlacementExhausted {
        /// Number of candidates rejected.
        attempts: usize,
    },
    /// The map has no tiles to pick from.
    #[error("cannot spawn on a map without tiles")]
    EmptyMap,
}

/// Appearance shared by every enemy of one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyArchetype {
    /// Short identifier used in logs.
    pub name: &'static str,
    /// Sheet the frames are cut from.
    pub sprite_sheet: SpriteSheetId,
    /// Size of one frame in pixels.
    pub sprite_size: UVec2,
    /// Pixels between the bottom of the frame and the feet.
    pub vertical_offset: i32,
}

impl EnemyArchetype {
    /// Describes an archetype.
    #[must_use]
    pub const fn new(
        name: &'static str,
        sprite_sheet: SpriteSheetId,
        sprite_size: UVec2,
        vertical_offset: i32,
    ) -> Self {
        Self {
            name,
            sprite_sheet,
            sprite_size,
            vertical_offset,
        }
    }

    /// The ten stock enemy kinds.
    #[must_use]
    pub fn default_roster() -> Vec<EnemyArchetype> {
        DEFAULT_ROSTER.to_vec()
    }

    fn visuals(&self) -> VisualEntity {
        VisualEntity::new(self.sprite_sheet, self.sprite_size, self.vertical_offset)
    }
}

/// Picks the centre of a random walkable tile.
///
/// Draws a column then a row per attempt, and fails once
/// [`MAX_SPAWN_ATTEMPTS`] candidates were rejected.
pub fn generate_random_point_for_spawning(
    world: &World,
    random: &mut dyn RandomSource,
) -> Result<Vec2, SpawnError> {
    let map = world.map();
    if map.width() == 0 || map.height() == 0 {
        return Err(SpawnError::EmptyMap);
    }
    let config = world.config();
    let tile_length = config.tile_length();
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let column = random.generate_size(0, map.width() - 1);
        let row = random.generate_size(0, map.height() - 1);
        let candidate = TileMap::tile_center(column, row, tile_length);
        if collision::is_walkable(candidate, config.entity_footprint, map, tile_length) {
            return Ok(candidate);
        }
    }
    warn!(
        attempts = MAX_SPAWN_ATTEMPTS,
        walkable_tiles = map.walkable_tile_count(),
        "spawn placement exhausted"
    );
    Err(SpawnError::PlacementExhausted {
        attempts: MAX_SPAWN_ATTEMPTS,
    })
}

/// Spawns `target_count / archetypes.len()` bots of every archetype.
///
/// Each bot gets a spawn point, then a random cardinal facing, full health
/// and a fresh [`BotAi`]. Returns the number of bots added.
pub fn spawn_enemies(
    world: &mut World,
    target_count: usize,
    archetypes: &[EnemyArchetype],
    tuning: &BotTuning,
    random: &mut dyn RandomSource,
) -> Result<usize, SpawnError> {
    if archetypes.is_empty() {
        return Ok(0);
    }
    let per_archetype = target_count / archetypes.len();
    let mut spawned = 0;
    for archetype in archetypes {
        for _ in 0..per_archetype {
            let position = generate_random_point_for_spawning(world, random)?;
            let direction = random_cardinal(random);
            let body = Body::new(
                position,
                direction.to_vector(),
                tuning.maximum_health,
                tuning.maximum_health,
                Activity::Standing,
            );
            let logic = LogicEntity::new(Box::new(BotAi::new(tuning.clone())), body);
            let _ = world.add_enemy(GameObject::new(archetype.visuals(), logic));
            spawned += 1;
        }
        debug!(archetype = archetype.name, count = per_archetype, "enemies spawned");
    }
    Ok(spawned)
}

/// Places the player on a walkable tile, facing nowhere, at full health.
pub fn spawn_player(
    world: &World,
    input: InputHandle,
    tuning: &PlayerTuning,
    random: &mut dyn RandomSource,
) -> Result<GameObject, SpawnError> {
    let position = generate_random_point_for_spawning(world, random)?;
    let body = Body::new(
        position,
        Vec2::ZERO,
        tuning.maximum_health,
        tuning.maximum_health,
        Activity::Standing,
    );
    let controller = PlayerController::new(input, tuning.clone());
    Ok(GameObject::new(
        VisualEntity::new(PLAYER_SPRITE_SHEET, PLAYER_SPRITE_SIZE, 0),
        LogicEntity::new(Box::new(controller), body),
    ))
}

fn random_cardinal(random: &mut dyn RandomSource) -> Direction {
    let index = random.generate_i32(0, 3);
    usize::try_from(index)
        .ok()
        .and_then(Direction::from_index)
        .unwrap_or(Direction::Up)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_matches_stock_enemies() {
        let roster = EnemyArchetype::default_roster();
        assert_eq!(roster.len(), 10);
        let flower = roster
            .iter()
            .find(|archetype| archetype.name == "man_eater_flower")
            .expect("flower present");
        assert_eq!(flower.sprite_size, UVec2::new(128, 128));
        assert_eq!(flower.vertical_offset, 28);
        assert!(roster
            .iter()
            .all(|archetype| archetype.sprite_sheet != PLAYER_SPRITE_SHEET));
    }

    #[test]
    fn cardinal_draw_maps_to_key_order() {
        let mut random = skirmish_core::ScriptedRandom::new([0, 1, 2, 3]);
        let drawn: Vec<Direction> = (0..4).map(|_| random_cardinal(&mut random)).collect();
        assert_eq!(drawn, Direction::ALL.to_vec());
    }
}
