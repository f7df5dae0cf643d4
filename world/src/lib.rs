#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the Skirmish simulation.
//!
//! The world owns the tile map, every enemy and the transient floating
//! texts. The player lives outside the world and is lent in for each tick.
//! [`update_player`] and [`update_enemy`] run one tick of an entity: its
//! behaviour decides, then [`collision::integrate_motion`] moves it.

use std::time::Duration;

use skirmish_core::{EnemyId, EntityRef, Health, RandomSource, SimulationConfig};
use tracing::info;

pub mod behavior;
pub mod camera;
pub mod collision;
pub mod combat;
pub mod entity;
pub mod map;

pub use behavior::{Behavior, Surroundings};
pub use camera::Camera;
pub use combat::{inflict_damage, FloatingText, FloatingTexts};
pub use entity::{update_visuals, Body, GameObject, LogicEntity, VisualEntity};
pub use map::{MapError, TileMap, MAX_TILES};

/// Aggregate of the map, the enemies and the floating texts.
///
/// Enemies are only ever appended. Death is a state of the body, so an
/// [`EnemyId`] stays valid for the lifetime of the world.
#[derive(Debug)]
pub struct World {
    enemies: Vec<GameObject>,
    floating_texts: FloatingTexts,
    map: TileMap,
    config: SimulationConfig,
}

impl World {
    /// Creates an empty world on `map` using the provided constants.
    #[must_use]
    pub fn new(map: TileMap, config: SimulationConfig) -> Self {
        Self {
            enemies: Vec::new(),
            floating_texts: FloatingTexts::with_limit(config.floating_text_limit),
            map,
            config,
        }
    }

    /// Constants the world was built with.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Tile map the world is laid out on.
    #[must_use]
    pub const fn map(&self) -> &TileMap {
        &self.map
    }

    /// All enemies in spawn order.
    #[must_use]
    pub fn enemies(&self) -> &[GameObject] {
        &self.enemies
    }

    /// Enemy stored under `id`.
    #[must_use]
    pub fn enemy(&self, id: EnemyId) -> Option<&GameObject> {
        self.enemies.get(id.get())
    }

    /// Mutable access to the enemy stored under `id`.
    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut GameObject> {
        self.enemies.get_mut(id.get())
    }

    /// Appends an enemy and returns its identifier.
    pub fn add_enemy(&mut self, enemy: GameObject) -> EnemyId {
        let id = EnemyId::new(self.enemies.len());
        self.enemies.push(enemy);
        id
    }

    /// Live floating texts.
    #[must_use]
    pub const fn floating_texts(&self) -> &FloatingTexts {
        &self.floating_texts
    }

    /// Mutable access to the floating texts, for hits on entities outside
    /// the world such as the player.
    pub fn floating_texts_mut(&mut self) -> &mut FloatingTexts {
        &mut self.floating_texts
    }

    /// Hits the enemy stored under `id`.
    ///
    /// Returns `false` if there is no such enemy or it was already dead.
    pub fn inflict_damage_on_enemy(
        &mut self,
        id: EnemyId,
        amount: Health,
        random: &mut dyn RandomSource,
    ) -> bool {
        let Some(enemy) = self.enemies.get_mut(id.get()) else {
            return false;
        };
        let body = &mut enemy.logic.body;
        let hit = inflict_damage(body, &mut self.floating_texts, amount, random);
        if hit && body.is_dead() {
            info!(entity = ?EntityRef::Enemy(id), "entity died");
        }
        hit
    }

    /// Ages the floating texts by one step and drops the expired ones.
    pub fn advance_floating_texts(&mut self, elapsed: Duration) {
        self.floating_texts.advance(elapsed);
    }

    /// Brings every enemy's visuals in line with its body.
    pub fn refresh_visuals(&mut self, elapsed: Duration) {
        for enemy in &mut self.enemies {
            update_visuals(&enemy.logic.body, &mut enemy.visuals, elapsed);
        }
    }
}

/// Runs one tick for the player: behaviour, then motion.
pub fn update_player(
    world: &mut World,
    player: &mut LogicEntity,
    elapsed: Duration,
    random: &mut dyn RandomSource,
) {
    let World {
        enemies,
        floating_texts,
        map,
        config,
    } = world;
    let LogicEntity { behavior, body } = player;
    let mut surroundings = Surroundings::new(None, enemies, floating_texts);
    behavior.update(body, &mut surroundings, elapsed, random);
    collision::integrate_motion(body, elapsed, map, config);
}

/// Runs one tick for the enemy stored under `id`: behaviour, then motion.
///
/// Unknown identifiers are ignored.
pub fn update_enemy(
    world: &mut World,
    id: EnemyId,
    player: &mut LogicEntity,
    elapsed: Duration,
    random: &mut dyn RandomSource,
) {
    let World {
        enemies,
        floating_texts,
        map,
        config,
    } = world;
    if id.get() >= enemies.len() {
        return;
    }
    let (before, rest) = enemies.split_at_mut(id.get());
    let Some((enemy, after)) = rest.split_first_mut() else {
        return;
    };
    let LogicEntity { behavior, body } = &mut enemy.logic;
    let mut surroundings = Surroundings::excluding(&mut player.body, before, after, floating_texts);
    behavior.update(body, &mut surroundings, elapsed, random);
    collision::integrate_motion(body, elapsed, map, config);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;
    use skirmish_core::{Activity, Animation, BehaviorView, EnemyId, Health};

    use super::World;

    /// Read-only snapshot of one enemy, as shown by a debug overlay.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EnemyInspection {
        /// Identifier of the enemy.
        pub id: EnemyId,
        /// Remaining hit points.
        pub current_health: Health,
        /// Hit points at spawn.
        pub maximum_health: Health,
        /// Whether the last move was blocked.
        pub has_bumped_into_wall: bool,
        /// Current logical activity.
        pub activity: Activity,
        /// Animation track last selected for rendering.
        pub animation: Animation,
        /// Facing direction.
        pub direction: Vec2,
        /// Behaviour state.
        pub behavior: BehaviorView,
    }

    /// First enemy whose sprite frame contains `point`.
    #[must_use]
    pub fn find_enemy_by_position(world: &World, point: Vec2) -> Option<EnemyId> {
        world
            .enemies
            .iter()
            .position(|enemy| enemy.visuals.contains(enemy.logic.body.position, point))
            .map(EnemyId::new)
    }

    /// Enemies standing within `radius` of `center`, in spawn order.
    #[must_use]
    pub fn find_enemies_in_circle(world: &World, center: Vec2, radius: f32) -> Vec<EnemyId> {
        world
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.logic.body.is_within(center, radius))
            .map(|(index, _)| EnemyId::new(index))
            .collect()
    }

    /// Debug snapshot of the enemy stored under `id`.
    #[must_use]
    pub fn inspect_enemy(world: &World, id: EnemyId) -> Option<EnemyInspection> {
        let enemy = world.enemy(id)?;
        let body = &enemy.logic.body;
        Some(EnemyInspection {
            id,
            current_health: body.current_health(),
            maximum_health: body.maximum_health(),
            has_bumped_into_wall: body.has_bumped_into_wall,
            activity: body.activity(),
            animation: enemy.visuals.animation,
            direction: body.direction,
            behavior: enemy.logic.behavior_view(),
        })
    }

    /// Number of enemies that still have health.
    #[must_use]
    pub fn living_enemy_count(world: &World) -> usize {
        world
            .enemies
            .iter()
            .filter(|enemy| !enemy.logic.body.is_dead())
            .count()
    }

    /// Total number of enemies, dead or alive.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }
}
