#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Skirmish simulation.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! the pure behaviour and scheduling systems, and the adapters that drive
//! them. Nothing in here owns game state: the types describe directions,
//! activities, identifiers and tuning, and the [`RandomSource`] trait is the
//! single seam through which every randomized decision is drawn.

use glam::{UVec2, Vec2};

pub mod config;
pub mod random;

pub use config::{BotTuning, Footprint, MapConfig, PlayerTuning, SimulationConfig};
pub use random::{ChaChaRandom, RandomSource};

#[cfg(any(test, feature = "test-support"))]
pub use random::ScriptedRandom;

/// Hit points carried by an entity.
///
/// Signed so that clamped subtraction can be expressed without wrapping.
pub type Health = i32;

/// Integer code stored per tile of the map.
pub type TileCode = i32;

/// Tile code reserved for "no walkable tile here".
pub const NO_TILE: TileCode = 3;

/// Cardinal facing directions understood by the simulation.
///
/// The discriminant order matches the order of the direction-key flags in
/// [`PlayerInput`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward decreasing y.
    Up,
    /// Toward decreasing x.
    Left,
    /// Toward increasing y.
    Down,
    /// Toward increasing x.
    Right,
}

impl Direction {
    /// All directions in key-flag order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Unit vector pointing in this direction.
    #[must_use]
    pub const fn to_vector(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Picks the cardinal direction closest to an arbitrary vector.
    ///
    /// Exact diagonals resolve to `Down` or `Up`, so a sprite walking
    /// diagonally faces the camera axis rather than the side.
    #[must_use]
    pub fn from_vector(vector: Vec2) -> Self {
        if vector.x >= 0.0 {
            if vector.y >= vector.x {
                return Self::Down;
            }
            if vector.y <= -vector.x {
                return Self::Up;
            }
            return Self::Right;
        }
        if vector.y >= -vector.x {
            return Self::Down;
        }
        if vector.y <= vector.x {
            return Self::Up;
        }
        Self::Left
    }

    /// Position of the direction in [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Left => 1,
            Self::Down => 2,
            Self::Right => 3,
        }
    }

    /// Direction stored at `index` in [`Direction::ALL`], if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Logical behavioural state of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Activity {
    /// Idle in place.
    Standing,
    /// Moving along the facing direction.
    Walking,
    /// Swinging at something.
    Attacking,
    /// Out of health. Terminal.
    Dead,
}

impl Activity {
    /// Human readable name for debug overlays.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standing => "Standing",
            Self::Walking => "Walking",
            Self::Attacking => "Attacking",
            Self::Dead => "Dead",
        }
    }
}

/// Animation track selected by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Animation {
    /// Idle loop.
    Standing,
    /// Walk cycle.
    Walking,
    /// Attack swing.
    Attacking,
    /// Corpse frame.
    Dead,
}

impl Animation {
    /// Animation mirroring the provided activity.
    #[must_use]
    pub const fn for_activity(activity: Activity) -> Self {
        match activity {
            Activity::Standing => Self::Standing,
            Activity::Walking => Self::Walking,
            Activity::Attacking => Self::Attacking,
            Activity::Dead => Self::Dead,
        }
    }

    /// Human readable name for debug overlays.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standing => "Standing",
            Self::Walking => "Walking",
            Self::Attacking => "Attacking",
            Self::Dead => "Dead",
        }
    }
}

/// States of the autonomous enemy state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BotState {
    /// Wandering without a target.
    MovingAround,
    /// Walking toward a target.
    Chasing,
    /// Standing next to a target and hitting it on a cadence.
    Attacking,
}

impl BotState {
    /// Human readable name for debug overlays.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MovingAround => "MovingAround",
            Self::Chasing => "Chasing",
            Self::Attacking => "Attacking",
        }
    }
}

/// Read-only description of an entity's behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BehaviorView {
    /// Driven by player input.
    Player,
    /// Driven by the enemy state machine.
    Bot {
        /// Current state of the machine.
        state: BotState,
        /// Whether the machine currently tracks a target.
        has_target: bool,
    },
}

/// Unique identifier of an enemy, equal to its slot in the world.
///
/// Enemies are never removed, so identifiers stay valid for the lifetime of
/// the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(usize);

impl EnemyId {
    /// Creates a new enemy identifier with the provided slot index.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Retrieves the slot index of the identifier.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

/// Non-owning reference to an entity that a behaviour may target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// The player character.
    Player,
    /// An enemy stored in the world.
    Enemy(EnemyId),
}

/// External input sampled once per player tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    direction_held: [bool; 4],
    attack_held: bool,
    selected_enemy: Option<EnemyId>,
}

impl PlayerInput {
    /// Reports whether the key for `direction` is held.
    #[must_use]
    pub const fn is_direction_held(&self, direction: Direction) -> bool {
        self.direction_held[direction.index()]
    }

    /// Marks the key for `direction` as held or released.
    pub fn set_direction_held(&mut self, direction: Direction, held: bool) {
        self.direction_held[direction.index()] = held;
    }

    /// Reports whether the attack key is held.
    #[must_use]
    pub const fn is_attack_held(&self) -> bool {
        self.attack_held
    }

    /// Marks the attack key as held or released.
    pub fn set_attack_held(&mut self, held: bool) {
        self.attack_held = held;
    }

    /// Enemy picked for UI highlighting. Never read by the simulation.
    #[must_use]
    pub const fn selected_enemy(&self) -> Option<EnemyId> {
        self.selected_enemy
    }

    /// Replaces the highlighted enemy.
    pub fn select_enemy(&mut self, enemy: Option<EnemyId>) {
        self.selected_enemy = enemy;
    }

    /// Releases every held key, keeping the selection.
    pub fn release_all(&mut self) {
        self.direction_held = [false; 4];
        self.attack_held = false;
    }
}

/// Reference to a sprite sheet owned by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteSheetId(u32);

impl SpriteSheetId {
    /// Wraps a presentation-owned sheet handle.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the raw handle.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Surface the presentation layer draws onto.
///
/// The simulation only ever asks for its size, to bound camera math.
pub trait DrawableSurface {
    /// Width and height of the surface in pixels.
    fn size(&self) -> UVec2;
}

/// Reports whether `second` lies within `distance` of `first`.
///
/// Compares squared lengths, so the boundary itself counts as inside.
#[must_use]
pub fn is_within_distance(first: Vec2, second: Vec2, distance: f32) -> bool {
    first.distance_squared(second) <= distance * distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_directions_round_trip_through_vectors() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_vector(direction.to_vector()), direction);
        }
    }

    #[test]
    fn diagonals_face_the_vertical_axis() {
        assert_eq!(Direction::from_vector(Vec2::new(1.0, 1.0)), Direction::Down);
        assert_eq!(Direction::from_vector(Vec2::new(-1.0, 1.0)), Direction::Down);
        assert_eq!(Direction::from_vector(Vec2::new(1.0, -1.0)), Direction::Up);
        assert_eq!(Direction::from_vector(Vec2::new(-1.0, -1.0)), Direction::Up);
    }

    #[test]
    fn shallow_vectors_face_sideways() {
        assert_eq!(Direction::from_vector(Vec2::new(3.0, 1.0)), Direction::Right);
        assert_eq!(Direction::from_vector(Vec2::new(-3.0, -1.0)), Direction::Left);
    }

    #[test]
    fn direction_index_matches_all_order() {
        for (index, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), index);
            assert_eq!(Direction::from_index(index), Some(*direction));
        }
        assert_eq!(Direction::from_index(4), None);
    }

    #[test]
    fn within_distance_includes_boundary() {
        let origin = Vec2::ZERO;
        assert!(is_within_distance(origin, Vec2::new(3.0, 4.0), 5.0));
        assert!(!is_within_distance(origin, Vec2::new(3.0, 4.1), 5.0));
    }

    #[test]
    fn player_input_tracks_keys_independently() {
        let mut input = PlayerInput::default();
        input.set_direction_held(Direction::Left, true);
        input.set_attack_held(true);
        input.select_enemy(Some(EnemyId::new(7)));

        assert!(input.is_direction_held(Direction::Left));
        assert!(!input.is_direction_held(Direction::Right));
        assert!(input.is_attack_held());

        input.release_all();
        assert!(!input.is_direction_held(Direction::Left));
        assert!(!input.is_attack_held());
        assert_eq!(input.selected_enemy(), Some(EnemyId::new(7)));
    }

    #[test]
    fn animation_mirrors_activity() {
        assert_eq!(Animation::for_activity(Activity::Dead), Animation::Dead);
        assert_eq!(
            Animation::for_activity(Activity::Walking).name(),
            Activity::Walking.name()
        );
    }
}
