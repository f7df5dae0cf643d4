//! Logical and visual halves of a game actor.

use std::time::Duration;

use glam::{UVec2, Vec2};
use skirmish_core::{
    is_within_distance, Activity, Animation, BehaviorView, Health, SpriteSheetId,
};

use crate::behavior::Behavior;

/// Authoritative physical and combat state of an actor.
///
/// Health is clamped to `0..=maximum`. Once it reaches zero the body is dead
/// for good: [`Body::set_activity`] keeps reporting [`Activity::Dead`] no
/// matter what a behaviour asks for, and further damage is ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Point on the ground the actor stands on.
    pub position: Vec2,
    /// Facing and walking direction. Not renormalized after assignment.
    pub direction: Vec2,
    /// Whether movement is blocked by unwalkable tiles.
    pub has_collision_with_walls: bool,
    /// Set by the last move that could not reach its full destination.
    pub has_bumped_into_wall: bool,
    current_health: Health,
    maximum_health: Health,
    activity: Activity,
}

impl Body {
    /// Creates a body with collision enabled and the bump flag cleared.
    #[must_use]
    pub fn new(
        position: Vec2,
        direction: Vec2,
        current_health: Health,
        maximum_health: Health,
        activity: Activity,
    ) -> Self {
        let maximum_health = maximum_health.max(0);
        let mut body = Self {
            position,
            direction,
            has_collision_with_walls: true,
            has_bumped_into_wall: false,
            current_health: current_health.clamp(0, maximum_health),
            maximum_health,
            activity: Activity::Standing,
        };
        body.set_activity(activity);
        body
    }

    /// Replaces the collision flag.
    #[must_use]
    pub fn with_collision(mut self, has_collision_with_walls: bool) -> Self {
        self.has_collision_with_walls = has_collision_with_walls;
        self
    }

    /// Current logical activity.
    #[must_use]
    pub const fn activity(&self) -> Activity {
        self.activity
    }

    /// Requests a new activity. Dead bodies stay dead.
    pub fn set_activity(&mut self, activity: Activity) {
        if self.is_dead() {
            self.activity = Activity::Dead;
            return;
        }
        self.activity = activity;
    }

    /// Remaining hit points.
    #[must_use]
    pub const fn current_health(&self) -> Health {
        self.current_health
    }

    /// Hit points at spawn.
    #[must_use]
    pub const fn maximum_health(&self) -> Health {
        self.maximum_health
    }

    /// Reports whether the body ran out of health.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.current_health == 0
    }

    /// Whether the body stands within `radius` of `center`, boundary included.
    #[must_use]
    pub fn is_within(&self, center: Vec2, radius: f32) -> bool {
        is_within_distance(self.position, center, radius)
    }

    /// Subtracts `damage`, clamping at zero.
    ///
    /// Returns `false` without any effect when the body was already dead or
    /// `damage` is not positive, so callers can skip reporting hits nobody can
    /// observe. Health never goes up.
    #[must_use]
    pub fn inflict_damage(&mut self, damage: Health) -> bool {
        if self.current_health == 0 || damage <= 0 {
            return false;
        }
        self.current_health = self
            .current_health
            .saturating_sub(damage)
            .clamp(0, self.maximum_health);
        if self.is_dead() {
            self.set_activity(Activity::Dead);
        }
        true
    }
}

/// Body plus the behaviour that drives it.
#[derive(Debug)]
pub struct LogicEntity {
    /// Decision logic run once per tick. Owned exclusively by this entity.
    pub behavior: Box<dyn Behavior>,
    /// State the behaviour acts on.
    pub body: Body,
}

impl LogicEntity {
    /// Pairs a behaviour with the body it controls.
    #[must_use]
    pub fn new(behavior: Box<dyn Behavior>, body: Body) -> Self {
        Self { behavior, body }
    }

    /// Read-only description of the behaviour.
    #[must_use]
    pub fn behavior_view(&self) -> BehaviorView {
        self.behavior.view()
    }
}

/// Render bookkeeping derived from a [`Body`].
///
/// Nothing in here feeds back into the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualEntity {
    /// Sheet the frames are cut from.
    pub sprite_sheet: SpriteSheetId,
    /// Size of one frame in pixels.
    pub sprite_size: UVec2,
    /// Pixels between the bottom of the frame and the actor's feet.
    pub vertical_offset: i32,
    /// Time spent in the current animation clock.
    pub animation_time: Duration,
    /// Track mirroring the body's activity.
    pub animation: Animation,
}

impl VisualEntity {
    /// Creates visuals starting on the standing track.
    #[must_use]
    pub fn new(sprite_sheet: SpriteSheetId, sprite_size: UVec2, vertical_offset: i32) -> Self {
        Self {
            sprite_sheet,
            sprite_size,
            vertical_offset,
            animation_time: Duration::ZERO,
            animation: Animation::Standing,
        }
    }

    /// Vector from the frame's top-left corner to the actor's feet.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(
            (self.sprite_size.x / 2) as f32,
            self.sprite_size.y as f32 - self.vertical_offset as f32,
        )
    }

    /// Top-left corner of the frame for an actor standing at `position`.
    #[must_use]
    pub fn top_left(&self, position: Vec2) -> Vec2 {
        position - self.offset()
    }

    /// Reports whether `point` hits the frame drawn for an actor at `position`.
    #[must_use]
    pub fn contains(&self, position: Vec2, point: Vec2) -> bool {
        let top_left = self.top_left(position);
        let bottom_right = top_left + self.sprite_size.as_vec2();
        point.x >= top_left.x
            && point.x <= bottom_right.x
            && point.y >= top_left.y
            && point.y <= bottom_right.y
    }
}

/// Selects the animation for the body's activity and advances its clock.
pub fn update_visuals(body: &Body, visuals: &mut VisualEntity, elapsed: Duration) {
    visuals.animation = Animation::for_activity(body.activity());
    visuals.animation_time = visuals.animation_time.saturating_add(elapsed);
}

/// An actor: logic plus its presentation bookkeeping.
#[derive(Debug)]
pub struct GameObject {
    /// Render-only half.
    pub visuals: VisualEntity,
    /// Authoritative half.
    pub logic: LogicEntity,
}

impl GameObject {
    /// Pairs visuals with logic.
    #[must_use]
    pub fn new(visuals: VisualEntity, logic: LogicEntity) -> Self {
        Self { visuals, logic }
    }

    /// Shorthand for the logical body.
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.logic.body
    }
}
