use std::{cell::Cell, rc::Rc, time::Duration};

use glam::Vec2;
use skirmish_core::{Activity, BehaviorView, Direction, PlayerInput, PlayerTuning, RandomSource};
use skirmish_world::{Behavior, Body, Surroundings};

/// Shared slot the input adapter writes and the player controller samples.
///
/// Cloning the handle shares the same slot.
#[derive(Clone, Debug, Default)]
pub struct InputHandle(Rc<Cell<PlayerInput>>);

impl InputHandle {
    /// Creates a handle with every key released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input state.
    #[must_use]
    pub fn get(&self) -> PlayerInput {
        self.0.get()
    }

    /// Replaces the input state.
    pub fn set(&self, input: PlayerInput) {
        self.0.set(input);
    }

    /// Edits the input state in place.
    pub fn update(&self, edit: impl FnOnce(&mut PlayerInput)) {
        let mut input = self.0.get();
        edit(&mut input);
        self.0.set(input);
    }
}

/// Behaviour that turns held keys into walking or an area swing.
#[derive(Debug)]
pub struct PlayerController {
    input: InputHandle,
    tuning: PlayerTuning,
}

impl PlayerController {
    /// Creates a controller reading from `input`.
    #[must_use]
    pub fn new(input: InputHandle, tuning: PlayerTuning) -> Self {
        Self { input, tuning }
    }
}

impl Behavior for PlayerController {
    fn update(
        &mut self,
        actor: &mut Body,
        surroundings: &mut Surroundings<'_>,
        _elapsed: Duration,
        random: &mut dyn RandomSource,
    ) {
        let input = self.input.get();
        let direction = Direction::ALL
            .into_iter()
            .filter(|direction| input.is_direction_held(*direction))
            .fold(Vec2::ZERO, |sum, direction| sum + direction.to_vector());

        if direction != Vec2::ZERO {
            actor.set_activity(Activity::Walking);
            actor.direction = direction.normalize_or_zero();
            return;
        }

        if input.is_attack_held() && !actor.is_dead() {
            actor.set_activity(Activity::Attacking);
            let _ = surroundings.strike_enemies_in_circle(
                actor.position,
                self.tuning.attack_radius,
                self.tuning.attack_damage,
                random,
            );
            return;
        }

        actor.set_activity(Activity::Standing);
    }

    fn view(&self) -> BehaviorView {
        BehaviorView::Player
    }
}
