use std::time::Duration;

use glam::Vec2;
use skirmish_core::{
    is_within_distance, Activity, BehaviorView, BotState, BotTuning, EntityRef, RandomSource,
};
use skirmish_world::{Behavior, Body, Surroundings};
use tracing::debug;

/// Smallest attack cadence honoured, so a zero interval cannot spin forever.
const MIN_ATTACK_INTERVAL: Duration = Duration::from_millis(1);

/// Three-state enemy machine: wander, chase the player, hit it on a cadence.
///
/// The target is a non-owning [`EntityRef`] re-resolved every tick. A target
/// that died or can no longer be resolved sends the bot back to wandering.
#[derive(Debug)]
pub struct BotAi {
    tuning: BotTuning,
    state: BotState,
    target: Option<EntityRef>,
    since_last_attack: Duration,
}

impl BotAi {
    /// Creates a wandering bot without a target.
    #[must_use]
    pub fn new(tuning: BotTuning) -> Self {
        Self {
            tuning,
            state: BotState::MovingAround,
            target: None,
            since_last_attack: Duration::ZERO,
        }
    }

    /// Current state of the machine.
    #[must_use]
    pub const fn state(&self) -> BotState {
        self.state
    }

    /// Entity the bot is after, if any.
    #[must_use]
    pub const fn target(&self) -> Option<EntityRef> {
        self.target
    }

    fn transition(&mut self, next: BotState) {
        if self.state != next {
            debug!(from = self.state.name(), to = next.name(), "bot state changed");
            self.state = next;
        }
    }

    fn give_up(&mut self, actor: &mut Body) {
        actor.set_activity(Activity::Standing);
        self.transition(BotState::MovingAround);
        self.target = None;
    }

    /// Position of the target while it is resolvable and alive.
    fn live_target_position(&self, surroundings: &Surroundings<'_>) -> Option<Vec2> {
        self.target
            .and_then(|target| surroundings.body(target))
            .filter(|body| !body.is_dead())
            .map(|body| body.position)
    }

    fn move_around(
        &mut self,
        actor: &mut Body,
        surroundings: &Surroundings<'_>,
        random: &mut dyn RandomSource,
    ) {
        let notice_radius = self.tuning.notice_radius;
        let noticed = surroundings.player().is_some_and(|player| {
            !player.is_dead() && is_within_distance(actor.position, player.position, notice_radius)
        });
        if noticed {
            self.transition(BotState::Chasing);
            self.target = Some(EntityRef::Player);
            return;
        }

        let wander = actor.has_bumped_into_wall
            || random.generate_i32(0, self.tuning.wander_odds_out_of - 1) < self.tuning.wander_odds;
        if !wander {
            return;
        }
        let next = match actor.activity() {
            Activity::Standing => Activity::Walking,
            Activity::Walking | Activity::Attacking | Activity::Dead => Activity::Standing,
        };
        actor.set_activity(next);
        let x = random.generate_i32(0, 9) - 5;
        let y = random.generate_i32(0, 9) - 5;
        actor.direction = Vec2::new(x as f32, y as f32).normalize_or_zero();
    }

    fn chase(&mut self, actor: &mut Body, surroundings: &Surroundings<'_>) {
        let Some(target_position) = self.live_target_position(surroundings) else {
            self.give_up(actor);
            return;
        };
        if is_within_distance(actor.position, target_position, self.tuning.attack_radius) {
            self.transition(BotState::Attacking);
            actor.set_activity(Activity::Standing);
        } else if is_within_distance(actor.position, target_position, self.tuning.pursuit_radius) {
            actor.set_activity(Activity::Walking);
            actor.direction = (target_position - actor.position).normalize_or_zero();
        } else {
            self.give_up(actor);
        }
    }

    fn attack(
        &mut self,
        actor: &mut Body,
        surroundings: &mut Surroundings<'_>,
        elapsed: Duration,
        random: &mut dyn RandomSource,
    ) {
        let (Some(target), Some(target_position)) =
            (self.target, self.live_target_position(surroundings))
        else {
            self.give_up(actor);
            return;
        };
        if !is_within_distance(actor.position, target_position, self.tuning.disengage_radius) {
            self.transition(BotState::Chasing);
            actor.set_activity(Activity::Standing);
            return;
        }

        let interval = self.tuning.attack_interval().max(MIN_ATTACK_INTERVAL);
        self.since_last_attack = self.since_last_attack.saturating_add(elapsed);
        while self.since_last_attack >= interval {
            actor.set_activity(Activity::Attacking);
            let _ = surroundings.strike(target, self.tuning.attack_damage, random);
            self.since_last_attack -= interval;
        }

        if self.live_target_position(surroundings).is_none() {
            self.give_up(actor);
        }
    }
}

impl Behavior for BotAi {
    fn update(
        &mut self,
        actor: &mut Body,
        surroundings: &mut Surroundings<'_>,
        elapsed: Duration,
        random: &mut dyn RandomSource,
    ) {
        if actor.is_dead() {
            return;
        }
        match self.state {
            BotState::MovingAround => self.move_around(actor, surroundings, random),
            BotState::Chasing => self.chase(actor, surroundings),
            BotState::Attacking => self.attack(actor, surroundings, elapsed, random),
        }
        // acknowledged
        actor.has_bumped_into_wall = false;
    }

    fn view(&self) -> BehaviorView {
        BehaviorView::Bot {
            state: self.state,
            has_target: self.target.is_some(),
        }
    }
}
