#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep driver for the Skirmish world.
//!
//! Callers feed arbitrary wall-clock deltas. The clock only ever advances the
//! world in whole fixed steps, so the number and size of logic ticks for a
//! given amount of elapsed time never depend on how that time was chunked.

use std::time::Duration;

use skirmish_core::{EnemyId, RandomSource, SimulationConfig};
use skirmish_world::{update_enemy, update_player, LogicEntity, World};
use tracing::trace;

/// Accumulates elapsed time and drains it in fixed logic ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationClock {
    step: Duration,
    accumulator: Duration,
    ticks: u64,
}

impl SimulationClock {
    /// Creates a clock that ticks every `step`. A zero step is bumped to one
    /// nanosecond.
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self {
            step: step.max(Duration::from_nanos(1)),
            accumulator: Duration::ZERO,
            ticks: 0,
        }
    }

    /// Creates a clock ticking at the configured frame rate.
    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.tick_duration())
    }

    /// Duration of one logic tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Time received but not yet simulated. Always shorter than one step.
    #[must_use]
    pub const fn leftover(&self) -> Duration {
        self.accumulator
    }

    /// Logic ticks run since the clock was created.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Adds `elapsed` to the backlog and runs every whole tick it covers.
    ///
    /// Returns the number of ticks run by this call.
    pub fn update_world(
        &mut self,
        elapsed: Duration,
        player: &mut LogicEntity,
        world: &mut World,
        random: &mut dyn RandomSource,
    ) -> u64 {
        self.accumulator = self.accumulator.saturating_add(elapsed);
        let mut drained = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            run_tick(world, player, self.step, random);
            drained += 1;
        }
        self.ticks += drained;
        if drained > 0 {
            trace!(drained, total = self.ticks, "simulation ticks drained");
        }
        drained
    }
}

/// Runs exactly one logic tick: the player, then every enemy in slot order,
/// then the floating texts age.
pub fn run_tick(
    world: &mut World,
    player: &mut LogicEntity,
    step: Duration,
    random: &mut dyn RandomSource,
) {
    update_player(world, player, step, random);
    for index in 0..world.enemies().len() {
        update_enemy(world, EnemyId::new(index), player, step, random);
    }
    world.advance_floating_texts(step);
}
