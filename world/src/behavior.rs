//! Seam between the world and the per-entity decision logic.

use std::{fmt, time::Duration};

use glam::Vec2;
use skirmish_core::{BehaviorView, EnemyId, EntityRef, Health, RandomSource};
use tracing::info;

use crate::{
    combat::{self, FloatingTexts},
    entity::{Body, GameObject},
};

/// Decision logic invoked once per simulation tick for the entity owning it.
///
/// Behaviours only decide: they set the activity and facing of `actor` and
/// may hit other entities through `surroundings`. Walking motion is applied
/// afterwards by the world from the resulting activity.
pub trait Behavior: fmt::Debug {
    /// Runs one tick of decision logic.
    fn update(
        &mut self,
        actor: &mut Body,
        surroundings: &mut Surroundings<'_>,
        elapsed: Duration,
        random: &mut dyn RandomSource,
    );

    /// Read-only description for inspection and debug overlays.
    fn view(&self) -> BehaviorView;
}

/// Everything a behaviour may observe or hit besides its own actor.
///
/// The actor itself is never reachable through here: when an enemy is
/// updated its slot is carved out of the enemy list, and when the player is
/// updated the player slot is empty.
#[derive(Debug)]
pub struct Surroundings<'a> {
    player: Option<&'a mut Body>,
    enemies_before: &'a mut [GameObject],
    enemies_after: &'a mut [GameObject],
    after_offset: usize,
    floating_texts: &'a mut FloatingTexts,
}

impl<'a> Surroundings<'a> {
    /// Surroundings where every enemy in `enemies` is visible under its index.
    #[must_use]
    pub fn new(
        player: Option<&'a mut Body>,
        enemies: &'a mut [GameObject],
        floating_texts: &'a mut FloatingTexts,
    ) -> Self {
        let after_offset = enemies.len();
        Self {
            player,
            enemies_before: enemies,
            enemies_after: &mut [],
            after_offset,
            floating_texts,
        }
    }

    /// Surroundings of the enemy stored at `index`, which is left out.
    pub(crate) fn excluding(
        player: &'a mut Body,
        before: &'a mut [GameObject],
        after: &'a mut [GameObject],
        floating_texts: &'a mut FloatingTexts,
    ) -> Self {
        let after_offset = before.len() + 1;
        Self {
            player: Some(player),
            enemies_before: before,
            enemies_after: after,
            after_offset,
            floating_texts,
        }
    }

    /// The player's body, unless the player is the actor being updated.
    #[must_use]
    pub fn player(&self) -> Option<&Body> {
        self.player.as_deref()
    }

    /// Resolves a target reference, or `None` if it is not reachable.
    #[must_use]
    pub fn body(&self, target: EntityRef) -> Option<&Body> {
        match target {
            EntityRef::Player => self.player(),
            EntityRef::Enemy(id) => self.enemy_slot(id).map(GameObject::body),
        }
    }

    /// Floating texts spawned by hits so far.
    #[must_use]
    pub fn floating_texts(&self) -> &FloatingTexts {
        self.floating_texts
    }

    /// Hits `target` for `amount`. Returns `false` if it was unreachable or
    /// already dead.
    pub fn strike(
        &mut self,
        target: EntityRef,
        amount: Health,
        random: &mut dyn RandomSource,
    ) -> bool {
        let Self {
            player,
            enemies_before,
            enemies_after,
            after_offset,
            floating_texts,
        } = self;
        let body = match target {
            EntityRef::Player => player.as_deref_mut(),
            EntityRef::Enemy(id) => {
                slot_mut(enemies_before, enemies_after, *after_offset, id)
                    .map(|enemy| &mut enemy.logic.body)
            }
        };
        let Some(body) = body else {
            return false;
        };
        let hit = combat::inflict_damage(body, floating_texts, amount, random);
        if hit && body.is_dead() {
            info!(entity = ?target, "entity died");
        }
        hit
    }

    /// Hits every enemy within `radius` of `center`, in slot order. The
    /// enemies hit are the ones `query::find_enemies_in_circle` reports.
    ///
    /// Returns the number of enemies that took damage.
    pub fn strike_enemies_in_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        amount: Health,
        random: &mut dyn RandomSource,
    ) -> usize {
        let after_offset = self.after_offset;
        let before = self.enemies_before.iter_mut().enumerate();
        let after = self
            .enemies_after
            .iter_mut()
            .enumerate()
            .map(|(index, enemy)| (index + after_offset, enemy));

        let mut hits = 0;
        for (index, enemy) in before.chain(after) {
            let body = &mut enemy.logic.body;
            if !body.is_within(center, radius) {
                continue;
            }
            if combat::inflict_damage(body, self.floating_texts, amount, random) {
                hits += 1;
                if body.is_dead() {
                    info!(entity = ?EntityRef::Enemy(EnemyId::new(index)), "entity died");
                }
            }
        }
        hits
    }

    fn enemy_slot(&self, id: EnemyId) -> Option<&GameObject> {
        let index = id.get();
        if index < self.enemies_before.len() {
            return self.enemies_before.get(index);
        }
        index
            .checked_sub(self.after_offset)
            .and_then(|offset| self.enemies_after.get(offset))
    }
}

fn slot_mut<'s>(
    before: &'s mut [GameObject],
    after: &'s mut [GameObject],
    after_offset: usize,
    id: EnemyId,
) -> Option<&'s mut GameObject> {
    let index = id.get();
    if index < before.len() {
        return before.get_mut(index);
    }
    index
        .checked_sub(after_offset)
        .and_then(|offset| after.get_mut(offset))
}
