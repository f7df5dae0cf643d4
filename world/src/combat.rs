//! Damage application and the floating texts that report it.

use std::time::Duration;

use glam::Vec2;
use skirmish_core::{Health, RandomSource};
use tracing::{debug, trace};

use crate::entity::Body;

/// Upward drift of a floating text, in world units per second.
const FLOAT_SPEED: f32 = 10.0;

/// Shortest lifetime of a floating text, in milliseconds.
const MIN_LIFETIME_MS: i32 = 5_000;

/// Longest lifetime of a floating text, in milliseconds.
const MAX_LIFETIME_MS: i32 = 9_999;

/// Transient label reporting a damage hit.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingText {
    label: String,
    position: Vec2,
    age: Duration,
    max_age: Duration,
}

impl FloatingText {
    /// Creates a label near `anchor`.
    ///
    /// Draws three values from `random`: horizontal jitter, vertical jitter,
    /// then the lifetime.
    pub fn new(label: String, anchor: Vec2, random: &mut dyn RandomSource) -> Self {
        let jitter_x = 20 - random.generate_i32(0, 39);
        let jitter_y = -100 + random.generate_i32(0, 39);
        let lifetime_ms = random.generate_i32(MIN_LIFETIME_MS, MAX_LIFETIME_MS);
        Self {
            label,
            position: anchor + Vec2::new(jitter_x as f32, jitter_y as f32),
            age: Duration::ZERO,
            max_age: Duration::from_millis(u64::try_from(lifetime_ms).unwrap_or(0)),
        }
    }

    /// Text shown to the player.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current position in world space.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Time since the text appeared.
    #[must_use]
    pub const fn age(&self) -> Duration {
        self.age
    }

    /// Age at which the text disappears.
    #[must_use]
    pub const fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Ages the text and lets it float upward.
    pub fn advance(&mut self, elapsed: Duration) {
        self.age = self.age.saturating_add(elapsed);
        self.position.y -= elapsed.as_secs_f32() * FLOAT_SPEED;
    }

    /// Reports whether the text outlived its lifetime.
    #[must_use]
    pub fn has_expired(&self) -> bool {
        self.age >= self.max_age
    }
}

/// Bounded population of live floating texts.
///
/// When full, a uniformly random existing text is evicted to make room for
/// the new one. Order is not preserved.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingTexts {
    texts: Vec<FloatingText>,
    limit: usize,
}

impl FloatingTexts {
    /// Creates an empty population capped at `limit` (at least one).
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            texts: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Maximum number of live texts.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Number of live texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Reports whether no text is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Iterator over the live texts.
    pub fn iter(&self) -> impl Iterator<Item = &FloatingText> {
        self.texts.iter()
    }

    /// Adds a text near `anchor`, evicting random entries while at the cap.
    pub fn spawn(&mut self, label: String, anchor: Vec2, random: &mut dyn RandomSource) {
        while self.texts.len() >= self.limit {
            let evicted = random.generate_size(0, self.texts.len() - 1);
            debug!(evicted, limit = self.limit, "floating text cap reached");
            let _ = self.texts.swap_remove(evicted);
        }
        self.texts.push(FloatingText::new(label, anchor, random));
    }

    /// Ages every text and drops the expired ones.
    pub fn advance(&mut self, elapsed: Duration) {
        let mut index = 0;
        while index < self.texts.len() {
            self.texts[index].advance(elapsed);
            if self.texts[index].has_expired() {
                let _ = self.texts.swap_remove(index);
            } else {
                index += 1;
            }
        }
    }
}

/// Applies `amount` damage to `target` and reports the hit.
///
/// Hitting an already dead body does nothing and returns `false`. A
/// successful hit appends a floating text labelled with the amount at the
/// target's position.
pub fn inflict_damage(
    target: &mut Body,
    floating_texts: &mut FloatingTexts,
    amount: Health,
    random: &mut dyn RandomSource,
) -> bool {
    if !target.inflict_damage(amount) {
        return false;
    }
    trace!(amount, remaining = target.current_health(), "damage inflicted");
    floating_texts.spawn(amount.to_string(), target.position, random);
    true
}
