//! Tile-grid walkability tests and the sliding move resolver.

use std::time::Duration;

use glam::Vec2;
use skirmish_core::{Activity, Footprint, SimulationConfig};

use crate::{entity::Body, map::TileMap};

/// Reports whether `point` lies on an in-bounds, walkable tile.
#[must_use]
pub fn is_walkable_point(point: Vec2, map: &TileMap, tile_length: f32) -> bool {
    map.tile_index_of(point, tile_length)
        .is_some_and(|(column, row)| map.is_walkable_tile(column, row))
}

/// Reports whether a footprint centred on `point` stands on walkable tiles.
///
/// Samples the four corners of the footprint and its centre. Thin obstacles
/// narrower than the footprint can slip between samples.
#[must_use]
pub fn is_walkable(point: Vec2, footprint: Footprint, map: &TileMap, tile_length: f32) -> bool {
    let half = footprint.half_extents();
    let samples = [
        point - half,
        point + half,
        point + Vec2::new(-half.x, half.y),
        point + Vec2::new(half.x, -half.y),
        point,
    ];
    samples
        .into_iter()
        .all(|sample| is_walkable_point(sample, map, tile_length))
}

/// Moves `body` by `desired_change`, sliding along walls when blocked.
///
/// Tries the full move, then the horizontal part alone, then the vertical
/// part alone, and stays put if none fits. Any fallback sets the bump flag;
/// a full move clears it. This is a cheap axis-priority heuristic rather
/// than an exact resolver: a diagonal move into a corner always prefers
/// sliding horizontally.
pub fn move_with_collision_detection(
    body: &mut Body,
    desired_change: Vec2,
    map: &TileMap,
    config: &SimulationConfig,
) {
    let footprint = config.entity_footprint;
    let tile_length = config.tile_length();
    let destination = body.position + desired_change;
    if !body.has_collision_with_walls || is_walkable(destination, footprint, map, tile_length) {
        body.position = destination;
        body.has_bumped_into_wall = false;
        return;
    }

    let horizontal = body.position + Vec2::new(desired_change.x, 0.0);
    if is_walkable(horizontal, footprint, map, tile_length) {
        body.position = horizontal;
        body.has_bumped_into_wall = true;
        return;
    }

    let vertical = body.position + Vec2::new(0.0, desired_change.y);
    if is_walkable(vertical, footprint, map, tile_length) {
        body.position = vertical;
    }
    body.has_bumped_into_wall = true;
}

/// Applies the motion implied by the body's activity for one tick.
///
/// Only walking moves: the body advances along its facing at the configured
/// velocity.
pub fn integrate_motion(
    body: &mut Body,
    elapsed: Duration,
    map: &TileMap,
    config: &SimulationConfig,
) {
    match body.activity() {
        Activity::Standing | Activity::Attacking | Activity::Dead => {}
        Activity::Walking => {
            let elapsed_ms = elapsed.as_secs_f32() * 1_000.0;
            let change = body.direction * (elapsed_ms * config.walk_velocity_per_ms);
            move_with_collision_detection(body, change, map, config);
        }
    }
}
