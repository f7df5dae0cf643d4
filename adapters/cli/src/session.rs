use std::{fmt, time::Duration};

use anyhow::{ensure, Context, Result};
use glam::{UVec2, Vec2};
use skirmish_core::{ChaChaRandom, Direction, DrawableSurface, Health, PlayerInput};
use skirmish_system_behavior::InputHandle;
use skirmish_system_simulation::SimulationClock;
use skirmish_system_spawning::{spawn_enemies, spawn_player, EnemyArchetype};
use skirmish_world::{query, update_visuals, Camera, TileMap, World};
use tracing::{debug, info};

use crate::config::Config;

/// Length of each leg of the scripted walk.
const AUTOPILOT_LEG: Duration = Duration::from_secs(2);

/// Parameters of one headless run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SessionOptions {
    /// Seed for map generation, spawning and every in-game roll.
    pub(crate) seed: u64,
    /// Simulated wall-clock time.
    pub(crate) duration: Duration,
    /// Wall-clock delta fed to the clock per rendered frame.
    pub(crate) frame: Duration,
}

/// Off-screen surface standing in for a window.
#[derive(Clone, Copy, Debug)]
struct HeadlessSurface {
    size: UVec2,
}

impl DrawableSurface for HeadlessSurface {
    fn size(&self) -> UVec2 {
        self.size
    }
}

/// Outcome of a headless run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SessionSummary {
    /// Logic ticks simulated.
    pub(crate) ticks: u64,
    /// Frames fed to the clock.
    pub(crate) frames: u64,
    /// Player health at the end of the run.
    pub(crate) player_health: Health,
    /// Final player position.
    pub(crate) player_position: Vec2,
    /// Enemies still alive.
    pub(crate) living_enemies: usize,
    /// Enemies spawned at the start.
    pub(crate) total_enemies: usize,
    /// Enemies inside the final camera view.
    pub(crate) visible_enemies: usize,
    /// Floating texts alive at the end.
    pub(crate) floating_texts: usize,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ticks:           {} ({} frames)", self.ticks, self.frames)?;
        writeln!(
            f,
            "player:          {} hp at ({:.1}, {:.1})",
            self.player_health, self.player_position.x, self.player_position.y
        )?;
        writeln!(
            f,
            "enemies:         {} of {} alive, {} on screen",
            self.living_enemies, self.total_enemies, self.visible_enemies
        )?;
        write!(f, "floating texts:  {}", self.floating_texts)
    }
}

/// Generates a world from the seed and plays it for the requested duration
/// with a scripted player.
pub(crate) fn run(config: &Config, options: &SessionOptions) -> Result<SessionSummary> {
    ensure!(!options.frame.is_zero(), "frame duration must be positive");

    let mut random = ChaChaRandom::from_seed(options.seed);
    let map = TileMap::generate(config.map.width, config.map.height, &mut random)
        .context("failed to generate map")?;
    let mut world = World::new(map, config.simulation.clone());
    let roster = EnemyArchetype::default_roster();
    let total_enemies = spawn_enemies(
        &mut world,
        config.map.enemy_count(),
        &roster,
        &config.bot,
        &mut random,
    )
    .context("failed to spawn enemies")?;

    let input = InputHandle::new();
    let mut player = spawn_player(&world, input.clone(), &config.player, &mut random)
        .context("failed to spawn player")?;
    info!(
        seed = options.seed,
        width = config.map.width,
        height = config.map.height,
        enemies = total_enemies,
        "session started"
    );

    let surface = HeadlessSurface {
        size: UVec2::new(1280, 720),
    };
    let mut camera = Camera::new(player.body().position);
    let mut clock = SimulationClock::from_config(world.config());
    let mut elapsed = Duration::ZERO;
    let mut frames = 0;
    while elapsed < options.duration {
        input.update(|input| autopilot(input, elapsed));
        let _ = clock.update_world(options.frame, &mut player.logic, &mut world, &mut random);
        world.refresh_visuals(options.frame);
        update_visuals(&player.logic.body, &mut player.visuals, options.frame);
        camera.center = player.body().position;
        elapsed += options.frame;
        frames += 1;
    }
    debug!(frames, ticks = clock.ticks(), "session finished");

    let visible_enemies = world
        .enemies()
        .iter()
        .filter(|enemy| camera.can_see(surface.size(), enemy.body().position, &enemy.visuals))
        .count();

    Ok(SessionSummary {
        ticks: clock.ticks(),
        frames,
        player_health: player.body().current_health(),
        player_position: player.body().position,
        living_enemies: query::living_enemy_count(&world),
        total_enemies,
        visible_enemies,
        floating_texts: world.floating_texts().len(),
    })
}

/// Walks a square, one leg per direction, then swings for a leg.
fn autopilot(input: &mut PlayerInput, elapsed: Duration) {
    input.release_all();
    let leg = elapsed.as_millis() / AUTOPILOT_LEG.as_millis();
    let phase = usize::try_from(leg % 5).unwrap_or(0);
    match Direction::from_index(phase) {
        Some(direction) => input.set_direction_held(direction, true),
        None => input.set_attack_held(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::MapConfig;

    fn small_config() -> Config {
        Config {
            map: MapConfig {
                width: 30,
                height: 30,
                ..MapConfig::default()
            },
            ..Config::default()
        }
    }

    fn options(seed: u64) -> SessionOptions {
        SessionOptions {
            seed,
            duration: Duration::from_secs(2),
            frame: Duration::from_millis(16),
        }
    }

    #[test]
    fn session_runs_whole_ticks_for_the_duration() {
        let summary = run(&small_config(), &options(7)).expect("session runs");

        assert_eq!(summary.frames, 125);
        assert_eq!(summary.ticks, 120);
        assert_eq!(summary.total_enemies, 10);
        assert!(summary.living_enemies <= summary.total_enemies);
        assert!(summary.visible_enemies <= summary.total_enemies);
    }

    #[test]
    fn same_seed_gives_the_same_summary() {
        let first = run(&small_config(), &options(42)).expect("session runs");
        let second = run(&small_config(), &options(42)).expect("session runs");
        assert_eq!(first, second);
    }

    #[test]
    fn zero_frame_is_rejected() {
        let options = SessionOptions {
            frame: Duration::ZERO,
            ..options(1)
        };
        assert!(run(&small_config(), &options).is_err());
    }

    #[test]
    fn absurd_map_size_is_an_error() {
        let mut config = small_config();
        config.override_map(Some(usize::MAX), Some(usize::MAX));
        let error = run(&config, &options(1)).expect_err("map too large");
        assert!(error.to_string().contains("failed to generate map"));
    }

    #[test]
    fn autopilot_cycles_through_legs() {
        let mut input = PlayerInput::default();

        autopilot(&mut input, Duration::from_millis(500));
        assert!(input.is_direction_held(Direction::Up));

        autopilot(&mut input, Duration::from_millis(6_500));
        assert!(input.is_direction_held(Direction::Right));
        assert!(!input.is_direction_held(Direction::Up));

        autopilot(&mut input, Duration::from_millis(9_000));
        assert!(input.is_attack_held());
        assert!(Direction::ALL
            .iter()
            .all(|direction| !input.is_direction_held(*direction)));
    }
}
