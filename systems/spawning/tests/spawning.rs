use glam::Vec2;
use skirmish_core::{
    Activity, BehaviorView, BotState, BotTuning, PlayerTuning, ScriptedRandom, SimulationConfig,
    NO_TILE,
};
use skirmish_system_behavior::InputHandle;
use skirmish_system_spawning::{
    generate_random_point_for_spawning, spawn_enemies, spawn_player, EnemyArchetype, SpawnError,
    MAX_SPAWN_ATTEMPTS,
};
use skirmish_world::{query, TileMap, World};

fn open_world(width: usize, height: usize) -> World {
    World::new(
        TileMap::filled(width, height, 0).expect("valid map"),
        SimulationConfig::default(),
    )
}

#[test]
fn spawn_points_are_tile_centres() {
    let world = open_world(10, 10);
    let mut random = ScriptedRandom::new([3, 4]);

    let point = generate_random_point_for_spawning(&world, &mut random).expect("placement");

    assert_eq!(point, Vec2::new(112.0, 144.0));
    assert_eq!(random.draws(), 2);
}

#[test]
fn blocked_tiles_are_rejected_and_redrawn() {
    let map = TileMap::from_tiles(vec![NO_TILE, 0, 0, 0], 2).expect("valid map");
    let world = World::new(map, SimulationConfig::default());
    let mut random = ScriptedRandom::new([0, 0, 1, 0]);

    let point = generate_random_point_for_spawning(&world, &mut random).expect("placement");

    assert_eq!(point, Vec2::new(48.0, 16.0));
    assert_eq!(random.draws(), 4);
}

#[test]
fn unwalkable_map_exhausts_the_attempt_budget() {
    let map = TileMap::filled(4, 4, NO_TILE).expect("valid map");
    let world = World::new(map, SimulationConfig::default());
    let mut random = ScriptedRandom::minimums();

    let result = generate_random_point_for_spawning(&world, &mut random);

    assert_eq!(
        result,
        Err(SpawnError::PlacementExhausted {
            attempts: MAX_SPAWN_ATTEMPTS
        })
    );
    assert_eq!(random.draws(), 2 * MAX_SPAWN_ATTEMPTS);
}

#[test]
fn map_without_rows_cannot_host_spawns() {
    let map = TileMap::from_tiles(Vec::new(), 3).expect("valid map");
    let world = World::new(map, SimulationConfig::default());
    let mut random = ScriptedRandom::minimums();

    assert_eq!(
        generate_random_point_for_spawning(&world, &mut random),
        Err(SpawnError::EmptyMap)
    );
}

#[test]
fn population_is_split_evenly_across_archetypes() {
    let mut world = open_world(10, 10);
    let roster = EnemyArchetype::default_roster();
    let mut random = ScriptedRandom::minimums();

    let spawned = spawn_enemies(&mut world, 25, &roster, &BotTuning::default(), &mut random)
        .expect("spawn");

    assert_eq!(spawned, 20);
    assert_eq!(query::enemy_count(&world), 20);
    assert_eq!(query::living_enemy_count(&world), 20);
    for (index, enemy) in world.enemies().iter().enumerate() {
        let archetype = &roster[index / 2];
        assert_eq!(enemy.visuals.sprite_sheet, archetype.sprite_sheet);
        assert_eq!(enemy.visuals.sprite_size, archetype.sprite_size);

        let body = enemy.body();
        assert_eq!(body.current_health(), 100);
        assert_eq!(body.maximum_health(), 100);
        assert_eq!(body.activity(), Activity::Standing);
        assert!(body.has_collision_with_walls);
        assert_eq!(
            enemy.logic.behavior_view(),
            BehaviorView::Bot {
                state: BotState::MovingAround,
                has_target: false
            }
        );
    }
}

#[test]
fn each_enemy_draws_position_then_facing() {
    let mut world = open_world(10, 10);
    let roster = [EnemyArchetype::default_roster()[0]];
    let mut random = ScriptedRandom::new([2, 5, 3, 7, 1, 1]);

    let spawned =
        spawn_enemies(&mut world, 2, &roster, &BotTuning::default(), &mut random).expect("spawn");

    assert_eq!(spawned, 2);
    let bodies: Vec<_> = world.enemies().iter().map(|enemy| enemy.body()).collect();
    assert_eq!(bodies[0].position, Vec2::new(80.0, 176.0));
    assert_eq!(bodies[0].direction, Vec2::new(1.0, 0.0));
    assert_eq!(bodies[1].position, Vec2::new(240.0, 48.0));
    assert_eq!(bodies[1].direction, Vec2::new(-1.0, 0.0));
}

#[test]
fn fewer_enemies_than_archetypes_spawns_nothing() {
    let mut world = open_world(10, 10);
    let roster = EnemyArchetype::default_roster();
    let mut random = ScriptedRandom::minimums();

    let spawned =
        spawn_enemies(&mut world, 9, &roster, &BotTuning::default(), &mut random).expect("spawn");

    assert_eq!(spawned, 0);
    assert_eq!(random.draws(), 0);
}

#[test]
fn spawn_failure_stops_the_batch() {
    let map = TileMap::filled(3, 3, NO_TILE).expect("valid map");
    let mut world = World::new(map, SimulationConfig::default());
    let roster = EnemyArchetype::default_roster();
    let mut random = ScriptedRandom::minimums();

    let result = spawn_enemies(&mut world, 10, &roster, &BotTuning::default(), &mut random);

    assert!(matches!(result, Err(SpawnError::PlacementExhausted { .. })));
    assert_eq!(query::enemy_count(&world), 0);
}

#[test]
fn player_spawns_idle_at_full_health() {
    let world = open_world(10, 10);
    let mut random = ScriptedRandom::new([6, 6]);

    let player = spawn_player(&world, InputHandle::new(), &PlayerTuning::default(), &mut random)
        .expect("spawn");

    let body = player.body();
    assert_eq!(body.position, Vec2::new(208.0, 208.0));
    assert_eq!(body.direction, Vec2::ZERO);
    assert_eq!(body.current_health(), 100);
    assert_eq!(body.activity(), Activity::Standing);
    assert_eq!(player.logic.behavior_view(), BehaviorView::Player);
    assert_eq!(query::enemy_count(&world), 0);
}
