use std::time::Duration;

use vanguard_defence_core::{Command, EnemyKind, Event, Position};
use vanguard_defence_system_movement::{Movement, STEP_QUANTUM};
use vanguard_defence_world::{self as world, query, World};

fn pump(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn start_round_with_enemy(world: &mut World) {
    let _ = pump(world, Command::StartRound);
    let _ = pump(
        world,
        Command::SpawnEnemy {
            kind: EnemyKind::Basic,
            units: 1,
        },
    );
}

#[test]
fn proposed_moves_advance_enemies_through_the_world() {
    let mut world = World::new();
    start_round_with_enemy(&mut world);

    let mut movement = Movement::new();
    let tick_events = pump(&mut world, Command::Tick { dt: STEP_QUANTUM });

    let mut commands = Vec::new();
    movement.handle(&tick_events, &query::enemy_view(&world), &mut commands);
    assert_eq!(commands.len(), 1);

    for command in commands {
        let _ = pump(&mut world, command);
    }

    let view = query::enemy_view(&world);
    let snapshot = view.iter().next().expect("enemy still on the field");
    assert!(snapshot.position.x() > -6.0);
}

#[test]
fn enemies_eventually_breach_and_cost_health() {
    let mut world = World::new();
    start_round_with_enemy(&mut world);

    let mut movement = Movement::new();
    let mut commands = Vec::new();
    for _ in 0..4_000 {
        let tick_events = pump(
            &mut world,
            Command::Tick {
                dt: Duration::from_micros(22_500),
            },
        );
        commands.clear();
        movement.handle(&tick_events, &query::enemy_view(&world), &mut commands);
        for command in commands.drain(..) {
            let _ = pump(&mut world, command);
        }
        if query::enemy_view(&world).is_empty() {
            break;
        }
    }

    assert!(query::enemy_view(&world).is_empty(), "enemy should breach");
    assert_eq!(query::health(&world), 95);
}

#[test]
fn movement_state_is_identical_across_tick_granularities() {
    let run = |chunks: &[Duration]| {
        let mut world = World::new();
        start_round_with_enemy(&mut world);
        let mut movement = Movement::new();
        let mut commands = Vec::new();
        for &dt in chunks {
            let tick_events = pump(&mut world, Command::Tick { dt });
            commands.clear();
            movement.handle(&tick_events, &query::enemy_view(&world), &mut commands);
            for command in commands.drain(..) {
                let _ = pump(&mut world, command);
            }
        }
        let view = query::enemy_view(&world);
        let result = view.iter().next().map(|snapshot| snapshot.position);
        result
    };

    let coarse = run(&[STEP_QUANTUM * 8]);
    let fine = run(&[STEP_QUANTUM; 8]);
    assert_eq!(coarse, fine);
}

#[test]
fn no_moves_are_proposed_while_the_world_is_paused() {
    let mut world = World::new();
    start_round_with_enemy(&mut world);

    // Paused worlds emit no TimeAdvanced events, so the accumulator stays dry.
    let mut movement = Movement::new();
    let mut commands = Vec::new();
    movement.handle(&[], &query::enemy_view(&world), &mut commands);
    assert!(commands.is_empty());
}

#[test]
fn quantised_walk_matches_direct_path_math() {
    let mut world = World::new();
    start_round_with_enemy(&mut world);

    let mut movement = Movement::new();
    let tick_events = pump(&mut world, Command::Tick { dt: STEP_QUANTUM * 3 });

    let mut commands = Vec::new();
    movement.handle(&tick_events, &query::enemy_view(&world), &mut commands);

    let mut expected = vanguard_defence_core::path::SPAWN_POSITION;
    for _ in 0..3 {
        expected = vanguard_defence_core::path::advance(expected, 0.225);
    }
    match commands.as_slice() {
        [Command::MoveEnemy { to, .. }] => assert_eq!(*to, expected),
        other => panic!("expected one move, got {other:?}"),
    }
}

#[test]
fn breach_position_is_exact() {
    let mut world = World::new();
    start_round_with_enemy(&mut world);
    let view = query::enemy_view(&world);
    let enemy = view.iter().next().expect("enemy spawned").id;

    let _ = pump(
        &mut world,
        Command::MoveEnemy {
            enemy,
            to: Position::new(99.1, 51.0),
        },
    );
    assert!(query::enemy_view(&world).is_empty());
    assert_eq!(query::health(&world), 95);
}
