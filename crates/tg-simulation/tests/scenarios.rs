use std::f32::consts::E;

use tg_core::{
    ArriveSteering, Behaviour, BehaviourMode, BoundaryAvoidance, DampingMode, EntityId,
    FleeFromPlayer, Kinematics, MovementLimits, Need, Needs, PassiveResourceProvider,
    PlayerControl, Position, ResourceKind, SteeringCommand, SteeringTag, Vec2, WanderSteering,
    World,
};
use tg_simulation::{
    BehaviorSelector, Integrator, NeedsSystem, PlayerControlSystem, ProvisionSystem, SimConfig,
    SimError, SimEventKind, Simulation, SteeringSystem,
};

const DT: f32 = 0.05;

/// A creature with the full set of steering components.
fn creature(world: &mut World, at: Vec2, needs: Vec<Need>) -> EntityId {
    world
        .spawn()
        .with(Position::from(at))
        .with(Kinematics::facing(0.0))
        .with(MovementLimits {
            max_speed: 110.0,
            ..MovementLimits::default()
        })
        .with(Behaviour::wander())
        .with(WanderSteering::default())
        .with(ArriveSteering::default())
        .with(BoundaryAvoidance::default())
        .with(Needs::new(needs))
        .id()
}

fn provider(world: &mut World, at: Vec2, kind: ResourceKind, radius: f32, rate: f32) -> EntityId {
    world
        .spawn()
        .with(Position::from(at))
        .with(PassiveResourceProvider::single(kind, radius, rate))
        .id()
}

fn food_of(sim: &Simulation, id: EntityId) -> f32 {
    sim.world()
        .get::<Needs>(id)
        .and_then(|n| n.get(&ResourceKind::Food))
        .map(|n| n.value)
        .unwrap()
}

fn mode_of(sim: &Simulation, id: EntityId) -> BehaviourMode {
    sim.world().get::<Behaviour>(id).unwrap().mode()
}

fn position_of(sim: &Simulation, id: EntityId) -> Vec2 {
    sim.world().position_of(id).unwrap()
}

#[test]
fn hungry_creature_seeks_eats_and_goes_back_to_wandering() {
    let mut world = World::new();
    let food = provider(&mut world, Vec2::new(530.0, 500.0), ResourceKind::Food, 50.0, 40.0);
    let id = creature(
        &mut world,
        Vec2::new(500.0, 500.0),
        vec![Need::new(ResourceKind::Food, 10.0, 100.0)],
    );
    let mut sim = Simulation::new(world, SimConfig::default()).with_default_systems();

    sim.tick(DT).unwrap();
    assert_eq!(
        sim.world().get::<Behaviour>(id),
        Some(&Behaviour::Seek {
            target: food,
            seeking_need: ResourceKind::Food
        })
    );

    sim.run(59, DT).unwrap();
    assert_eq!(food_of(&sim, id), 100.0);
    assert_eq!(mode_of(&sim, id), BehaviourMode::Wander);
    assert!(sim
        .events()
        .events()
        .iter()
        .any(|e| matches!(e.kind, SimEventKind::SeekEnded { entity, .. } if entity == id)));
}

#[test]
fn seek_does_not_flap_between_thresholds() {
    let mut world = World::new();
    provider(&mut world, Vec2::new(600.0, 500.0), ResourceKind::Food, 20.0, 10.0);
    let id = creature(
        &mut world,
        Vec2::new(500.0, 500.0),
        vec![Need::new(ResourceKind::Food, 29.0, 100.0)],
    );
    let mut sim = Simulation::new(world, SimConfig::default()).with_default_systems();

    sim.tick(DT).unwrap();
    assert_eq!(mode_of(&sim, id), BehaviourMode::Seek);

    let mut exited_at = None;
    for _ in 0..400 {
        sim.tick(DT).unwrap();
        let value = food_of(&sim, id);
        if mode_of(&sim, id) != BehaviourMode::Seek {
            exited_at = Some(value);
            break;
        }
        assert!(value < 90.0, "still seeking at {value}");
    }
    let exit_value = exited_at.expect("creature never finished eating");
    assert!(exit_value >= 90.0);

    let starts = sim
        .events()
        .events()
        .iter()
        .filter(|e| matches!(e.kind, SimEventKind::SeekStarted { .. }))
        .count();
    assert_eq!(starts, 1);
}

#[test]
fn arrive_settles_within_target_radius() {
    let mut world = World::new();
    let target = world.spawn().with(Position::new(700.0, 560.0)).id();
    let id = world
        .spawn()
        .with(Position::new(500.0, 500.0))
        .with(Kinematics::facing(2.0))
        .with(MovementLimits {
            max_speed: 110.0,
            ..MovementLimits::default()
        })
        .with(ArriveSteering::default())
        .with(Behaviour::Seek {
            target,
            seeking_need: ResourceKind::Water,
        })
        .id();
    let mut sim = Simulation::new(world, SimConfig::default()).with_default_systems();

    let dt = 1.0 / 60.0;
    sim.run(600, dt).unwrap();
    for _ in 0..60 {
        sim.tick(dt).unwrap();
        let distance = position_of(&sim, id).distance(Vec2::new(700.0, 560.0));
        assert!(distance < ArriveSteering::default().target_radius, "{distance}");
    }
}

#[test]
fn boundary_avoidance_pushes_inward() {
    let mut world = World::new();
    let id = creature(&mut world, Vec2::new(15.0, 500.0), Vec::new());
    world
        .insert(id, Kinematics::moving(Vec2::new(-60.0, 5.0)))
        .unwrap();
    let mut sim = Simulation::new(world, SimConfig::default()).with_default_systems();

    sim.tick(1.0 / 60.0).unwrap();
    let cmd = sim.world().get::<SteeringCommand>(id).unwrap();
    assert!(cmd.has_contribution(SteeringTag::Avoidance));
    assert!(cmd.linear.dot(Vec2::X) > 0.0);
}

#[test]
fn wanderers_stay_inside_the_world() {
    let mut world = World::new();
    let ids: Vec<EntityId> = (0..8)
        .map(|i| {
            let at = Vec2::new(60.0 + i as f32 * 120.0, 40.0 + i as f32 * 115.0);
            creature(&mut world, at, Vec::new())
        })
        .collect();
    let mut sim = Simulation::new(world, SimConfig::default().with_seed(7)).with_default_systems();

    for _ in 0..1200 {
        sim.tick(1.0 / 60.0).unwrap();
        for &id in &ids {
            let p = position_of(&sim, id);
            assert!((-20.0..=1020.0).contains(&p.x) && (-20.0..=1020.0).contains(&p.y), "{p}");
        }
    }
}

#[test]
fn bounds_hold_every_tick() {
    let mut world = World::new();
    let ids: Vec<EntityId> = (0..6)
        .map(|i| {
            creature(
                &mut world,
                Vec2::new(100.0 + i as f32 * 150.0, 500.0),
                vec![
                    Need::new(ResourceKind::Food, 80.0, 100.0).with_loss_per_second(15.0),
                    Need::new(ResourceKind::Water, 60.0, 100.0).with_loss_per_second(9.0),
                ],
            )
        })
        .collect();
    provider(&mut world, Vec2::new(300.0, 300.0), ResourceKind::Food, 40.0, 60.0);
    provider(&mut world, Vec2::new(700.0, 700.0), ResourceKind::Water, 40.0, 60.0);
    let mut sim = Simulation::new(world, SimConfig::default()).with_default_systems();

    let wander = WanderSteering::default();
    for _ in 0..600 {
        sim.tick(1.0 / 30.0).unwrap();
        for &id in &ids {
            let world = sim.world();
            let limits = world.limits_or_default(id);
            if let Some(Behaviour::Wander { wander_angle }) = world.get::<Behaviour>(id) {
                assert!(wander_angle.abs() <= wander.max_arc + 1e-5);
            }
            for need in world.get::<Needs>(id).unwrap().iter() {
                assert!(need.value >= need.min && need.value <= need.max);
            }
            let cmd = world.get::<SteeringCommand>(id).unwrap();
            assert!(cmd.linear.length() <= limits.max_acceleration + 1e-2);
            assert!(cmd.angular.abs() <= limits.max_angular_acceleration + 1e-4);
            assert!(world.get::<Kinematics>(id).unwrap().speed() <= limits.max_speed + 1e-3);
        }
    }
}

#[test]
fn hybrid_coasting_decays_to_one_over_e() {
    let mut world = World::new();
    let id = world
        .spawn()
        .with(Position::new(100.0, 500.0))
        .with(Kinematics::moving(Vec2::new(50.0, 0.0)))
        .with(MovementLimits::default())
        .id();
    let mut sim = Simulation::new(world, SimConfig::default()).with_default_systems();

    let damping = MovementLimits::default().linear_damping;
    sim.run(100, 1.0 / damping / 100.0).unwrap();
    let speed = sim.world().get::<Kinematics>(id).unwrap().speed();
    assert!((speed - 50.0 / E).abs() < 0.05, "{speed}");
}

#[test]
fn friction_coasting_follows_exponential() {
    let mut world = World::new();
    let limits = MovementLimits {
        damping_mode: DampingMode::Friction,
        linear_damping: 1.5,
        ..MovementLimits::default()
    };
    let id = world
        .spawn()
        .with(Position::new(100.0, 500.0))
        .with(Kinematics::moving(Vec2::new(0.0, 90.0)))
        .with(limits)
        .id();
    let mut sim = Simulation::new(world, SimConfig::default()).with_default_systems();

    let dt = 0.02;
    for n in 1..=50 {
        sim.tick(dt).unwrap();
        let speed = sim.world().get::<Kinematics>(id).unwrap().speed();
        let expected = 90.0 * (-1.5 * dt * n as f32).exp();
        assert!((speed - expected).abs() < 1e-2, "tick {n}: {speed} vs {expected}");
    }
}

#[test]
fn removed_target_is_replaced_or_abandoned() {
    let mut world = World::new();
    let near = provider(&mut world, Vec2::new(560.0, 500.0), ResourceKind::Food, 10.0, 40.0);
    let far = provider(&mut world, Vec2::new(200.0, 500.0), ResourceKind::Food, 10.0, 40.0);
    let id = creature(
        &mut world,
        Vec2::new(500.0, 500.0),
        vec![Need::new(ResourceKind::Food, 5.0, 100.0)],
    );
    let mut sim = Simulation::new(world, SimConfig::default()).with_default_systems();

    sim.tick(DT).unwrap();
    assert_eq!(sim.world().get::<Behaviour>(id).unwrap().target(), Some(near));

    sim.world_mut().despawn(near).unwrap();
    sim.tick(DT).unwrap();
    assert_eq!(sim.world().get::<Behaviour>(id).unwrap().target(), Some(far));

    sim.world_mut().despawn(far).unwrap();
    sim.tick(DT).unwrap();
    assert_eq!(mode_of(&sim, id), BehaviourMode::Wander);
    assert!(sim
        .events()
        .events()
        .iter()
        .any(|e| matches!(e.kind, SimEventKind::TargetLost { target, .. } if target == far)));
}

#[test]
fn player_input_owns_the_command_slot() {
    let mut world = World::new();
    let player = world
        .spawn()
        .with(Position::new(500.0, 500.0))
        .with(Kinematics::default())
        .with(MovementLimits::default())
        .with(BoundaryAvoidance::default())
        .with(PlayerControl {
            move_up: true,
            ..PlayerControl::default()
        })
        .id();
    let critter = world
        .spawn()
        .with(Position::new(500.0, 540.0))
        .with(Kinematics::default())
        .with(FleeFromPlayer::default())
        .id();
    let mut sim = Simulation::new(world, SimConfig::default()).with_default_systems();

    sim.run(10, 1.0 / 60.0).unwrap();

    let cmd = sim.world().get::<SteeringCommand>(player).unwrap();
    assert_eq!(cmd.contributions.len(), 1);
    assert!(cmd.has_contribution(SteeringTag::Player));
    assert!(position_of(&sim, player).y < 500.0);

    assert!(sim
        .world()
        .get::<SteeringCommand>(critter)
        .unwrap()
        .has_contribution(SteeringTag::Flee));
    assert!(position_of(&sim, critter).y > 540.0);
}

#[test]
fn registration_order_does_not_change_tick_order() {
    let build = |reversed: bool| {
        let mut world = World::new();
        provider(&mut world, Vec2::new(300.0, 300.0), ResourceKind::Food, 40.0, 30.0);
        for i in 0..4 {
            creature(
                &mut world,
                Vec2::new(200.0 + i as f32 * 150.0, 400.0),
                vec![Need::new(ResourceKind::Food, 40.0, 100.0).with_loss_per_second(5.0)],
            );
        }
        let mut sim = Simulation::new(world, SimConfig::default().with_seed(11));
        if reversed {
            sim.add_system(Integrator::new());
            sim.add_system(PlayerControlSystem::new());
            sim.add_system(SteeringSystem::new());
            sim.add_system(BehaviorSelector::new());
            sim.add_system(ProvisionSystem::new());
            sim.add_system(NeedsSystem::new());
        } else {
            sim = sim.with_default_systems();
        }
        sim.run(300, 1.0 / 30.0).unwrap();
        sim.world()
            .iter::<Position>()
            .map(|(_, p)| *p)
            .collect::<Vec<_>>()
    };
    assert_eq!(build(false), build(true));
}

#[test]
fn same_seed_replays_identically() {
    let replay = || {
        let mut world = World::new();
        provider(&mut world, Vec2::new(500.0, 200.0), ResourceKind::Water, 40.0, 30.0);
        for i in 0..5 {
            creature(
                &mut world,
                Vec2::new(150.0 * i as f32 + 100.0, 600.0),
                vec![Need::new(ResourceKind::Water, 50.0, 100.0).with_loss_per_second(4.0)],
            );
        }
        let mut sim =
            Simulation::new(world, SimConfig::default().with_seed(2024)).with_default_systems();
        sim.run(400, 1.0 / 30.0).unwrap();
        let events: Vec<String> = sim
            .events()
            .events()
            .iter()
            .map(|e| format!("{}:{}", e.tick, e.description))
            .collect();
        let positions: Vec<Position> = sim.world().iter::<Position>().map(|(_, p)| *p).collect();
        (events, positions)
    };
    assert_eq!(replay(), replay());
}

#[test]
fn invalid_time_step_leaves_state_untouched() {
    let mut world = World::new();
    let id = creature(&mut world, Vec2::new(500.0, 500.0), Vec::new());
    let mut sim = Simulation::new(world, SimConfig::default()).with_default_systems();
    let before = position_of(&sim, id);

    assert!(matches!(sim.tick(-1.0), Err(SimError::InvalidTimeStep(_))));
    assert!(matches!(sim.tick(f32::NAN), Err(SimError::InvalidTimeStep(_))));
    assert_eq!(position_of(&sim, id), before);
    assert_eq!(sim.current_tick(), 0);
}

#[test]
fn config_loaded_from_json_drives_the_run() {
    let config = SimConfig::from_json_str(
        r#"{
            "seed": 5,
            "world_size": [400.0, 300.0],
            "aggregator": { "policy": { "kind": "priority_dominant", "floor": 100 } }
        }"#,
    )
    .unwrap();
    let mut world = World::new();
    let id = creature(&mut world, Vec2::new(390.0, 150.0), Vec::new());
    world
        .insert(id, Kinematics::moving(Vec2::new(80.0, 0.0)))
        .unwrap();
    let mut sim = Simulation::new(world, config).with_default_systems();

    sim.tick(1.0 / 60.0).unwrap();
    let cmd = sim.world().get::<SteeringCommand>(id).unwrap();
    // Priority-dominant: the avoidance push wins outright, clamped to max acceleration.
    assert!(cmd.linear.x < 0.0);
    assert!((cmd.linear.length() - MovementLimits::default().max_acceleration).abs() < 1e-2);
}
