use game_core::*;
use glam::Vec3;
use rand::{Rng, SeedableRng};

/// Circuit with the props removed so only the rider is in play
fn empty_circuit() -> GameState {
    let config = Config {
        pickup_count: 0,
        obstacle_count: 0,
        ..Config::circuit()
    };
    GameState::new(config, 1).unwrap()
}

fn throttle() -> Controls {
    Controls {
        accelerate: true,
        ..Controls::new()
    }
}

fn set_pose(state: &mut GameState, pose: Pose) {
    *state.world.get::<&mut Pose>(state.rider).unwrap() = pose;
}

fn set_velocity(state: &mut GameState, velocity: f32) {
    state.world.get::<&mut Rider>(state.rider).unwrap().velocity = velocity;
}

fn radial(pos: Vec3) -> f32 {
    Vec3::new(pos.x, 0.0, pos.z).length()
}

#[test]
fn test_coasting_only_slows_down() {
    for start in [15.0, -5.5, 0.3] {
        let mut state = empty_circuit();
        set_velocity(&mut state, start);

        let mut last = state.velocity();
        for dt in [0.0, 0.016, 0.033, 0.1, 0.25, 1.0, 5.0] {
            state.step(dt, Controls::new());
            let v = state.velocity();
            assert!(v.abs() <= last.abs(), "Speed grew while coasting");
            assert!(v == 0.0 || v.signum() == start.signum(), "Drag flipped direction");
            last = v;
        }
        assert_eq!(state.velocity(), 0.0);
    }
}

#[test]
fn test_accelerate_from_rest() {
    let mut state = empty_circuit();
    for _ in 0..50 {
        state.step(0.01, throttle());
    }
    assert!((state.velocity() - 14.0).abs() < 1e-3, "28 * 0.5s");

    for _ in 0..50 {
        state.step(0.01, throttle());
    }
    assert!((state.velocity() - Params::MAX_SPEED).abs() < 1e-6, "Capped at max speed");
}

#[test]
fn test_no_turning_at_rest() {
    let mut state = empty_circuit();
    let before = state.pose().heading;
    state.step(
        0.1,
        Controls {
            turn_left: true,
            ..Controls::new()
        },
    );
    assert_eq!(state.pose().heading, before);
}

#[test]
fn test_trail_turns_at_rest() {
    let config = Config {
        pickup_count: 0,
        ..Config::trail()
    };
    let mut state = GameState::new(config, 1).unwrap();
    state.step(
        0.5,
        Controls {
            turn_right: true,
            ..Controls::new()
        },
    );
    assert!((state.pose().heading + 1.1).abs() < 1e-5);
    assert_eq!(state.pose().pos, Vec3::new(0.0, Params::RIDER_HEIGHT, 0.0));
}

#[test]
fn test_inside_inner_edge_is_pushed_out() {
    let mut state = empty_circuit();
    let (inner, _) = match state.config.track {
        Track::Ring { inner, outer, .. } => (inner, outer),
        _ => unreachable!(),
    };
    let angle: f32 = 2.1;
    let r = inner - 1.0;
    set_pose(
        &mut state,
        Pose::new(Vec3::new(angle.cos() * r, 0.5, angle.sin() * r), 0.0),
    );

    state.step(0.016, Controls::new());

    let pos = state.pose().pos;
    assert!((radial(pos) - inner).abs() < 1e-4);
    assert!((pos.z.atan2(pos.x) - angle).abs() < 1e-5);
}

#[test]
fn test_pickup_scores_once_and_boosts() {
    let mut state = empty_circuit();
    let spawn = state.pose().pos;
    create_pickup(&mut state.world, spawn + Vec3::new(0.0, 0.0, 0.5), (0.0, 0.0));

    state.step(0.0, Controls::new());
    assert_eq!(state.score(), Params::PICKUP_POINTS);
    assert_eq!(state.boost.timer, Params::BOOST_DURATION);
    assert!(state.events().new_tip.is_some());

    state.step(0.0, Controls::new());
    state.step(0.0, Controls::new());
    assert_eq!(state.score(), Params::PICKUP_POINTS);
}

#[test]
fn test_boost_lets_rider_pass_max_speed_then_expires() {
    let mut state = empty_circuit();
    set_velocity(&mut state, Params::MAX_SPEED);
    let spawn = state.pose().pos;
    create_pickup(&mut state.world, spawn, (0.0, 0.0));
    state.step(0.0, Controls::new());
    assert!(state.boost_active());

    state.step(0.2, throttle());
    assert!(state.velocity() > Params::MAX_SPEED);

    for _ in 0..10 {
        state.step(0.2, throttle());
    }
    assert!(!state.boost_active());
    assert_eq!(state.velocity(), Params::MAX_SPEED);
}

#[test]
fn test_obstacle_penalises_on_consecutive_frames() {
    let mut state = empty_circuit();
    let spawn = state.pose().pos;
    create_obstacle(&mut state.world, spawn + Vec3::new(0.0, -0.15, 0.4));
    set_velocity(&mut state, 10.0);

    state.step(0.0, Controls::new());
    assert!((state.velocity() - 6.0).abs() < 1e-5);
    state.step(0.0, Controls::new());
    assert!((state.velocity() - 3.6).abs() < 1e-5);
    assert_eq!(state.events().obstacle_hits, 1);
}

#[test]
fn test_light_obstacle_hit_during_boost_drops_to_base_cap() {
    let config = Config::from_json(
        r#"{ "obstacle_damping": 0.9, "pickup_count": 0, "obstacle_count": 0 }"#,
    )
    .unwrap();
    let mut state = GameState::new(config, 1).unwrap();
    let spawn = state.pose().pos;
    create_obstacle(&mut state.world, spawn + Vec3::new(0.0, -0.15, 0.4));
    set_velocity(&mut state, 28.0);
    state.boost.start(Params::BOOST_DURATION);

    state.step(0.0, Controls::new());

    assert!(!state.boost_active());
    assert_eq!(state.velocity(), Params::MAX_SPEED);
}

#[test]
fn test_full_circuit_collects_pickups() {
    let mut state = GameState::new(Config::circuit(), 3).unwrap();

    // The first pickup sits beside the start line
    state.step(0.016, Controls::new());
    assert_eq!(state.score(), Params::PICKUP_POINTS);
    assert_eq!(state.pickups().iter().filter(|p| !p.visible).count(), 1);
}

#[test]
fn test_trail_end_is_a_wall() {
    let config = Config {
        pickup_count: 0,
        ..Config::trail()
    };
    let mut state = GameState::new(config, 1).unwrap();
    for _ in 0..100 {
        state.step(0.5, throttle());
    }
    let pos = state.pose().pos;
    assert_eq!(pos.z, -Params::TRAIL_HALF_LENGTH);
    assert!(pos.x.abs() < 1e-6);
    assert_eq!(state.speed_readout(), 14, "2.4 * 6 rounds to 14");
}

#[test]
fn test_random_rides_hold_invariants() {
    let mut input_rng = rand::rngs::StdRng::seed_from_u64(2024);

    for seed in 0..4 {
        let mut state = GameState::new(Config::circuit(), seed).unwrap();
        let physics = state.config.physics;
        let track = state.config.track;
        let mut collected = vec![false; state.pickups().len()];
        let mut last_score = 0;

        for _ in 0..1500 {
            let controls = Controls {
                accelerate: input_rng.gen_bool(0.6),
                reverse: input_rng.gen_bool(0.2),
                brake: input_rng.gen_bool(0.1),
                turn_left: input_rng.gen_bool(0.3),
                turn_right: input_rng.gen_bool(0.3),
            };
            let dt = input_rng.gen_range(0.0..0.12);
            state.step(dt, controls);

            let v = state.velocity();
            let cap = physics.effective_max_speed(state.boost_active());
            assert!(
                v >= physics.reverse_cap && v <= cap + 1e-4,
                "velocity {v} escaped [{}, {cap}]",
                physics.reverse_cap
            );
            assert!(state.boost.timer >= 0.0);
            assert_eq!(cap > physics.max_speed, state.boost.timer > 0.0);
            assert!(track.contains(state.pose().pos, 1e-3), "Rider left the ring");

            for (seen, pickup) in collected.iter_mut().zip(state.pickups()) {
                assert!(!(*seen && pickup.visible), "Pickup came back");
                *seen |= !pickup.visible;
            }
            assert!(state.score() >= last_score);
            last_score = state.score();
        }

        let gone = collected.iter().filter(|c| **c).count() as u32;
        assert_eq!(state.score(), gone * Params::PICKUP_POINTS);
    }
}
