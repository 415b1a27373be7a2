pub mod components;
pub mod error;
pub mod params;
pub mod resources;
pub mod state;
pub mod systems;
pub mod track;

pub use components::*;
pub use error::*;
pub use params::*;
pub use resources::*;
pub use state::*;
pub use track::*;

use hecs::World;
use systems::*;

/// Advance the ride by one rendered frame.
///
/// `time.dt` is used as-is: long pauses are not clamped or sub-stepped.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    config: &Config,
    controls: &Controls,
    boost: &mut Boost,
    score: &mut Score,
    events: &mut Events,
    tips: &mut Tips,
    rng: &mut GameRng,
) {
    // Clear events at start of frame
    events.clear();

    // 1. Count down the boost before the speed cap is read
    boost.update(time.dt);

    // 2. Throttle, steering, translation and track confinement
    move_riders(world, time, controls, config, boost.is_active());

    // 3. Cosmetic prop rotation
    spin_props(world, time);

    // 4. Pickups (score, boost, tips)
    collect_pickups(world, config, score, boost, tips, events, rng);

    // 5. Obstacles (velocity penalty)
    check_obstacles(world, time, config, boost, events);

    time.now += time.dt;
}

/// Helper to create the bicycle entity
pub fn create_rider(world: &mut World, pose: Pose) -> hecs::Entity {
    world.spawn((pose, Rider::new()))
}

/// Helper to create a pickup entity
pub fn create_pickup(world: &mut World, pos: glam::Vec3, spin: (f32, f32)) -> hecs::Entity {
    world.spawn((Pose::at(pos), Pickup::new(), Spin::new(spin.0, spin.1)))
}

/// Helper to create an obstacle entity
pub fn create_obstacle(world: &mut World, pos: glam::Vec3) -> hecs::Entity {
    let (rate_y, rate_z) = Params::OBSTACLE_SPIN;
    world.spawn((Pose::at(pos), Obstacle::new(), Spin::new(rate_y, rate_z)))
}
