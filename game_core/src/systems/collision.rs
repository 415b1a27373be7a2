use glam::Vec3;
use hecs::{Entity, World};

use crate::{Boost, Config, Events, Obstacle, Pose, Rider, Time};

/// Slow down riders that touch an obstacle and cancel their boost.
///
/// With the default `obstacle_cooldown` of zero the penalty repeats on
/// every frame the rider stays in range. A damped rider is held to the
/// unboosted top speed, since the hit ends the boost.
pub fn check_obstacles(
    world: &mut World,
    time: &Time,
    config: &Config,
    boost: &mut Boost,
    events: &mut Events,
) {
    let mut riders: Vec<(Entity, Vec3, u32)> = world
        .query::<(&Pose, &Rider)>()
        .iter()
        .map(|(e, (pose, _))| (e, pose.pos, 0))
        .collect();

    for (_entity, (pose, obstacle)) in world.query_mut::<(&Pose, &mut Obstacle)>() {
        obstacle.tick(time.dt);
        if !obstacle.is_ready() {
            continue;
        }

        let mut hit = false;
        for (_, rider_pos, hits) in riders.iter_mut() {
            if rider_pos.distance(pose.pos) < config.obstacle_radius {
                *hits += 1;
                hit = true;
            }
        }
        if hit {
            obstacle.cooldown = config.obstacle_cooldown;
        }
    }

    for (entity, _, hits) in riders {
        if hits == 0 {
            continue;
        }
        if let Ok(mut rider) = world.get::<&mut Rider>(entity) {
            let physics = &config.physics;
            rider.velocity = (rider.velocity * config.obstacle_damping.powi(hits as i32))
                .clamp(physics.reverse_cap, physics.effective_max_speed(false));
            tracing::debug!(velocity = rider.velocity, hits, "obstacle hit");
        }
        boost.cancel();
        events.obstacle_hits += hits;
    }
}
