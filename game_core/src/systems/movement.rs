use crate::{Config, Controls, DriveModel, PhysicsParams, Pose, Rider, Time, Track};
use hecs::World;

/// Apply throttle, steering and translation to every rider, then pull
/// them back onto the track
pub fn move_riders(
    world: &mut World,
    time: &Time,
    controls: &Controls,
    config: &Config,
    boosted: bool,
) {
    for (_entity, (pose, rider)) in world.query_mut::<(&mut Pose, &mut Rider)>() {
        rider.velocity = update_velocity(rider.velocity, time.dt, controls, config, boosted);

        // Heading first: this frame's turn changes this frame's direction
        pose.heading += turn_amount(rider.velocity, time.dt, config) * controls.steer();
        pose.pos += pose.forward() * rider.velocity * time.dt;

        confine(pose, &config.track);
    }
}

/// Keep a pose inside the track bounds
pub fn confine(pose: &mut Pose, track: &Track) {
    pose.pos = track.confine(pose.pos);
}

/// New forward velocity after one frame of input
pub fn update_velocity(
    velocity: f32,
    dt: f32,
    controls: &Controls,
    config: &Config,
    boosted: bool,
) -> f32 {
    let physics = &config.physics;
    let velocity = match config.drive {
        DriveModel::Arcade => arcade_velocity(velocity, dt, controls, physics),
        DriveModel::Cruise { speed, brake_speed } => {
            let speed = if controls.brake { brake_speed } else { speed };
            speed * (controls.accelerate as i8 - controls.reverse as i8) as f32
        }
    };
    velocity.clamp(physics.reverse_cap, physics.effective_max_speed(boosted))
}

fn arcade_velocity(
    mut velocity: f32,
    dt: f32,
    controls: &Controls,
    physics: &PhysicsParams,
) -> f32 {
    if controls.accelerate {
        velocity += physics.acceleration * dt;
    } else if controls.reverse {
        velocity -= physics.acceleration * dt * physics.reverse_factor;
    } else {
        velocity = apply_drag(velocity, physics.drag * dt);
    }

    // Stacks with throttle in the same frame
    if controls.brake {
        velocity -= sign(velocity) * physics.brake_decel * dt;
    }
    velocity
}

/// Bleed `amount` off the magnitude without crossing zero
fn apply_drag(velocity: f32, amount: f32) -> f32 {
    if amount >= velocity.abs() {
        0.0
    } else {
        velocity - sign(velocity) * amount
    }
}

/// Heading change for one frame of full steering input
pub fn turn_amount(velocity: f32, dt: f32, config: &Config) -> f32 {
    let physics = &config.physics;
    match config.drive {
        // Weaker at low speed, inverted in reverse
        DriveModel::Arcade => physics.turn_speed * dt * (velocity / physics.max_speed),
        DriveModel::Cruise { .. } => physics.turn_speed * dt,
    }
}

/// Like `f32::signum`, but zero stays zero
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
