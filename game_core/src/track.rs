use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::Pose;
use crate::error::{non_negative, within, ConfigError};
use crate::params::Params;
use crate::resources::GameRng;

/// Ground the rider is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Track {
    /// Straight path: independent per-axis bounds on X and Z
    Band {
        x_min: f32,
        x_max: f32,
        z_min: f32,
        z_max: f32,
    },
    /// Circular track: radial distance from `center` kept in [inner, outer]
    Ring {
        center: Vec3,
        radius: f32, // Racing line, used for the layout
        inner: f32,
        outer: f32,
    },
}

impl Track {
    /// Trail centred on the origin, running along Z
    pub fn trail(half_width: f32, half_length: f32) -> Self {
        Track::Band {
            x_min: -half_width,
            x_max: half_width,
            z_min: -half_length,
            z_max: half_length,
        }
    }

    /// Ring of the given racing radius and asphalt width, minus a margin
    /// on each side so the bike stays off the kerb
    pub fn circuit(radius: f32, width: f32) -> Self {
        Track::Ring {
            center: Vec3::ZERO,
            radius,
            inner: radius - width / 2.0 + Params::CIRCUIT_INNER_MARGIN,
            outer: radius + width / 2.0 - Params::CIRCUIT_OUTER_MARGIN,
        }
    }

    /// Pull a position back onto the track. Height is left alone.
    pub fn confine(&self, pos: Vec3) -> Vec3 {
        match *self {
            Track::Band {
                x_min,
                x_max,
                z_min,
                z_max,
            } => Vec3::new(pos.x.clamp(x_min, x_max), pos.y, pos.z.clamp(z_min, z_max)),
            Track::Ring {
                center,
                inner,
                outer,
                ..
            } => {
                let dx = pos.x - center.x;
                let dz = pos.z - center.z;
                let distance = (dx * dx + dz * dz).sqrt();
                let clamped = distance.clamp(inner, outer);
                // Angle is taken before clamping so the rider only moves radially
                let angle = dz.atan2(dx);
                Vec3::new(
                    center.x + angle.cos() * clamped,
                    pos.y,
                    center.z + angle.sin() * clamped,
                )
            }
        }
    }

    /// Whether `pos` already satisfies the confinement (with tolerance)
    pub fn contains(&self, pos: Vec3, eps: f32) -> bool {
        match *self {
            Track::Band {
                x_min,
                x_max,
                z_min,
                z_max,
            } => {
                pos.x >= x_min - eps
                    && pos.x <= x_max + eps
                    && pos.z >= z_min - eps
                    && pos.z <= z_max + eps
            }
            Track::Ring {
                center,
                inner,
                outer,
                ..
            } => {
                let distance = Vec3::new(pos.x - center.x, 0.0, pos.z - center.z).length();
                distance >= inner - eps && distance <= outer + eps
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Track::Band {
                x_min,
                x_max,
                z_min,
                z_max,
            } => {
                spannable("x", x_min, x_max)?;
                spannable("z", z_min, z_max)
            }
            Track::Ring {
                radius,
                inner,
                outer,
                ..
            } => {
                non_negative("track.inner", inner)?;
                ordered("radius", inner, outer)?;
                within("track.radius", radius, inner, outer)
            }
        }
    }

    /// Where the bike starts. On the ring it sits on the racing line at
    /// angle 0, turned a quarter towards the infield.
    pub fn rider_spawn(&self) -> Pose {
        match *self {
            Track::Band {
                x_min,
                x_max,
                z_min,
                z_max,
            } => Pose::at(Vec3::new(
                (x_min + x_max) / 2.0,
                Params::RIDER_HEIGHT,
                (z_min + z_max) / 2.0,
            )),
            Track::Ring { center, radius, .. } => Pose::new(
                center + Vec3::new(radius, Params::RIDER_HEIGHT, 0.0),
                Params::CIRCUIT_SPAWN_HEADING,
            ),
        }
    }

    /// Pickup positions: scattered along the trail, evenly round the ring
    pub fn pickup_spots(&self, count: usize, rng: &mut GameRng) -> Vec<Vec3> {
        match *self {
            Track::Band {
                x_min,
                x_max,
                z_min,
                z_max,
            } => {
                let (z_lo, z_hi) = inset(z_min, z_max, Params::TRAIL_PICKUP_MARGIN);
                (0..count)
                    .map(|_| {
                        Vec3::new(
                            spread(rng, x_min, x_max),
                            Params::TRAIL_PICKUP_HEIGHT,
                            spread(rng, z_lo, z_hi),
                        )
                    })
                    .collect()
            }
            Track::Ring { center, radius, .. } => ring_spots(
                center,
                radius + Params::PICKUP_LANE_OFFSET,
                Params::PICKUP_HEIGHT,
                count,
                0.0,
            ),
        }
    }

    /// Obstacle positions: just outside the racing line, offset half a
    /// slot from the pickups on the ring; spaced down the middle of a trail
    pub fn obstacle_spots(&self, count: usize) -> Vec<Vec3> {
        match *self {
            Track::Band {
                x_min,
                x_max,
                z_min,
                z_max,
            } => {
                let x = (x_min + x_max) / 2.0;
                (0..count)
                    .map(|i| {
                        let t = (i as f32 + 1.0) / (count as f32 + 1.0);
                        Vec3::new(x, Params::OBSTACLE_HEIGHT, z_min + (z_max - z_min) * t)
                    })
                    .collect()
            }
            Track::Ring { center, radius, .. } => ring_spots(
                center,
                radius + Params::OBSTACLE_LANE_OFFSET,
                Params::OBSTACLE_HEIGHT,
                count,
                0.5,
            ),
        }
    }
}

fn ordered(axis: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedBounds { axis, min, max })
    }
}

/// Band axes are sampled uniformly, which needs a finite width
fn spannable(axis: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    ordered(axis, min, max)?;
    if (max - min).is_finite() {
        Ok(())
    } else {
        Err(ConfigError::UnboundedSpan { axis, min, max })
    }
}

fn inset(min: f32, max: f32, margin: f32) -> (f32, f32) {
    if max - min > 2.0 * margin {
        (min + margin, max - margin)
    } else {
        (min, max)
    }
}

fn spread(rng: &mut GameRng, min: f32, max: f32) -> f32 {
    if min < max {
        rng.0.gen_range(min..=max)
    } else {
        min
    }
}

fn ring_spots(center: Vec3, radius: f32, height: f32, count: usize, phase: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = (i as f32 + phase) / count as f32 * TAU;
            Vec3::new(
                center.x + angle.cos() * radius,
                height,
                center.z + angle.sin() * radius,
            )
        })
        .collect()
}
