use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{non_negative, positive, within, ConfigError};
use crate::track::Track;

/// Game tuning parameters for both courses
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Rider
    pub const RIDER_HEIGHT: f32 = 0.5;
    pub const SPEED_READOUT_SCALE: f32 = 6.0;

    // Circuit track
    pub const CIRCUIT_RADIUS: f32 = 20.0;
    pub const CIRCUIT_WIDTH: f32 = 6.0;
    pub const CIRCUIT_INNER_MARGIN: f32 = 0.6;
    pub const CIRCUIT_OUTER_MARGIN: f32 = 0.4;
    pub const CIRCUIT_SPAWN_HEADING: f32 = std::f32::consts::FRAC_PI_2;

    // Circuit handling
    pub const MAX_SPEED: f32 = 18.0;
    pub const ACCELERATION: f32 = 28.0;
    pub const REVERSE_FACTOR: f32 = 0.6;
    pub const BRAKE_DECEL: f32 = 36.0;
    pub const TURN_SPEED: f32 = 2.6;
    pub const DRAG: f32 = 10.0;
    pub const REVERSE_CAP: f32 = -6.0;
    pub const BOOST_MULTIPLIER: f32 = 1.6;
    pub const BOOST_DURATION: f32 = 1.2;

    // Circuit props
    pub const PICKUP_COUNT: usize = 12;
    pub const OBSTACLE_COUNT: usize = 6;
    pub const PICKUP_RADIUS: f32 = 1.2;
    pub const PICKUP_POINTS: u32 = 15;
    pub const PICKUP_LANE_OFFSET: f32 = -0.5; // Relative to the racing line
    pub const PICKUP_HEIGHT: f32 = 0.45;
    pub const OBSTACLE_RADIUS: f32 = 1.4;
    pub const OBSTACLE_DAMPING: f32 = 0.6;
    pub const OBSTACLE_LANE_OFFSET: f32 = 1.2;
    pub const OBSTACLE_HEIGHT: f32 = 0.35;

    // Trail
    pub const TRAIL_HALF_WIDTH: f32 = 3.0;
    pub const TRAIL_HALF_LENGTH: f32 = 50.0;
    pub const TRAIL_CRUISE_SPEED: f32 = 2.4;
    pub const TRAIL_BRAKE_SPEED: f32 = 0.5;
    pub const TRAIL_TURN_SPEED: f32 = 2.2;
    pub const TRAIL_PICKUP_RADIUS: f32 = 0.9;
    pub const TRAIL_PICKUP_POINTS: u32 = 10;
    pub const TRAIL_PICKUP_MARGIN: f32 = 10.0; // Keep pickups off the trail ends
    pub const TRAIL_PICKUP_HEIGHT: f32 = 0.35;

    // Prop spin (rad/s)
    pub const CIRCUIT_PICKUP_SPIN: (f32, f32) = (1.6, 0.6);
    pub const TRAIL_PICKUP_SPIN: (f32, f32) = (1.0, 1.5);
    pub const OBSTACLE_SPIN: (f32, f32) = (0.3, 0.0);
}

/// Which of the two courses is being ridden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Course {
    Trail,
    #[default]
    Circuit,
}

impl Course {
    pub fn pickup_spin(self) -> (f32, f32) {
        match self {
            Course::Trail => Params::TRAIL_PICKUP_SPIN,
            Course::Circuit => Params::CIRCUIT_PICKUP_SPIN,
        }
    }
}

impl FromStr for Course {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trail" => Ok(Course::Trail),
            "circuit" => Ok(Course::Circuit),
            _ => Err(ConfigError::UnknownCourse(s.to_string())),
        }
    }
}

/// How throttle input turns into speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DriveModel {
    /// Velocity accumulates under throttle and bleeds off with drag
    Arcade,
    /// Fixed speed while a direction is held, slower while braking
    Cruise { speed: f32, brake_speed: f32 },
}

/// Handling constants for the rider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    pub max_speed: f32,
    pub acceleration: f32,
    pub reverse_factor: f32,
    pub brake_decel: f32,
    pub turn_speed: f32,
    pub drag: f32,
    pub reverse_cap: f32,
    pub boost_multiplier: f32,
    pub boost_duration: f32,
}

impl PhysicsParams {
    /// Top speed, raised while a boost is running
    pub fn effective_max_speed(&self, boosted: bool) -> f32 {
        if boosted {
            self.max_speed * self.boost_multiplier
        } else {
            self.max_speed
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_speed", self.max_speed)?;
        non_negative("acceleration", self.acceleration)?;
        within("reverse_factor", self.reverse_factor, f32::MIN_POSITIVE, 1.0)?;
        non_negative("brake_decel", self.brake_decel)?;
        non_negative("turn_speed", self.turn_speed)?;
        non_negative("drag", self.drag)?;
        within("reverse_cap", self.reverse_cap, f32::MIN, 0.0)?;
        // Exclusive lower bound of 1
        within("boost_multiplier", self.boost_multiplier, 1.0 + f32::EPSILON, f32::MAX)?;
        non_negative("boost_duration", self.boost_duration)?;
        Ok(())
    }
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            max_speed: Params::MAX_SPEED,
            acceleration: Params::ACCELERATION,
            reverse_factor: Params::REVERSE_FACTOR,
            brake_decel: Params::BRAKE_DECEL,
            turn_speed: Params::TURN_SPEED,
            drag: Params::DRAG,
            reverse_cap: Params::REVERSE_CAP,
            boost_multiplier: Params::BOOST_MULTIPLIER,
            boost_duration: Params::BOOST_DURATION,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub course: Course,
    pub drive: DriveModel,
    pub physics: PhysicsParams,
    pub track: Track,
    pub pickup_count: usize,
    pub obstacle_count: usize,
    pub pickup_radius: f32,
    pub pickup_points: u32,
    pub pickup_boost: bool,
    pub obstacle_radius: f32,
    pub obstacle_damping: f32,
    pub obstacle_cooldown: f32, // 0 = penalise every frame in range
    pub speed_readout_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self::circuit()
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ring track with accumulated velocity, boosts and obstacles
    pub fn circuit() -> Self {
        Self {
            course: Course::Circuit,
            drive: DriveModel::Arcade,
            physics: PhysicsParams::default(),
            track: Track::circuit(Params::CIRCUIT_RADIUS, Params::CIRCUIT_WIDTH),
            pickup_count: Params::PICKUP_COUNT,
            obstacle_count: Params::OBSTACLE_COUNT,
            pickup_radius: Params::PICKUP_RADIUS,
            pickup_points: Params::PICKUP_POINTS,
            pickup_boost: true,
            obstacle_radius: Params::OBSTACLE_RADIUS,
            obstacle_damping: Params::OBSTACLE_DAMPING,
            obstacle_cooldown: 0.0,
            speed_readout_scale: Params::SPEED_READOUT_SCALE,
        }
    }

    /// Straight path ridden at a fixed cruising speed
    pub fn trail() -> Self {
        Self {
            course: Course::Trail,
            drive: DriveModel::Cruise {
                speed: Params::TRAIL_CRUISE_SPEED,
                brake_speed: Params::TRAIL_BRAKE_SPEED,
            },
            physics: PhysicsParams {
                max_speed: Params::TRAIL_CRUISE_SPEED,
                turn_speed: Params::TRAIL_TURN_SPEED,
                reverse_cap: -Params::TRAIL_CRUISE_SPEED,
                ..PhysicsParams::default()
            },
            track: Track::trail(Params::TRAIL_HALF_WIDTH, Params::TRAIL_HALF_LENGTH),
            pickup_count: Params::PICKUP_COUNT,
            obstacle_count: 0,
            pickup_radius: Params::TRAIL_PICKUP_RADIUS,
            pickup_points: Params::TRAIL_PICKUP_POINTS,
            pickup_boost: false,
            obstacle_radius: Params::OBSTACLE_RADIUS,
            obstacle_damping: Params::OBSTACLE_DAMPING,
            obstacle_cooldown: 0.0,
            speed_readout_scale: Params::SPEED_READOUT_SCALE,
        }
    }

    pub fn for_course(course: Course) -> Self {
        match course {
            Course::Trail => Self::trail(),
            Course::Circuit => Self::circuit(),
        }
    }

    /// Load a config from JSON. Fields left out keep the values of the
    /// preset named by `course` (circuit when absent).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: Value = serde_json::from_str(json)?;
        let course = match overrides.get("course") {
            Some(value) => Course::deserialize(value)?,
            None => Course::default(),
        };

        let mut merged = serde_json::to_value(Self::for_course(course))?;
        merge_json(&mut merged, overrides);

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        if let DriveModel::Cruise { speed, brake_speed } = self.drive {
            positive("drive.speed", speed)?;
            non_negative("drive.brake_speed", brake_speed)?;
        }
        self.track.validate()?;
        non_negative("pickup_radius", self.pickup_radius)?;
        non_negative("obstacle_radius", self.obstacle_radius)?;
        within("obstacle_damping", self.obstacle_damping, 0.0, 1.0)?;
        non_negative("obstacle_cooldown", self.obstacle_cooldown)?;
        non_negative("speed_readout_scale", self.speed_readout_scale)?;
        Ok(())
    }

    /// Cosmetic speedometer value
    pub fn speed_readout(&self, velocity: f32) -> u32 {
        (velocity.abs() * self.speed_readout_scale).round() as u32
    }
}

/// Recursively overlay `patch` onto `base`, object by object
fn merge_json(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
