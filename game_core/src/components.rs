use glam::{Quat, Vec3};

/// World-space position and yaw of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub pos: Vec3,
    pub heading: f32, // Yaw about +Y in radians
}

impl Pose {
    pub fn new(pos: Vec3, heading: f32) -> Self {
        Self { pos, heading }
    }

    pub fn at(pos: Vec3) -> Self {
        Self::new(pos, 0.0)
    }

    /// Local forward axis (-Z) rotated by the current heading
    pub fn forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.heading) * Vec3::NEG_Z
    }
}

/// The bicycle: scalar speed along its forward axis
#[derive(Debug, Clone, Copy, Default)]
pub struct Rider {
    pub velocity: f32, // Negative while reversing
}

impl Rider {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Collectible recyclable, consumed once
#[derive(Debug, Clone, Copy)]
pub struct Pickup {
    pub visible: bool,
}

impl Pickup {
    pub fn new() -> Self {
        Self { visible: true }
    }

    /// Mark as consumed. Returns false if it was already gone.
    pub fn collect(&mut self) -> bool {
        let was_visible = self.visible;
        self.visible = false;
        was_visible
    }
}

impl Default for Pickup {
    fn default() -> Self {
        Self::new()
    }
}

/// Persistent hazard that slows the rider down
#[derive(Debug, Clone, Copy, Default)]
pub struct Obstacle {
    pub cooldown: f32, // Seconds until it can penalise again
}

impl Obstacle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }
}

/// Cosmetic idle rotation for props
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin {
    pub y: f32,
    pub z: f32,
    pub rate_y: f32,
    pub rate_z: f32,
}

impl Spin {
    pub fn new(rate_y: f32, rate_z: f32) -> Self {
        Self {
            y: 0.0,
            z: 0.0,
            rate_y,
            rate_z,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.y = (self.y + self.rate_y * dt) % std::f32::consts::TAU;
        self.z = (self.z + self.rate_z * dt) % std::f32::consts::TAU;
    }
}
