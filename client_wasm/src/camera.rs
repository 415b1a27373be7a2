//! Chase camera that trails the bike

use game_core::{Course, Pose};
use glam::{Mat4, Quat, Vec3};

/// Camera that sits behind and above the rider
#[derive(Debug, Clone, Copy)]
pub struct FollowCamera {
    pub offset: Vec3, // In rider space, +Z is behind
}

impl FollowCamera {
    pub fn new(offset: Vec3) -> Self {
        Self { offset }
    }

    pub fn for_course(course: Course) -> Self {
        match course {
            Course::Trail => Self::new(Vec3::new(0.0, 5.0, 10.0)),
            Course::Circuit => Self::new(Vec3::new(0.0, 6.0, 14.0)),
        }
    }

    /// Eye position: offset rotated by the rider's heading
    pub fn eye(&self, pose: &Pose) -> Vec3 {
        pose.pos + Quat::from_rotation_y(pose.heading) * self.offset
    }

    /// View matrix looking at the rider
    pub fn view(&self, pose: &Pose) -> Mat4 {
        Mat4::look_at_rh(self.eye(pose), pose.pos, Vec3::Y)
    }
}
