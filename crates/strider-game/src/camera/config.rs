//! Camera configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Spring-arm camera configuration (centimetres)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the pivot to the camera when nothing is in the way
    pub arm_length: f32,
    /// Offset of the arm pivot from the character centre
    pub pivot_offset: Vec3,
    /// Clearance kept between the camera and blocking geometry
    pub collision_radius: f32,
    /// Shorten the arm when world geometry sits between pivot and camera
    pub probe_collision: bool,
    /// Closest the camera may be pulled in
    pub min_arm_length: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            arm_length: 300.0,
            pivot_offset: Vec3::ZERO,
            collision_radius: 12.0,
            probe_collision: true,
            min_arm_length: 20.0,
        }
    }
}
