//! Spring-arm camera that mirrors the control rotation

use glam::Vec3;
use rapier3d::prelude::QueryFilter;
use strider_core::Rotator;
use strider_physics::PhysicsWorld;

use super::CameraConfig;

/// Third-person camera rig
pub struct CameraRig {
    /// Configuration
    pub config: CameraConfig,
    /// World rotation of the arm (copied from the control rotation)
    rotation: Rotator,
    /// Arm pivot in world space
    pivot: Vec3,
    /// Camera world position (computed each sync)
    position: Vec3,
}

impl CameraRig {
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default())
    }

    pub fn with_config(config: CameraConfig) -> Self {
        Self {
            config,
            rotation: Rotator::ZERO,
            pivot: Vec3::ZERO,
            position: Vec3::ZERO,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Follow the character: rotate the arm to `control_rotation` and place the
    /// camera behind `character_position`.
    ///
    /// With `physics`, the arm is shortened if geometry (other than the
    /// filtered-out character) blocks the line from pivot to camera.
    pub fn sync(
        &mut self,
        character_position: Vec3,
        control_rotation: Rotator,
        physics: Option<(&PhysicsWorld, QueryFilter)>,
    ) {
        self.rotation = control_rotation;
        self.pivot = character_position + self.config.pivot_offset;

        let back = self.rotation.to_quat() * Vec3::NEG_X;
        let mut length = self.config.arm_length;

        if self.config.probe_collision {
            if let Some((physics, filter)) = physics {
                let probe_length = self.config.arm_length + self.config.collision_radius;
                if let Some((_handle, toi)) = physics.raycast(self.pivot, back, probe_length, filter) {
                    length = (toi - self.config.collision_radius).max(self.config.min_arm_length);
                }
            }
        }

        self.position = self.pivot + back * length;
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}
