//! Locomotion state record and mode transitions

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use strider_core::EntityId;

/// Exclusive locomotion mode of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LocomotionMode {
    /// Standing or walking on a surface
    #[default]
    Grounded,
    /// Airborne after a jump, until touchdown
    Jumping,
    /// Airborne without having jumped (walked off a ledge, spawned mid-air)
    Falling,
    /// Just touched down; moves like Grounded but refuses jumps until the
    /// landing lock expires
    Landing,
}

impl LocomotionMode {
    /// Airborne modes use the air planner and integrate gravity freely
    pub fn is_airborne(&self) -> bool {
        matches!(self, LocomotionMode::Jumping | LocomotionMode::Falling)
    }

    /// Outcome of the downward sweep / ground probe for this frame
    pub fn resolve_ground(self, ground: GroundResolution) -> LocomotionMode {
        match ground {
            GroundResolution::Landed | GroundResolution::LandedByProbe if self.is_airborne() => {
                LocomotionMode::Landing
            }
            GroundResolution::Landed | GroundResolution::LandedByProbe => self,
            GroundResolution::WallHit => self,
            GroundResolution::Airborne => match self {
                LocomotionMode::Jumping => LocomotionMode::Jumping,
                _ => LocomotionMode::Falling,
            },
        }
    }

    /// Mode after the landing lock runs out
    pub fn lock_expired(self) -> LocomotionMode {
        match self {
            LocomotionMode::Landing => LocomotionMode::Grounded,
            other => other,
        }
    }
}

/// Classification of the vertical sweep for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundResolution {
    /// Vertical sweep stopped on a walkable surface
    Landed,
    /// Vertical sweep was clear but the short probe below the base hit
    LandedByProbe,
    /// Vertical sweep stopped on something too steep to stand on
    WallHit,
    /// Nothing below within probe distance
    Airborne,
}

/// Payload delivered by the timer queue back to a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionTimer {
    LandingLockExpired(EntityId),
}

/// Per-character locomotion state, mutated once per frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionState {
    /// Last movement input, X forward / Y right; unit length or zero
    pub input_direction: Vec2,
    /// Horizontal speed magnitude, never negative
    pub horizontal_speed: f32,
    /// World-space direction of horizontal travel, unit length or zero
    pub move_direction: Vec3,
    /// Vertical speed, positive up
    pub fall_speed: f32,
    /// Current mode
    pub mode: LocomotionMode,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            input_direction: Vec2::ZERO,
            horizontal_speed: 0.0,
            move_direction: Vec3::ZERO,
            fall_speed: 0.0,
            mode: LocomotionMode::Grounded,
        }
    }
}

impl LocomotionState {
    /// Current horizontal velocity vector
    pub fn horizontal_velocity(&self) -> Vec3 {
        self.move_direction * self.horizontal_speed
    }
}
