//! Core types used throughout Strider

use std::fmt;
use std::ops::{Add, Mul, Sub};

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::math::{safe_normal, KINDA_SMALL_NUMBER};

/// Unique identifier for a simulated character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wrap an angle in degrees into (-180, 180]
///
/// Angles already inside the range are returned untouched so that
/// normalizing twice never drifts.
pub fn normalize_axis(angle: f32) -> f32 {
    if angle > -180.0 && angle <= 180.0 {
        return angle;
    }
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Orientation as pitch/yaw/roll in degrees.
///
/// Axes follow a Z-up world: yaw turns around Z (X towards Y), positive
/// pitch tilts the forward axis up, roll spins around forward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator::new(0.0, 0.0, 0.0);

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Rotator carrying only a yaw component
    pub const fn from_yaw(yaw: f32) -> Self {
        Self::new(0.0, yaw, 0.0)
    }

    /// Build the rotation whose forward axis points along `direction` (roll = 0)
    pub fn from_direction(direction: Vec3) -> Self {
        let yaw = direction.y.atan2(direction.x).to_degrees();
        let pitch = direction
            .z
            .atan2((direction.x * direction.x + direction.y * direction.y).sqrt())
            .to_degrees();
        Self::new(pitch, yaw, 0.0)
    }

    /// Wrap every axis into (-180, 180]
    pub fn normalized(self) -> Self {
        Self::new(
            normalize_axis(self.pitch),
            normalize_axis(self.yaw),
            normalize_axis(self.roll),
        )
    }

    /// Clamp each axis independently to `[-bounds, +bounds]`
    pub fn clamp_axes(self, bounds: Rotator) -> Self {
        Self::new(
            self.pitch.clamp(-bounds.pitch, bounds.pitch),
            self.yaw.clamp(-bounds.yaw, bounds.yaw),
            self.roll.clamp(-bounds.roll, bounds.roll),
        )
    }

    /// Whether every axis is within `tolerance` of zero
    pub fn is_nearly_zero(&self, tolerance: f32) -> bool {
        self.pitch.abs() <= tolerance && self.yaw.abs() <= tolerance && self.roll.abs() <= tolerance
    }

    /// Drop pitch and roll, keeping the heading only
    pub fn yaw_only(self) -> Self {
        Self::from_yaw(self.yaw)
    }

    /// Unit forward axis (local +X)
    pub fn forward(&self) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        Vec3::new(cp * cy, cp * sy, sp)
    }

    /// Unit right axis (local +Y)
    pub fn right(&self) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sr, cr) = self.roll.to_radians().sin_cos();
        Vec3::new(sr * sp * cy - cr * sy, sr * sp * sy + cr * cy, -sr * cp)
    }

    /// Same orientation as a quaternion, for rotating vectors in bulk
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::ZYX,
            self.yaw.to_radians(),
            -self.pitch.to_radians(),
            -self.roll.to_radians(),
        )
    }

    /// Damped rotational interpolation towards `target`.
    ///
    /// Moves along the shortest per-axis delta by `clamp(dt * speed, 0, 1)`.
    /// A non-positive `speed` snaps straight to the target.
    pub fn interp_to(self, target: Rotator, dt: f32, speed: f32) -> Rotator {
        if dt == 0.0 || self == target {
            return self;
        }
        if speed <= 0.0 {
            return target;
        }

        let delta = (target - self).normalized();
        if delta.is_nearly_zero(KINDA_SMALL_NUMBER) {
            return target;
        }

        let alpha = (dt * speed).clamp(0.0, 1.0);
        (self + delta * alpha).normalized()
    }
}

impl Add for Rotator {
    type Output = Rotator;

    fn add(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch + rhs.pitch, self.yaw + rhs.yaw, self.roll + rhs.roll)
    }
}

impl Sub for Rotator {
    type Output = Rotator;

    fn sub(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch - rhs.pitch, self.yaw - rhs.yaw, self.roll - rhs.roll)
    }
}

impl Mul<f32> for Rotator {
    type Output = Rotator;

    fn mul(self, rhs: f32) -> Rotator {
        Rotator::new(self.pitch * rhs, self.yaw * rhs, self.roll * rhs)
    }
}

/// Actor transform: capsule-centre position plus facing rotation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Rotator,
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Turn to face `direction` on the horizontal plane; zero leaves facing unchanged
    pub fn face(&mut self, direction: Vec3) {
        if safe_normal(direction) == Vec3::ZERO {
            return;
        }
        self.rotation = Rotator::from_direction(direction).yaw_only();
    }
}
