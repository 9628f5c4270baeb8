//! Movement executor and ground resolver
//!
//! Horizontal and vertical motion are swept separately: sweeping them as one
//! vector stops the character dead the moment it grazes the floor.

use glam::Vec3;
use strider_core::UP;
use strider_physics::{CollisionQuery, Contact};
use tracing::trace;

use super::kinematics::integrate_fall;
use super::movement::WALKABLE_NORMAL_Z;
use super::state::GroundResolution;
use super::{LocomotionConfig, LocomotionState};

/// Everything one movement step produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementOutcome {
    /// Capsule centre after both sweeps
    pub location: Vec3,
    /// Vertical speed after gravity
    pub fall_speed: f32,
    /// Blocking contact of the horizontal sweep
    pub horizontal_hit: Option<Contact>,
    /// Angle between the horizontal contact normal and up, in degrees.
    /// Reported only; movement does not react to it.
    pub slope_angle: Option<f32>,
    /// Blocking contact of the vertical sweep
    pub vertical_hit: Option<Contact>,
    /// How the vertical sweep and ground probe classify this frame
    pub ground: GroundResolution,
}

/// Angle in degrees between a surface normal and world up
pub fn slope_angle(normal: Vec3) -> f32 {
    normal.dot(UP).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Short line check straight down from the base of the collision volume
pub fn probe_ground<Q: CollisionQuery + ?Sized>(query: &Q, location: Vec3, distance: f32) -> bool {
    let start = location - UP * query.half_height();
    let end = start - UP * distance;
    query.line_trace(start, end)
}

/// Sweep horizontally, integrate gravity, sweep vertically and classify the result
pub fn execute_movement<Q: CollisionQuery + ?Sized>(
    query: &Q,
    origin: Vec3,
    state: &LocomotionState,
    config: &LocomotionConfig,
    dt: f32,
) -> MovementOutcome {
    let horizontal_delta = state.move_direction * state.horizontal_speed * dt;
    let horizontal = query.sweep(origin, horizontal_delta);

    let slope_angle = horizontal.hit.map(|hit| slope_angle(hit.normal));
    if let Some(angle) = slope_angle {
        trace!(angle, "Horizontal contact");
    }

    let fall_speed = integrate_fall(state.fall_speed, config.gravity, config.terminal_speed, dt);
    let vertical_delta = UP * fall_speed * dt;
    let vertical = query.sweep(horizontal.location, vertical_delta);

    let ground = match vertical.hit {
        Some(hit) if hit.normal.z > WALKABLE_NORMAL_Z => GroundResolution::Landed,
        Some(_) => GroundResolution::WallHit,
        None if probe_ground(query, vertical.location, config.ground_check_distance) => {
            GroundResolution::LandedByProbe
        }
        None => GroundResolution::Airborne,
    };

    MovementOutcome {
        location: vertical.location,
        fall_speed,
        horizontal_hit: horizontal.hit,
        slope_angle,
        vertical_hit: vertical.hit,
        ground,
    }
}
