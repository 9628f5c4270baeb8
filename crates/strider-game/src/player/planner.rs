//! Velocity and direction planning for grounded and airborne movement

use glam::{Vec2, Vec3};
use strider_core::math::{is_nearly_equal, lerp, safe_normal};
use strider_core::Rotator;

use super::{LocomotionConfig, LocomotionState};

/// World-space move direction for a 2D input, relative to the control yaw.
///
/// Pitch and roll of the control rotation are ignored so movement stays on
/// the horizontal plane. Zero input gives zero.
pub fn camera_relative_direction(control: Rotator, input: Vec2) -> Vec3 {
    let heading = control.yaw_only();
    safe_normal(heading.forward() * input.x + heading.right() * input.y)
}

/// Blend `current` towards `target` with rate `clamp(dt * acceleration, 0, 1)`,
/// snapping once they are nearly equal
pub fn approach_speed(current: f32, target: f32, acceleration: f32, dt: f32) -> f32 {
    if is_nearly_equal(target, current) {
        return target;
    }

    let alpha = (dt * acceleration).clamp(0.0, 1.0);
    lerp(current, target, alpha)
}

/// Ground movement: speed eases towards max (or zero without input), the
/// direction follows the camera, and facing turns smoothly towards it.
///
/// Returns the new facing rotation.
pub fn plan_grounded(
    state: &mut LocomotionState,
    config: &LocomotionConfig,
    control: Rotator,
    facing: Rotator,
    dt: f32,
) -> Rotator {
    let target_speed = if state.input_direction == Vec2::ZERO {
        0.0
    } else {
        config.max_speed
    };
    state.horizontal_speed =
        approach_speed(state.horizontal_speed, target_speed, config.acceleration, dt);
    state.move_direction = camera_relative_direction(control, state.input_direction);

    if state.move_direction == Vec3::ZERO {
        return facing;
    }
    let target = Rotator::from_direction(state.move_direction).yaw_only();
    facing.interp_to(target, dt, config.turn_smoothing_damp)
}

/// Air movement: momentum is kept and input only adds a limited
/// acceleration; the result is capped at max speed.
pub fn plan_airborne(
    state: &mut LocomotionState,
    config: &LocomotionConfig,
    control: Rotator,
    dt: f32,
) {
    let current = state.horizontal_velocity();

    let amount = (config.acceleration * config.air_speed_multiplier * dt)
        .clamp(0.0, config.max_speed * dt);
    let steering = camera_relative_direction(control, state.input_direction) * amount;

    let mut velocity = current + steering;
    if velocity.length() > config.max_speed {
        velocity = safe_normal(velocity) * config.max_speed;
    }

    state.move_direction = safe_normal(velocity);
    state.horizontal_speed = velocity.length();
}
