//! Scalar and vector helpers shared by the locomotion code

use glam::{Vec2, Vec3};

/// Tolerance used when comparing two scalars for equality
pub const SMALL_NUMBER: f32 = 1.0e-8;

/// Looser tolerance used for "close enough to zero" checks on angles
pub const KINDA_SMALL_NUMBER: f32 = 1.0e-4;

/// World up axis (Z-up, X-forward, Y-right)
pub const UP: Vec3 = Vec3::Z;

/// Linear interpolation between `a` and `b`
pub fn lerp(a: f32, b: f32, alpha: f32) -> f32 {
    a + (b - a) * alpha
}

/// Check whether two scalars are within `SMALL_NUMBER` of each other
pub fn is_nearly_equal(a: f32, b: f32) -> bool {
    (a - b).abs() <= SMALL_NUMBER
}

/// Normalize a 2D vector, returning zero for zero (or near-zero) input
pub fn safe_normal_2d(v: Vec2) -> Vec2 {
    let length_squared = v.length_squared();
    if length_squared <= SMALL_NUMBER {
        Vec2::ZERO
    } else if length_squared == 1.0 {
        v
    } else {
        v / length_squared.sqrt()
    }
}

/// Normalize a 3D vector, returning zero for zero (or near-zero) input
pub fn safe_normal(v: Vec3) -> Vec3 {
    let length_squared = v.length_squared();
    if length_squared <= SMALL_NUMBER {
        Vec3::ZERO
    } else if length_squared == 1.0 {
        v
    } else {
        v / length_squared.sqrt()
    }
}
