//! Vertical kinematics: gravity, terminal speed and the jump impulse

/// Integrate one frame of gravity into `fall_speed`.
///
/// Rising (or at rest) the speed always receives `gravity * dt`. Descending,
/// it keeps accelerating until `terminal_speed` and is pinned there.
pub fn integrate_fall(fall_speed: f32, gravity: f32, terminal_speed: f32, dt: f32) -> f32 {
    if fall_speed >= 0.0 {
        fall_speed + gravity * dt
    } else if fall_speed > terminal_speed {
        (fall_speed + gravity * dt).max(terminal_speed)
    } else {
        fall_speed
    }
}

/// Vertical speed right after takeoff
pub fn jump_impulse(jump_velocity: f32) -> f32 {
    jump_velocity
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITY: f32 = -981.0;
    const TERMINAL: f32 = -2500.0;

    #[test]
    fn test_gravity_applies_from_rest() {
        let speed = integrate_fall(0.0, GRAVITY, TERMINAL, 0.1);
        assert!((speed + 98.1).abs() < 1.0e-3);
    }

    #[test]
    fn test_never_below_terminal_speed() {
        let mut speed = 0.0;
        for _ in 0..10_000 {
            speed = integrate_fall(speed, GRAVITY, TERMINAL, 1.0 / 60.0);
            assert!(speed >= TERMINAL);
        }
        assert_eq!(speed, TERMINAL);
    }

    #[test]
    fn test_jump_decelerates() {
        let mut speed = jump_impulse(500.0);
        let mut previous = speed;
        for _ in 0..30 {
            speed = integrate_fall(speed, GRAVITY, TERMINAL, 1.0 / 60.0);
            assert!(speed < previous);
            previous = speed;
        }
    }

    #[test]
    fn test_below_terminal_stays_put() {
        // Can only happen if something outside the integrator set it
        assert_eq!(integrate_fall(-3000.0, GRAVITY, TERMINAL, 1.0 / 60.0), -3000.0);
    }
}
