//! Movement configuration and constants

use serde::{Deserialize, Serialize};
use strider_core::Rotator;

use crate::error::ConfigError;

/// Minimum upward component of a surface normal that counts as ground
/// (roughly 45 degrees from straight up)
pub const WALKABLE_NORMAL_Z: f32 = 0.7;

/// Locomotion tuning knobs, in centimetres / seconds / degrees
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Top horizontal speed
    pub max_speed: f32,
    /// Rate used to blend towards the target speed on the ground
    pub acceleration: f32,
    /// Damping for turning the body towards the move direction
    pub turn_smoothing_damp: f32,
    /// Upward speed applied on takeoff
    pub jump_velocity: f32,
    /// Vertical acceleration (negative pulls down)
    pub gravity: f32,
    /// Fastest reachable downward speed (negative)
    pub terminal_speed: f32,
    /// Seconds after touchdown during which jumping is refused
    pub landing_lock_duration: f32,
    /// Length of the downward probe below the capsule base
    pub ground_check_distance: f32,
    /// Fraction of ground acceleration available in the air
    pub air_speed_multiplier: f32,
    /// Look input scale applied to yaw
    pub mouse_x_sensitivity: f32,
    /// Look input scale applied to pitch
    pub mouse_y_sensitivity: f32,
    /// Largest per-frame change of the control rotation, per axis
    pub max_control_rotation: Rotator,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            max_speed: 600.0,
            acceleration: 2048.0,
            turn_smoothing_damp: 5.0,
            jump_velocity: 500.0,
            gravity: -981.0,
            terminal_speed: -2500.0,
            landing_lock_duration: 0.1,
            ground_check_distance: 1.0,
            air_speed_multiplier: 0.2,
            mouse_x_sensitivity: 180.0,
            mouse_y_sensitivity: 180.0,
            max_control_rotation: Rotator::new(180.0, 180.0, 180.0),
        }
    }
}

impl LocomotionConfig {
    /// Reject values the per-frame update cannot make sense of
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("turn_smoothing_damp", self.turn_smoothing_damp),
            ("jump_velocity", self.jump_velocity),
            ("gravity", self.gravity),
            ("terminal_speed", self.terminal_speed),
            ("landing_lock_duration", self.landing_lock_duration),
            ("ground_check_distance", self.ground_check_distance),
            ("air_speed_multiplier", self.air_speed_multiplier),
            ("mouse_x_sensitivity", self.mouse_x_sensitivity),
            ("mouse_y_sensitivity", self.mouse_y_sensitivity),
            ("max_control_rotation.pitch", self.max_control_rotation.pitch),
            ("max_control_rotation.yaw", self.max_control_rotation.yaw),
            ("max_control_rotation.roll", self.max_control_rotation.roll),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        for (field, value) in fields {
            if field == "gravity" || field == "terminal_speed" {
                continue;
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.gravity >= 0.0 {
            return Err(ConfigError::NotNegative {
                field: "gravity",
                value: self.gravity,
            });
        }
        if self.terminal_speed >= 0.0 {
            return Err(ConfigError::NotNegative {
                field: "terminal_speed",
                value: self.terminal_speed,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(LocomotionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let config = LocomotionConfig {
            gravity: 981.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotNegative { field: "gravity", .. })
        ));
    }

    #[test]
    fn test_rejects_nan_and_negative() {
        let config = LocomotionConfig {
            max_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "max_speed", .. })
        ));

        let config = LocomotionConfig {
            landing_lock_duration: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "landing_lock_duration", .. })
        ));
    }
}
