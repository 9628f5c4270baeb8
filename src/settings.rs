//! Simulation settings with persistence
//!
//! Settings are read from `~/.config/strider/settings.toml`

use std::fs;
use std::path::PathBuf;

use anyhow::{ensure, Context};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use strider_core::TimeConfig;
use strider_game::{CameraConfig, LocomotionConfig};
use strider_physics::CharacterBodyConfig;
use tracing::{info, warn};

/// All settings for a simulation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub locomotion: LocomotionConfig,
    pub camera: CameraConfig,
    pub body: CharacterBodyConfig,
    pub simulation: SimulationSettings,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("strider"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, falling back to defaults when the file is
    /// missing or unreadable. Parsed settings that fail validation are an error.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Ok(Self::default());
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Ok(Self::default());
        }

        let settings = match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        };

        settings
            .validate()
            .with_context(|| format!("Invalid settings in {:?}", path))?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        self.locomotion.validate().context("[locomotion]")?;
        self.simulation.validate().context("[simulation]")?;

        let body = &self.body;
        ensure!(
            body.radius.is_finite() && body.radius > 0.0,
            "[body] radius must be positive, got {}",
            body.radius
        );
        ensure!(
            body.half_height.is_finite() && body.half_height >= body.radius,
            "[body] half_height must be at least the radius, got {}",
            body.half_height
        );
        ensure!(
            body.skin_width.is_finite() && body.skin_width >= 0.0,
            "[body] skin_width must not be negative, got {}",
            body.skin_width
        );
        Ok(())
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Settings for the headless run itself
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// How long to simulate, in seconds
    pub duration: f32,
    /// Where the character's capsule centre starts
    pub spawn_position: Vec3,
    /// Frame timing
    pub time: TimeConfig,
}

impl SimulationSettings {
    /// Every frame must move the clock forward, or the run never ends
    pub fn validate(&self) -> anyhow::Result<()> {
        let time = &self.time;
        let positive = [
            ("time.fixed_timestep", time.fixed_timestep),
            ("time.max_delta_time", time.max_delta_time),
            ("time.time_scale", time.time_scale),
        ];
        for (field, value) in positive {
            ensure!(
                value.is_finite() && value > 0.0,
                "{} must be a positive number, got {}",
                field,
                value
            );
        }

        ensure!(
            self.duration.is_finite() && self.duration >= 0.0,
            "duration must be a finite, non-negative number of seconds, got {}",
            self.duration
        );
        ensure!(
            self.spawn_position.is_finite(),
            "spawn_position must be finite, got {}",
            self.spawn_position
        );
        Ok(())
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            duration: 8.0,
            spawn_position: Vec3::new(0.0, 0.0, 300.0),
            time: TimeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::parse(
            r#"
            [locomotion]
            max_speed = 450.0

            [simulation]
            duration = 2.5
            "#,
        )
        .expect("valid toml");

        assert_eq!(settings.locomotion.max_speed, 450.0);
        assert_eq!(settings.locomotion.jump_velocity, 500.0);
        assert_eq!(settings.simulation.duration, 2.5);
        assert_eq!(settings.camera.arm_length, 300.0);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timestep_is_rejected() {
        let settings = Settings::parse(
            r#"
            [simulation.time]
            fixed_timestep = 0.0
            "#,
        )
        .expect("valid toml");

        assert!(settings.locomotion.validate().is_ok());
        let err = settings.validate().expect_err("zero timestep never advances");
        assert!(format!("{:#}", err).contains("fixed_timestep"));
    }

    #[test]
    fn test_broken_clock_values_are_rejected() {
        for text in [
            "[simulation.time]\nmax_delta_time = -0.1",
            "[simulation.time]\nfixed_timestep = nan",
            "[simulation.time]\ntime_scale = 0.0",
            "[simulation]\nduration = inf",
        ] {
            let settings = Settings::parse(text).expect("valid toml");
            assert!(settings.validate().is_err(), "accepted {:?}", text);
        }
    }

    #[test]
    fn test_degenerate_body_is_rejected() {
        let settings = Settings::parse("[body]\nradius = 0.0").expect("valid toml");
        assert!(settings.validate().is_err());

        let settings = Settings::parse("[body]\nhalf_height = 10.0").expect("valid toml");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).expect("serializable");
        let parsed = Settings::parse(&text).expect("parsable");
        assert_eq!(parsed.locomotion.gravity, settings.locomotion.gravity);
        assert_eq!(parsed.body.half_height, settings.body.half_height);
    }
}
