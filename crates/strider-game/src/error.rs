//! Error types for game configuration

/// Errors raised when a configuration cannot drive the simulation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be below zero, got {value}")]
    NotNegative { field: &'static str, value: f32 },
}
