//! Strider Game - Character locomotion, input and camera
//!
//! Provides the third-person locomotion controller, input mapping, and the
//! camera rig that follows it.

pub mod camera;
pub mod error;
pub mod input;
pub mod player;

pub use camera::{CameraConfig, CameraRig};
pub use error::ConfigError;
pub use input::{InputAction, InputBindings, InputEvent, InputHandler};
pub use player::{
    FrameReport, GroundResolution, LocomotionConfig, LocomotionController, LocomotionMode,
    LocomotionState, LocomotionTimer,
};
