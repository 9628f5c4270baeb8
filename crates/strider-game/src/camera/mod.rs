//! Camera rig module
//!
//! A spring-arm camera that follows the controller's control rotation.

mod config;
mod rig;

pub use config::CameraConfig;
pub use rig::CameraRig;
