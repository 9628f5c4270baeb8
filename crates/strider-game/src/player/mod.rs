//! Player locomotion module
//!
//! Third-person character movement: look integration, ground and air
//! planning, gravity, and collision-swept movement with ground detection.

mod controller;
pub mod executor;
pub mod kinematics;
mod look;
mod movement;
pub mod planner;
mod state;

#[cfg(test)]
mod testing;

pub use controller::{FrameReport, LocomotionController};
pub use look::LookIntegrator;
pub use movement::{LocomotionConfig, WALKABLE_NORMAL_Z};
pub use state::{GroundResolution, LocomotionMode, LocomotionState, LocomotionTimer};
