//! Strider Core - Core types and utilities
//!
//! This crate provides the foundational types used by the other crates:
//! - Math helpers and the Z-up world convention
//! - `Rotator` and `Transform` for actor orientation
//! - Game time and the one-shot timer queue

pub mod math;
pub mod time;
pub mod types;

pub use glam::{Quat, Vec2, Vec3};
pub use math::UP;
pub use time::{GameTime, TimeConfig, TimerHandle, TimerManager};
pub use types::{EntityId, Rotator, Transform};
