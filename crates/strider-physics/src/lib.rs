//! Strider Physics - Collision queries using rapier3d
//!
//! Provides the static collision world, the sweep/line-trace capability the
//! locomotion code consumes, and a capsule body that implements it.

mod character_body;

pub use character_body::{BodyQuery, CharacterBody, CharacterBodyConfig};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;

/// First blocking surface reported by a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Surface normal at the contact, pointing away from the surface
    pub normal: Vec3,
    /// World-space contact point
    pub impact_point: Vec3,
    /// Fraction of the requested motion travelled before the contact (0..=1)
    pub time_of_impact: f32,
}

/// Result of moving a collision volume along a motion segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult {
    /// Where the volume ended up
    pub location: Vec3,
    /// Blocking contact, if the motion was stopped
    pub hit: Option<Contact>,
}

impl SweepResult {
    /// The full motion was travelled without hitting anything
    pub fn unobstructed(location: Vec3) -> Self {
        Self {
            location,
            hit: None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.hit.is_some()
    }
}

/// Collision capability consumed by the character movement code
pub trait CollisionQuery {
    /// Move the character volume from `origin` by `delta`, stopping at the
    /// first blocking surface
    fn sweep(&self, origin: Vec3, delta: Vec3) -> SweepResult;

    /// True iff any blocking surface lies between `start` and `end`
    fn line_trace(&self, start: Vec3, end: Vec3) -> bool;

    /// Distance from the volume's centre to its base
    fn half_height(&self) -> f32;
}

/// Static collision world
pub struct PhysicsWorld {
    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Island manager, needed when removing colliders
    island_manager: IslandManager,
    /// Query pipeline for raycasts and shape casts
    pub(crate) query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Rebuild the query acceleration structure (call after adding or moving geometry)
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true);
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, f32)> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_distance,
            true,
            filter,
        )
    }

    /// Create an infinite ground plane facing up at height `z`
    pub fn create_ground(&mut self, z: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 0.0, 1.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, 0.0, z])
            .friction(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.add_static_collider(collider)
    }

    /// Create a box tilted around the Y axis by `pitch_degrees`, rising towards +X
    pub fn create_ramp(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        pitch_degrees: f32,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .rotation(vector![0.0, -pitch_degrees.to_radians(), 0.0])
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
