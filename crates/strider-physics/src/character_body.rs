//! Capsule collision body for a walking character

use glam::Vec3;
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CollisionQuery, Contact, PhysicsWorld, SweepResult};

/// Touching surfaces skipped before a sweep gives up and moves freely
const MAX_GRAZING_CONTACTS: usize = 4;

/// Character body configuration (centimetres)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterBodyConfig {
    /// Capsule radius
    pub radius: f32,
    /// Half of the full capsule height, caps included
    pub half_height: f32,
    /// Gap kept between the capsule and anything it is swept against
    pub skin_width: f32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            radius: 34.0,
            half_height: 88.0,
            skin_width: 0.1,
        }
    }
}

/// A capsule collider living in the physics world.
///
/// The body's position is the capsule centre.
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// The collider handle for this character
    pub collider: ColliderHandle,
}

impl CharacterBody {
    /// Insert the capsule into the physics world centred at `position`
    pub fn spawn(physics: &mut PhysicsWorld, config: CharacterBodyConfig, position: Vec3) -> Self {
        let half_segment = (config.half_height - config.radius).max(0.01);
        let collider = ColliderBuilder::capsule_z(half_segment, config.radius)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.0)
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        debug!(?position, "Spawned character capsule");

        Self {
            config,
            collider: handle,
        }
    }

    /// Remove the capsule from the physics world
    pub fn despawn(self, physics: &mut PhysicsWorld) {
        physics.remove_collider(self.collider);
    }

    /// Move the collider to a new centre position
    pub fn set_position(&self, physics: &mut PhysicsWorld, position: Vec3) {
        if let Some(collider) = physics.collider_set.get_mut(self.collider) {
            collider.set_translation(vector![position.x, position.y, position.z]);
        }
    }

    /// Query filter that ignores this body
    pub fn filter<'a>(&self) -> QueryFilter<'a> {
        QueryFilter::default().exclude_collider(self.collider)
    }

    /// Collision queries for this body against `physics`
    pub fn query<'a>(&'a self, physics: &'a PhysicsWorld) -> BodyQuery<'a> {
        BodyQuery {
            body: self,
            physics,
        }
    }
}

/// `CollisionQuery` implementation casting a body's capsule through the world
pub struct BodyQuery<'a> {
    body: &'a CharacterBody,
    physics: &'a PhysicsWorld,
}

impl CollisionQuery for BodyQuery<'_> {
    fn sweep(&self, origin: Vec3, delta: Vec3) -> SweepResult {
        let target = origin + delta;
        if delta == Vec3::ZERO {
            return SweepResult::unobstructed(target);
        }

        let Some(collider) = self.physics.collider_set.get(self.body.collider) else {
            return SweepResult::unobstructed(target);
        };

        let shape_pos = Isometry::translation(origin.x, origin.y, origin.z);
        let shape_vel = vector![delta.x, delta.y, delta.z];
        let options = ShapeCastOptions {
            max_time_of_impact: 1.0,
            target_distance: self.body.config.skin_width,
            stop_at_penetration: true,
            compute_impact_geometry_on_penetration: true,
        };

        // Surfaces we already touch and are sliding along or leaving would
        // hide anything further along the path, so they are skipped.
        let mut grazing: Vec<ColliderHandle> = Vec::new();
        let (hit, normal) = loop {
            let predicate = |handle: ColliderHandle, _: &Collider| !grazing.contains(&handle);
            let filter = self.body.filter().predicate(&predicate);

            let Some((handle, hit)) = self.physics.query_pipeline.cast_shape(
                &self.physics.rigid_body_set,
                &self.physics.collider_set,
                &shape_pos,
                &shape_vel,
                collider.shape(),
                options,
                filter,
            ) else {
                return SweepResult::unobstructed(target);
            };

            let normal = Vec3::new(hit.normal1.x, hit.normal1.y, hit.normal1.z);
            if hit.time_of_impact <= 0.0 && normal.dot(delta) >= 0.0 {
                if grazing.len() >= MAX_GRAZING_CONTACTS {
                    return SweepResult::unobstructed(target);
                }
                grazing.push(handle);
                continue;
            }
            break (hit, normal);
        };

        let time_of_impact = hit.time_of_impact.clamp(0.0, 1.0);
        SweepResult {
            location: origin + delta * time_of_impact,
            hit: Some(Contact {
                normal,
                impact_point: Vec3::new(hit.witness1.x, hit.witness1.y, hit.witness1.z),
                time_of_impact,
            }),
        }
    }

    fn line_trace(&self, start: Vec3, end: Vec3) -> bool {
        let segment = end - start;
        let length = segment.length();
        if length <= f32::EPSILON {
            return false;
        }

        self.physics
            .raycast(start, segment / length, length, self.body.filter())
            .is_some()
    }

    fn half_height(&self) -> f32 {
        self.body.config.half_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_ground() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        world
    }

    #[test]
    fn test_body_config_defaults() {
        let config = CharacterBodyConfig::default();
        assert_eq!(config.radius, 34.0);
        assert_eq!(config.half_height, 88.0);
    }

    #[test]
    fn test_sweep_down_hits_ground() {
        let mut world = world_with_ground();
        let body = CharacterBody::spawn(
            &mut world,
            CharacterBodyConfig::default(),
            Vec3::new(0.0, 0.0, 200.0),
        );
        world.update_queries();

        let result = body
            .query(&world)
            .sweep(Vec3::new(0.0, 0.0, 200.0), Vec3::new(0.0, 0.0, -500.0));

        let contact = result.hit.expect("capsule should land on the ground");
        assert!(contact.normal.z > 0.99);
        // Resting on the ground, base just above z = 0
        assert!((result.location.z - 88.0).abs() < 1.0);
    }

    #[test]
    fn test_sweep_in_open_air() {
        let mut world = world_with_ground();
        let body = CharacterBody::spawn(
            &mut world,
            CharacterBodyConfig::default(),
            Vec3::new(0.0, 0.0, 500.0),
        );
        world.update_queries();

        let result = body
            .query(&world)
            .sweep(Vec3::new(0.0, 0.0, 500.0), Vec3::new(100.0, 0.0, 0.0));
        assert!(!result.is_blocked());
        assert_eq!(result.location, Vec3::new(100.0, 0.0, 500.0));
    }

    #[test]
    fn test_sweep_into_wall() {
        let mut world = world_with_ground();
        world.create_static_box(Vec3::new(10.0, 500.0, 500.0), Vec3::new(200.0, 0.0, 500.0));
        let body = CharacterBody::spawn(
            &mut world,
            CharacterBodyConfig::default(),
            Vec3::new(0.0, 0.0, 300.0),
        );
        world.update_queries();

        let result = body
            .query(&world)
            .sweep(Vec3::new(0.0, 0.0, 300.0), Vec3::new(400.0, 0.0, 0.0));
        let contact = result.hit.expect("capsule should stop at the wall");
        assert!(contact.normal.x < -0.99);
        // Wall face at x = 190, capsule radius 34
        assert!(result.location.x < 190.0 - 34.0 + 0.5);
    }

    #[test]
    fn test_sweep_along_floor_still_sees_wall() {
        let mut world = world_with_ground();
        world.create_static_box(Vec3::new(10.0, 500.0, 500.0), Vec3::new(200.0, 0.0, 500.0));
        let body = CharacterBody::spawn(
            &mut world,
            CharacterBodyConfig::default(),
            Vec3::new(0.0, 0.0, 88.05),
        );
        world.update_queries();

        let query = body.query(&world);
        let open = query.sweep(Vec3::new(0.0, 0.0, 88.05), Vec3::new(50.0, 0.0, 0.0));
        assert!(!open.is_blocked());

        let blocked = query.sweep(Vec3::new(0.0, 0.0, 88.05), Vec3::new(400.0, 0.0, 0.0));
        let contact = blocked.hit.expect("wall should block the slide");
        assert!(contact.normal.x < -0.99);
        assert!(blocked.location.x < 190.0 - 34.0 + 0.5);
    }

    #[test]
    fn test_line_trace_ignores_own_capsule() {
        let mut world = world_with_ground();
        let body = CharacterBody::spawn(
            &mut world,
            CharacterBodyConfig::default(),
            Vec3::new(0.0, 0.0, 88.5),
        );
        world.update_queries();

        let query = body.query(&world);
        let base = Vec3::new(0.0, 0.0, 88.5 - query.half_height());
        assert!(query.line_trace(base, base - Vec3::Z * 1.0));
        assert!(!query.line_trace(base + Vec3::Z * 10.0, base + Vec3::Z * 9.0));
    }
}
