//! Collision doubles for locomotion tests

use glam::Vec3;
use strider_physics::{CollisionQuery, Contact, SweepResult};

const HALF_HEIGHT: f32 = 88.0;

/// Infinite floor at `floor_z`, with an optional wall plane at `x = wall_x`
pub struct FlatGround {
    floor_z: f32,
    wall_x: Option<f32>,
}

impl FlatGround {
    pub fn new(floor_z: f32) -> Self {
        Self {
            floor_z,
            wall_x: None,
        }
    }

    pub fn with_wall(mut self, wall_x: f32) -> Self {
        self.wall_x = Some(wall_x);
        self
    }

    /// Capsule centre height when standing on the floor
    pub fn resting_z(&self) -> f32 {
        self.floor_z + HALF_HEIGHT
    }
}

impl CollisionQuery for FlatGround {
    fn sweep(&self, origin: Vec3, delta: Vec3) -> SweepResult {
        let target = origin + delta;

        if let Some(wall) = self.wall_x {
            if delta.x > 0.0 && origin.x <= wall && target.x > wall {
                let t = (wall - origin.x) / delta.x;
                return SweepResult {
                    location: Vec3::new(wall, origin.y + delta.y * t, origin.z + delta.z * t),
                    hit: Some(Contact {
                        normal: -Vec3::X,
                        impact_point: Vec3::new(wall, origin.y, origin.z),
                        time_of_impact: t,
                    }),
                };
            }
        }

        if delta.z < 0.0 && target.z - HALF_HEIGHT < self.floor_z {
            let gap = (origin.z - HALF_HEIGHT - self.floor_z).max(0.0);
            let t = (gap / -delta.z).clamp(0.0, 1.0);
            let location = Vec3::new(origin.x + delta.x * t, origin.y + delta.y * t, self.resting_z());
            return SweepResult {
                location,
                hit: Some(Contact {
                    normal: Vec3::Z,
                    impact_point: Vec3::new(location.x, location.y, self.floor_z),
                    time_of_impact: t,
                }),
            };
        }

        SweepResult::unobstructed(target)
    }

    fn line_trace(&self, start: Vec3, end: Vec3) -> bool {
        start.z >= self.floor_z && end.z <= self.floor_z
    }

    fn half_height(&self) -> f32 {
        HALF_HEIGHT
    }
}

/// Fixed answers: every vertical sweep hits `vertical_hit` (if set) at its
/// start, and the ground probe returns `probe_hit`
pub struct Scripted {
    pub vertical_hit: Option<Vec3>,
    pub probe_hit: bool,
}

impl CollisionQuery for Scripted {
    fn sweep(&self, origin: Vec3, delta: Vec3) -> SweepResult {
        match self.vertical_hit {
            Some(normal) if delta.z != 0.0 => SweepResult {
                location: origin,
                hit: Some(Contact {
                    normal,
                    impact_point: origin,
                    time_of_impact: 0.0,
                }),
            },
            _ => SweepResult::unobstructed(origin + delta),
        }
    }

    fn line_trace(&self, _start: Vec3, _end: Vec3) -> bool {
        self.probe_hit
    }

    fn half_height(&self) -> f32 {
        HALF_HEIGHT
    }
}
