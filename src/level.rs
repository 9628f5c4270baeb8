//! Test level for headless runs

use glam::Vec3;
use strider_physics::PhysicsWorld;
use tracing::info;

/// Build the test level: a floor at z = 0, a wall ahead and a ramp off to the right
pub fn build(physics: &mut PhysicsWorld) {
    physics.create_ground(0.0);

    // Wall face at x = 1500
    physics.create_static_box(Vec3::new(50.0, 600.0, 200.0), Vec3::new(1550.0, 0.0, 200.0));

    // 20 degree ramp rising towards +X
    physics.create_ramp(
        Vec3::new(400.0, 200.0, 20.0),
        Vec3::new(600.0, 800.0, 100.0),
        20.0,
    );

    physics.update_queries();
    info!("Level built");
}
