//! Strider - headless third-person locomotion simulation
//!
//! Builds a small test level, spawns a character and drives it with a
//! scripted input timeline at a fixed timestep, logging what it does.

mod level;
mod scenario;
mod settings;

use anyhow::{Context, Result};
use strider_core::{GameTime, TimerManager};
use strider_game::{CameraRig, InputHandler, LocomotionController, LocomotionTimer};
use strider_physics::{CharacterBody, PhysicsWorld};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scenario::Scenario;
use settings::Settings;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting Strider simulation...");

    let settings = Settings::load()?;
    if std::env::args().any(|arg| arg == "--save-settings") {
        settings.save()?;
    }
    let sim = &settings.simulation;

    let mut physics = PhysicsWorld::new();
    level::build(&mut physics);

    let body = CharacterBody::spawn(&mut physics, settings.body.clone(), sim.spawn_position);
    physics.update_queries();

    let mut controller = LocomotionController::new(settings.locomotion.clone());
    controller.spawn(sim.spawn_position, &body.query(&physics));

    let mut camera = CameraRig::with_config(settings.camera.clone());
    let mut timers = TimerManager::<LocomotionTimer>::new();
    let mut time = GameTime::new(sim.time.clone());
    let mut input = InputHandler::new();
    let mut scenario = Scenario::demo();

    let dt = time.config.fixed_timestep;
    let mut landings = 0u32;
    let mut jumps = 0u32;

    while time.total_time < sim.duration as f64 {
        time.update(dt);

        for _ in 0..time.fixed_steps() {
            for (handle, timer) in timers.advance(dt) {
                controller.on_timer(handle, timer);
            }

            scenario.feed(timers.now() as f32, &mut input);
            for event in input.drain() {
                debug!(?event, "Input");
                controller.handle_input(event);
            }

            let report = controller.tick(dt, &body.query(&physics), &mut timers);
            body.set_position(&mut physics, report.transform.position);
            physics.update_queries();
            camera.sync(
                report.transform.position,
                report.control_rotation,
                Some((&physics, body.filter())),
            );

            if report.jumped {
                jumps += 1;
            }
            if let Some(resolution) = report.landing {
                landings += 1;
                info!(
                    t = timers.now(),
                    ?resolution,
                    position = ?report.transform.position,
                    "Landed"
                );
            }
            if report.mode_changed() {
                info!(
                    t = timers.now(),
                    from = ?report.previous_mode,
                    to = ?report.mode,
                    "Mode changed"
                );
            }
        }
    }

    info!(
        position = ?controller.position(),
        facing = controller.transform().rotation.yaw,
        camera = ?camera.position(),
        mode = ?controller.mode(),
        jumps,
        landings,
        script_done = scenario.is_finished(),
        "Simulation finished"
    );

    controller.despawn(&mut timers);
    body.despawn(&mut physics);

    Ok(())
}
