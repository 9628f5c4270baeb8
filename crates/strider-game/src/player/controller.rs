//! Third-person locomotion controller
//!
//! Per frame: integrate look input, run the ground or air planner for the
//! current mode, sweep the capsule and resolve the next mode.

use glam::{Vec2, Vec3};
use strider_core::math::safe_normal_2d;
use strider_core::{EntityId, Rotator, TimerHandle, TimerManager, Transform};
use strider_physics::CollisionQuery;
use tracing::{debug, info};

use crate::input::InputEvent;

use super::executor::{execute_movement, probe_ground};
use super::kinematics::jump_impulse;
use super::look::LookIntegrator;
use super::planner::{camera_relative_direction, plan_airborne, plan_grounded};
use super::state::{GroundResolution, LocomotionMode, LocomotionState, LocomotionTimer};
use super::LocomotionConfig;

/// What a single frame did, for whoever presents the character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Actor transform after movement
    pub transform: Transform,
    /// Control rotation the camera rig should follow
    pub control_rotation: Rotator,
    /// Mode reported by the previous frame, so changes made between
    /// frames (such as the landing lock clearing) show up here
    pub previous_mode: LocomotionMode,
    /// Mode at the end of the frame
    pub mode: LocomotionMode,
    /// A jump was started this frame
    pub jumped: bool,
    /// Set when the character touched down this frame
    pub landing: Option<GroundResolution>,
    /// Slope of the surface the horizontal sweep ran into, in degrees
    pub slope_angle: Option<f32>,
}

impl FrameReport {
    pub fn mode_changed(&self) -> bool {
        self.previous_mode != self.mode
    }
}

/// Locomotion controller owning one character's movement state
pub struct LocomotionController {
    /// Movement configuration
    pub config: LocomotionConfig,
    id: EntityId,
    state: LocomotionState,
    transform: Transform,
    control_rotation: Rotator,
    look: LookIntegrator,
    jump_requested: bool,
    landing_lock: Option<TimerHandle>,
    reported_mode: LocomotionMode,
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            config,
            id: EntityId::new(),
            state: LocomotionState::default(),
            transform: Transform::default(),
            control_rotation: Rotator::ZERO,
            look: LookIntegrator::new(),
            jump_requested: false,
            landing_lock: None,
            reported_mode: LocomotionMode::default(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn mode(&self) -> LocomotionMode {
        self.state.mode
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn control_rotation(&self) -> Rotator {
        self.control_rotation
    }

    pub fn set_control_rotation(&mut self, rotation: Rotator) {
        self.control_rotation = rotation.normalized();
    }

    /// Whether a landing lock is pending
    pub fn landing_locked(&self) -> bool {
        self.landing_lock.is_some()
    }

    /// Handle of the pending landing lock timer
    pub fn landing_lock(&self) -> Option<TimerHandle> {
        self.landing_lock
    }

    /// A jump is allowed on the ground once the landing lock has cleared
    pub fn can_jump(&self) -> bool {
        self.state.mode == LocomotionMode::Grounded && self.landing_lock.is_none()
    }

    /// Place the character; it starts grounded if the ground probe hits
    pub fn spawn<Q: CollisionQuery + ?Sized>(&mut self, position: Vec3, query: &Q) {
        self.transform = Transform::from_position(position);
        self.state = LocomotionState::default();
        self.look = LookIntegrator::new();
        self.jump_requested = false;

        self.state.mode = if probe_ground(query, position, self.config.ground_check_distance) {
            LocomotionMode::Grounded
        } else {
            LocomotionMode::Falling
        };
        self.reported_mode = self.state.mode;

        info!(id = %self.id, ?position, mode = ?self.state.mode, "Character spawned");
    }

    /// Cancel anything still scheduled for this character
    pub fn despawn(&mut self, timers: &mut TimerManager<LocomotionTimer>) {
        if let Some(handle) = self.landing_lock.take() {
            timers.cancel(handle);
        }
        info!(id = %self.id, "Character despawned");
    }

    /// Record an input payload; its effect is applied on the next tick
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(direction) => self.state.input_direction = safe_normal_2d(direction),
            // Y drives pitch, X drives yaw
            InputEvent::Look(delta) => self.look.add_look_delta(delta.y, delta.x, 0.0),
            InputEvent::Jump => self.jump_requested = true,
        }
    }

    /// Deliver a fired timer. Returns true if it belonged to this character.
    pub fn on_timer(&mut self, handle: TimerHandle, timer: LocomotionTimer) -> bool {
        let LocomotionTimer::LandingLockExpired(id) = timer;
        if id != self.id || self.landing_lock != Some(handle) {
            return false;
        }

        self.landing_lock = None;
        let mode = self.state.mode.lock_expired();
        if mode != self.state.mode {
            debug!(id = %self.id, from = ?self.state.mode, to = ?mode, "Landing lock cleared");
        }
        self.state.mode = mode;
        true
    }

    /// Advance one frame
    pub fn tick<Q: CollisionQuery + ?Sized>(
        &mut self,
        dt: f32,
        query: &Q,
        timers: &mut TimerManager<LocomotionTimer>,
    ) -> FrameReport {
        let previous_mode = self.reported_mode;

        self.control_rotation = self.look.integrate(
            dt,
            self.control_rotation,
            self.config.mouse_x_sensitivity,
            self.config.mouse_y_sensitivity,
            self.config.max_control_rotation,
        );

        let jumped = std::mem::take(&mut self.jump_requested) && self.try_jump();

        if self.state.mode.is_airborne() {
            plan_airborne(&mut self.state, &self.config, self.control_rotation, dt);
        } else {
            self.state.fall_speed = 0.0;
            self.transform.rotation = plan_grounded(
                &mut self.state,
                &self.config,
                self.control_rotation,
                self.transform.rotation,
                dt,
            );
        }

        let outcome = execute_movement(query, self.transform.position, &self.state, &self.config, dt);
        self.transform.position = outcome.location;
        self.state.fall_speed = outcome.fall_speed;

        let was_airborne = self.state.mode.is_airborne();
        let mode = self.state.mode.resolve_ground(outcome.ground);
        let landing = if was_airborne && mode == LocomotionMode::Landing {
            self.begin_landing_lock(timers);
            debug!(id = %self.id, resolution = ?outcome.ground, "Landed");
            Some(outcome.ground)
        } else {
            None
        };
        if mode != self.state.mode && landing.is_none() {
            debug!(id = %self.id, from = ?self.state.mode, to = ?mode, "Mode changed");
        }
        self.state.mode = mode;
        self.reported_mode = mode;

        FrameReport {
            transform: self.transform,
            control_rotation: self.control_rotation,
            previous_mode,
            mode,
            jumped,
            landing,
            slope_angle: outcome.slope_angle,
        }
    }

    fn try_jump(&mut self) -> bool {
        if !self.can_jump() {
            debug!(id = %self.id, mode = ?self.state.mode, locked = self.landing_locked(), "Jump ignored");
            return false;
        }

        self.state.mode = LocomotionMode::Jumping;
        self.state.fall_speed = jump_impulse(self.config.jump_velocity);
        // Takeoff turns instantly instead of smoothing
        self.transform
            .face(camera_relative_direction(self.control_rotation, self.state.input_direction));
        debug!(id = %self.id, fall_speed = self.state.fall_speed, "Jump");
        true
    }

    fn begin_landing_lock(&mut self, timers: &mut TimerManager<LocomotionTimer>) {
        if let Some(previous) = self.landing_lock.take() {
            timers.cancel(previous);
        }
        let handle = timers.schedule_once(
            self.config.landing_lock_duration,
            LocomotionTimer::LandingLockExpired(self.id),
        );
        self.landing_lock = Some(handle);
    }

    /// Current movement input
    pub fn input_direction(&self) -> Vec2 {
        self.state.input_direction
    }
}
