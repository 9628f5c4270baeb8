//! Camera-rotation integrator
//!
//! Look input may arrive several times between two frames, so deltas are
//! accumulated and only folded into the control rotation once per frame.

use strider_core::Rotator;

/// Accumulates raw look input and applies it to a control rotation
#[derive(Debug, Clone, Default)]
pub struct LookIntegrator {
    pending: Rotator,
}

impl LookIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw look delta (summed until the next `integrate`)
    pub fn add_look_delta(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.pending = self.pending + Rotator::new(pitch, yaw, roll);
    }

    /// Accumulated but not yet integrated delta
    pub fn pending(&self) -> Rotator {
        self.pending
    }

    /// Fold the accumulated delta into `control`, then reset the accumulator.
    ///
    /// The delta is scaled by `dt` and the per-axis sensitivity (roll has
    /// none), clamped to `max_rotation`, added and normalized.
    pub fn integrate(
        &mut self,
        dt: f32,
        control: Rotator,
        sensitivity_x: f32,
        sensitivity_y: f32,
        max_rotation: Rotator,
    ) -> Rotator {
        let mut delta = self.pending * dt;
        delta.yaw *= sensitivity_x;
        delta.pitch *= sensitivity_y;
        let delta = delta.clamp_axes(max_rotation);

        self.pending = Rotator::ZERO;
        (control + delta).normalized()
    }
}
