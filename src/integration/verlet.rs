use crate::integration::{Integrator, KinematicState};
use crate::math::Vector2;

/// Position Verlet integrator.
///
/// `next = 2 * position - previous_position + acceleration * dt^2`. The
/// incoming velocity is ignored; afterwards it is the backward difference
/// `(position - previous_position) / dt` over the step just taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerletIntegrator;

impl VerletIntegrator {
    /// Creates a new position Verlet integrator
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for VerletIntegrator {
    fn integrate(&self, state: &mut KinematicState, acceleration: Vector2, dt: f32) {
        let current = state.position;
        let next = current * 2.0 - state.previous_position + acceleration * (dt * dt);

        state.previous_position = current;
        state.position = next;
        state.velocity = (next - current) / dt;
    }

    fn name(&self) -> &str {
        "Verlet"
    }
}
