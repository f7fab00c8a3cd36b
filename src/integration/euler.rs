use crate::integration::{Integrator, KinematicState};
use crate::math::Vector2;

/// Simple forward Euler integrator.
///
/// The position advances with the velocity from the start of the step, which
/// adds energy every step; stiff setups diverge at large `dt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerIntegrator;

impl EulerIntegrator {
    /// Creates a new Euler integrator
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for EulerIntegrator {
    fn integrate(&self, state: &mut KinematicState, acceleration: Vector2, dt: f32) {
        state.position += state.velocity * dt;
        state.velocity += acceleration * dt;
    }

    fn name(&self) -> &str {
        "ExplicitEuler"
    }
}
