use crate::integration::{Integrator, KinematicState};
use crate::math::Vector2;

/// Symplectic Euler integrator (semi-implicit Euler)
/// More stable than explicit Euler for physics simulations
#[derive(Debug, Clone, Copy, Default)]
pub struct SymplecticEulerIntegrator;

impl SymplecticEulerIntegrator {
    /// Creates a new Symplectic Euler integrator
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for SymplecticEulerIntegrator {
    fn integrate(&self, state: &mut KinematicState, acceleration: Vector2, dt: f32) {
        state.velocity += acceleration * dt;
        // Position uses the *new* velocity
        state.position += state.velocity * dt;
    }

    fn name(&self) -> &str {
        "SymplecticEuler"
    }
}
