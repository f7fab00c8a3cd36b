use crate::integration::{EulerIntegrator, SymplecticEulerIntegrator, VerletIntegrator};
use crate::math::Vector2;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// The kinematic fields an integrator reads and writes for one particle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    pub position: Vector2,
    pub previous_position: Vector2,
    pub velocity: Vector2,
}

/// Trait for numerical integration algorithms
pub trait Integrator: Send + Sync {
    /// Advances one particle by `dt` under a constant `acceleration`
    fn integrate(&self, state: &mut KinematicState, acceleration: Vector2, dt: f32);

    /// Returns the name of the integrator
    fn name(&self) -> &str;
}

/// Selects the integrator the movement system uses for every particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum IntegratorType {
    /// Position from the old velocity, then velocity. Least stable.
    ExplicitEuler,

    /// Velocity first, then position from the new velocity
    #[default]
    SemiImplicitEuler,

    /// Position history instead of integrated velocity
    PositionVerlet,
}

impl IntegratorType {
    pub const ALL: [IntegratorType; 3] = [
        IntegratorType::ExplicitEuler,
        IntegratorType::SemiImplicitEuler,
        IntegratorType::PositionVerlet,
    ];

    /// Runs the selected integrator
    #[inline]
    pub fn integrate(self, state: &mut KinematicState, acceleration: Vector2, dt: f32) {
        match self {
            Self::ExplicitEuler => EulerIntegrator.integrate(state, acceleration, dt),
            Self::SemiImplicitEuler => SymplecticEulerIntegrator.integrate(state, acceleration, dt),
            Self::PositionVerlet => VerletIntegrator.integrate(state, acceleration, dt),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ExplicitEuler => "ExplicitEuler",
            Self::SemiImplicitEuler => "SymplecticEuler",
            Self::PositionVerlet => "Verlet",
        }
    }

    /// Whether velocity is derived from position history rather than integrated
    pub fn derives_velocity(self) -> bool {
        self == Self::PositionVerlet
    }
}
