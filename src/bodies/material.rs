#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Surface and drag properties of a particle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of restitution (bounciness), conventionally 0-1 but not clamped
    pub restitution: f32,

    /// Linear drag coefficient, in 1/s
    pub friction: f32,

    /// Per-particle exponential velocity decay rate, in 1/s
    pub damping: f32,
}

impl Material {
    /// Creates a new material with the specified properties
    pub const fn new(restitution: f32, friction: f32, damping: f32) -> Self {
        Self {
            restitution,
            friction,
            damping,
        }
    }

    /// Perfectly elastic, frictionless, undamped
    pub const fn elastic() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Creates a material for rubber (high restitution, light drag)
    pub const fn rubber() -> Self {
        Self::new(0.85, 0.5, 0.1)
    }

    /// Creates a material for wood (low restitution)
    pub const fn wood() -> Self {
        Self::new(0.3, 0.6, 0.05)
    }

    /// Creates a material for metal (medium restitution, low drag)
    pub const fn metal() -> Self {
        Self::new(0.5, 0.2, 0.0)
    }

    /// Soft, heavily damped material that comes to rest quickly
    pub const fn clay() -> Self {
        Self::new(0.05, 1.5, 0.8)
    }
}

impl Default for Material {
    /// Neutral values: the same defaults the world's accessors return for unknown indices
    fn default() -> Self {
        Self::elastic()
    }
}
