#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// How a particle takes part in the simulation.
///
/// The kind is never stored; it is derived from the inverse mass so that the
/// two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ParticleKind {
    /// Integrated every tick and moved by contacts
    Dynamic,

    /// Immovable obstacle (`inverse_mass == 0`)
    Static,
}

impl ParticleKind {
    /// Classifies a particle from its inverse mass
    #[inline]
    pub fn from_inverse_mass(inverse_mass: f32) -> Self {
        if inverse_mass > 0.0 {
            Self::Dynamic
        } else {
            Self::Static
        }
    }

    #[inline]
    pub fn is_static(self) -> bool {
        self == Self::Static
    }
}

/// Inverse mass for a given mass: `1/mass`, or 0 (static) when `mass <= 0` or not finite
#[inline]
pub fn inverse_mass_of(mass: f32) -> f32 {
    if mass > 0.0 && mass.is_finite() {
        1.0 / mass
    } else {
        0.0
    }
}
