use crate::bodies::Particle;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A copy of every particle in a world, in index order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct WorldSnapshot {
    pub particles: Vec<Particle>,

    /// Simulation time at capture
    pub time: f32,

    /// Completed ticks at capture
    pub tick_count: u64,
}

impl WorldSnapshot {
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Prepares the captured particles for re-insertion: `inverse_mass` is
    /// recomputed from `mass`, and with `dt > 0` the previous position is
    /// re-derived from the velocity.
    pub(crate) fn prepared(&self, dt: f32) -> impl Iterator<Item = Particle> + '_ {
        self.particles.iter().map(move |particle| {
            let mut particle = *particle;
            particle.sync_inverse_mass();
            if dt > 0.0 {
                particle.previous_position = particle.position - particle.velocity * dt;
            }
            particle
        })
    }
}
