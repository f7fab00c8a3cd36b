use crate::collision::{CollisionPair, ContactManifold};
use crate::core::{ParticleStorage, SolverConfig};

/// Sequential impulse contact solver.
///
/// Contacts are resolved one at a time in the order given; each resolution
/// sees the state left by the previous one.
#[derive(Debug, Clone, Copy)]
pub struct SequentialImpulseSolver {
    config: SolverConfig,
}

impl SequentialImpulseSolver {
    /// Creates a new sequential impulse solver
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Resolves one pair: positional correction, then a restitution impulse
    /// along the normal if the particles are approaching.
    ///
    /// Static particles are never written. For dynamic particles the previous
    /// position is re-derived from the new position and velocity using `dt`.
    /// Returns the contact if anything was resolved.
    pub fn resolve_contact(
        &self,
        particles: &mut ParticleStorage,
        pair: CollisionPair,
        dt: f32,
    ) -> Option<ContactManifold> {
        let contact = ContactManifold::compute(particles, pair, self.config.min_contact_distance)?;
        self.apply(particles, &contact, dt);
        Some(contact)
    }

    fn apply(&self, particles: &mut ParticleStorage, contact: &ContactManifold, dt: f32) {
        let (a, b) = (contact.pair.a, contact.pair.b);
        let inverse_mass_a = particles.inverse_mass[a];
        let inverse_mass_b = particles.inverse_mass[b];
        let normal = contact.normal;

        // Baumgarte-style correction, split by inverse mass
        let correction = (contact.penetration - self.config.position_correction_slop).max(0.0)
            / contact.inverse_mass_sum
            * self.config.position_correction_percent;
        let correction = normal * correction;
        if inverse_mass_a > 0.0 {
            let position = particles.position(a) - correction * inverse_mass_a;
            particles.set_position(a, position);
        }
        if inverse_mass_b > 0.0 {
            let position = particles.position(b) + correction * inverse_mass_b;
            particles.set_position(b, position);
        }

        let velocity_a = particles.velocity(a);
        let velocity_b = particles.velocity(b);
        let normal_velocity = (velocity_b - velocity_a).dot(&normal);

        // Separating contacts only get the positional correction
        let impulse_applied = normal_velocity <= 0.0;
        if impulse_applied {
            let impulse = -(1.0 + contact.restitution) * normal_velocity / contact.inverse_mass_sum;
            let epsilon = self.config.velocity_epsilon;
            if inverse_mass_a > 0.0 {
                let velocity = velocity_a - normal * (impulse * inverse_mass_a);
                particles.set_velocity(a, velocity.snapped(epsilon));
            }
            if inverse_mass_b > 0.0 {
                let velocity = velocity_b + normal * (impulse * inverse_mass_b);
                particles.set_velocity(b, velocity.snapped(epsilon));
            }
        }

        if inverse_mass_a > 0.0 {
            particles.sync_previous_position(a, dt);
        }
        if inverse_mass_b > 0.0 {
            particles.sync_previous_position(b, dt);
        }
    }
}
