use crate::collision::CollisionPair;
use crate::core::ParticleStorage;
use crate::math::Vector2;

/// Contact data for one overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactManifold {
    /// The pair, in broad-phase order
    pub pair: CollisionPair,

    /// Unit normal pointing from `pair.a` to `pair.b`
    pub normal: Vector2,

    /// Overlap depth, always positive
    pub penetration: f32,

    /// Mean of the two restitution coefficients
    pub restitution: f32,

    /// `inverse_mass_a + inverse_mass_b`, always positive
    pub inverse_mass_sum: f32,
}

impl ContactManifold {
    /// Builds the contact for a pair, or `None` if there is nothing to resolve:
    /// centers closer than `min_contact_distance` (no usable normal), no
    /// penetration, or both particles static.
    pub fn compute(particles: &ParticleStorage, pair: CollisionPair, min_contact_distance: f32) -> Option<Self> {
        let (a, b) = (pair.a, pair.b);
        let delta = particles.position(b) - particles.position(a);
        let distance_squared = delta.length_squared();
        if distance_squared <= min_contact_distance * min_contact_distance {
            log::trace!("skipping coincident contact between particles {} and {}", a, b);
            return None;
        }

        let distance = distance_squared.sqrt();
        let penetration = particles.radius[a] + particles.radius[b] - distance;
        if penetration <= 0.0 {
            return None;
        }

        let inverse_mass_sum = particles.inverse_mass[a] + particles.inverse_mass[b];
        if inverse_mass_sum <= 0.0 {
            return None;
        }

        Some(Self {
            pair,
            normal: delta / distance,
            penetration,
            restitution: 0.5 * (particles.restitution[a] + particles.restitution[b]),
            inverse_mass_sum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Particle;
    use approx::assert_relative_eq;

    fn storage(particles: &[Particle]) -> ParticleStorage {
        let mut storage = ParticleStorage::new();
        for particle in particles {
            storage.push(particle);
        }
        storage
    }

    #[test]
    fn normal_points_from_a_to_b() {
        let particles = storage(&[
            Particle::new(Vector2::new(1.0, 0.0), 1.0, 1.0).with_restitution(0.6),
            Particle::new(Vector2::new(0.0, 0.0), 1.0, 2.0).with_restitution(1.0),
        ]);
        let contact = ContactManifold::compute(&particles, CollisionPair::new(0, 1), 1e-6).unwrap();
        assert_relative_eq!(contact.normal, Vector2::new(-1.0, 0.0));
        assert_relative_eq!(contact.penetration, 1.0);
        assert_relative_eq!(contact.restitution, 0.8);
        assert_relative_eq!(contact.inverse_mass_sum, 1.5);
    }

    #[test]
    fn degenerate_and_separated_pairs_have_no_contact() {
        let particles = storage(&[
            Particle::new(Vector2::new(0.0, 0.0), 1.0, 1.0),
            Particle::new(Vector2::new(0.0, 0.0), 1.0, 1.0),
            Particle::new(Vector2::new(5.0, 0.0), 1.0, 1.0),
        ]);
        assert!(ContactManifold::compute(&particles, CollisionPair::new(0, 1), 1e-6).is_none());
        assert!(ContactManifold::compute(&particles, CollisionPair::new(0, 2), 1e-6).is_none());
    }

    #[test]
    fn static_pair_has_no_contact() {
        let particles = storage(&[
            Particle::new_static(Vector2::new(0.0, 0.0), 1.0),
            Particle::new_static(Vector2::new(1.0, 0.0), 1.0),
        ]);
        assert!(ContactManifold::compute(&particles, CollisionPair::new(0, 1), 1e-6).is_none());
    }
}
