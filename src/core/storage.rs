use crate::bodies::Particle;
use crate::math::Vector2;

/// Declares the parallel per-particle columns once, so that push, removal
/// and clearing can never skip a column.
macro_rules! particle_columns {
    ($( $(#[$doc:meta])* $field:ident / $field_mut:ident; )*) => {
        /// Per-particle state stored as parallel columns indexed `0..len`.
        ///
        /// Every column always has the same length. Index `i` identifies one
        /// particle across all columns; there is no separate identity.
        #[derive(Debug, Clone, Default)]
        pub struct ParticleStorage {
            $( pub(crate) $field: Vec<f32>, )*
        }

        impl ParticleStorage {
            $(
                $(#[$doc])*
                #[inline]
                pub fn $field(&self) -> &[f32] {
                    &self.$field
                }

                /// Mutable view for live tuning; the column length cannot change through it.
                #[inline]
                pub fn $field_mut(&mut self) -> &mut [f32] {
                    &mut self.$field
                }
            )*

            fn swap_remove_all(&mut self, index: usize) {
                $( self.$field.swap_remove(index); )*
            }

            /// Removes every particle
            pub fn clear(&mut self) {
                $( self.$field.clear(); )*
            }

            /// Reserves room for `additional` more particles in every column
            pub fn reserve(&mut self, additional: usize) {
                $( self.$field.reserve(additional); )*
            }

            /// Returns true if every column has the same length
            pub fn is_consistent(&self) -> bool {
                let len = self.position_x.len();
                true $( && self.$field.len() == len )*
            }
        }
    };
}

particle_columns! {
    /// Current x coordinate
    position_x / position_x_mut;
    /// Current y coordinate
    position_y / position_y_mut;
    /// x coordinate one tick ago
    previous_position_x / previous_position_x_mut;
    /// y coordinate one tick ago
    previous_position_y / previous_position_y_mut;
    velocity_x / velocity_x_mut;
    velocity_y / velocity_y_mut;
    /// Persisted non-gravity acceleration, x
    acceleration_x / acceleration_x_mut;
    /// Persisted non-gravity acceleration, y
    acceleration_y / acceleration_y_mut;
    mass / mass_mut;
    /// `1/mass`, 0 for static particles. Must be kept consistent by whoever edits `mass`.
    inverse_mass / inverse_mass_mut;
    radius / radius_mut;
    /// Velocity decay rate, 1/s
    damping / damping_mut;
    /// Linear drag coefficient
    friction / friction_mut;
    restitution / restitution_mut;
}

impl ParticleStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut storage = Self::default();
        storage.reserve(capacity);
        storage
    }

    /// Number of particles
    #[inline]
    pub fn len(&self) -> usize {
        self.position_x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position_x.is_empty()
    }

    /// Appends one particle to every column and returns its index
    pub fn push(&mut self, particle: &Particle) -> usize {
        let index = self.len();
        self.position_x.push(particle.position.x);
        self.position_y.push(particle.position.y);
        self.previous_position_x.push(particle.previous_position.x);
        self.previous_position_y.push(particle.previous_position.y);
        self.velocity_x.push(particle.velocity.x);
        self.velocity_y.push(particle.velocity.y);
        self.acceleration_x.push(particle.acceleration.x);
        self.acceleration_y.push(particle.acceleration.y);
        self.mass.push(particle.mass);
        self.inverse_mass.push(particle.inverse_mass);
        self.radius.push(particle.radius);
        self.damping.push(particle.damping);
        self.friction.push(particle.friction);
        self.restitution.push(particle.restitution);
        index
    }

    /// Gathers one particle's fields, or `None` if out of range
    pub fn get(&self, index: usize) -> Option<Particle> {
        if index >= self.len() {
            return None;
        }
        Some(Particle {
            position: self.position(index),
            previous_position: self.previous_position(index),
            velocity: self.velocity(index),
            acceleration: self.acceleration(index),
            mass: self.mass[index],
            inverse_mass: self.inverse_mass[index],
            radius: self.radius[index],
            damping: self.damping[index],
            friction: self.friction[index],
            restitution: self.restitution[index],
        })
    }

    /// Removes a particle in O(1) by moving the last particle into its slot.
    ///
    /// The particle previously at `len() - 1` now lives at `index`.
    pub fn swap_remove(&mut self, index: usize) -> Option<Particle> {
        let removed = self.get(index)?;
        self.swap_remove_all(index);
        Some(removed)
    }

    #[inline]
    pub(crate) fn position(&self, index: usize) -> Vector2 {
        Vector2::new(self.position_x[index], self.position_y[index])
    }

    #[inline]
    pub(crate) fn set_position(&mut self, index: usize, position: Vector2) {
        self.position_x[index] = position.x;
        self.position_y[index] = position.y;
    }

    #[inline]
    pub(crate) fn previous_position(&self, index: usize) -> Vector2 {
        Vector2::new(self.previous_position_x[index], self.previous_position_y[index])
    }

    #[inline]
    pub(crate) fn set_previous_position(&mut self, index: usize, position: Vector2) {
        self.previous_position_x[index] = position.x;
        self.previous_position_y[index] = position.y;
    }

    #[inline]
    pub(crate) fn velocity(&self, index: usize) -> Vector2 {
        Vector2::new(self.velocity_x[index], self.velocity_y[index])
    }

    #[inline]
    pub(crate) fn set_velocity(&mut self, index: usize, velocity: Vector2) {
        self.velocity_x[index] = velocity.x;
        self.velocity_y[index] = velocity.y;
    }

    #[inline]
    pub(crate) fn acceleration(&self, index: usize) -> Vector2 {
        Vector2::new(self.acceleration_x[index], self.acceleration_y[index])
    }

    /// `previous_position = position - velocity * dt`, so that position history
    /// and the explicit velocity describe the same motion
    #[inline]
    pub(crate) fn sync_previous_position(&mut self, index: usize, dt: f32) {
        let previous = self.position(index) - self.velocity(index) * dt;
        self.set_previous_position(index, previous);
    }

    #[inline]
    pub(crate) fn is_dynamic(&self, index: usize) -> bool {
        self.inverse_mass[index] > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(x: f32) -> Particle {
        Particle::new(Vector2::new(x, 0.0), 1.0, x + 1.0)
    }

    #[test]
    fn push_and_get_round_trip_every_field() {
        let mut storage = ParticleStorage::new();
        let particle = Particle::new(Vector2::new(1.0, 2.0), 0.5, 3.0)
            .with_implied_velocity(Vector2::new(4.0, -1.0), 0.5)
            .with_acceleration(Vector2::new(0.25, 0.75))
            .with_restitution(0.4)
            .with_damping(0.2)
            .with_friction(0.1);
        assert_eq!(storage.push(&particle), 0);
        assert_eq!(storage.get(0), Some(particle));
        assert_eq!(storage.get(1), None);
    }

    #[test]
    fn swap_remove_moves_last_into_slot() {
        let mut storage = ParticleStorage::new();
        for x in 0..4 {
            storage.push(&particle_at(x as f32));
        }

        let removed = storage.swap_remove(1);
        assert_eq!(removed, Some(particle_at(1.0)));
        assert_eq!(storage.len(), 3);
        assert!(storage.is_consistent());
        assert_eq!(storage.position_x(), &[0.0, 3.0, 2.0]);
        assert_eq!(storage.mass(), &[1.0, 4.0, 3.0]);
    }

    #[test]
    fn swap_remove_last_and_out_of_range() {
        let mut storage = ParticleStorage::new();
        storage.push(&particle_at(0.0));
        storage.push(&particle_at(1.0));

        assert_eq!(storage.swap_remove(5), None);
        assert_eq!(storage.len(), 2);

        assert_eq!(storage.swap_remove(1), Some(particle_at(1.0)));
        assert_eq!(storage.position_x(), &[0.0]);
        assert!(storage.is_consistent());
    }

    #[test]
    fn clear_empties_every_column() {
        let mut storage = ParticleStorage::with_capacity(8);
        storage.push(&particle_at(0.0));
        storage.clear();
        assert!(storage.is_empty());
        assert!(storage.is_consistent());
        assert!(storage.restitution().is_empty());
    }
}
