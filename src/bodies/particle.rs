use crate::bodies::{inverse_mass_of, Material, ParticleKind};
use crate::math::Vector2;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// The full field set of one particle.
///
/// The world stores particles column-wise; this record is what goes in and
/// out of it (`World::add_particle`, `World::remove_particle`, snapshots).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Particle {
    /// Current location
    pub position: Vector2,

    /// Location one tick ago (drives the Verlet integrator)
    pub previous_position: Vector2,

    pub velocity: Vector2,

    /// Persisted non-gravity acceleration (force / mass)
    pub acceleration: Vector2,

    pub mass: f32,

    /// `1/mass`, or 0 for a static particle
    pub inverse_mass: f32,

    pub radius: f32,

    /// Per-particle velocity decay rate, in 1/s
    pub damping: f32,

    /// Linear drag coefficient
    pub friction: f32,

    pub restitution: f32,
}

impl Particle {
    /// Creates a dynamic particle at rest.
    ///
    /// `previous_position` equals `position`, so the implied initial velocity is zero.
    pub fn new(position: Vector2, radius: f32, mass: f32) -> Self {
        let material = Material::default();
        Self {
            position,
            previous_position: position,
            velocity: Vector2::zero(),
            acceleration: Vector2::zero(),
            mass,
            inverse_mass: inverse_mass_of(mass),
            radius,
            damping: material.damping,
            friction: material.friction,
            restitution: material.restitution,
        }
    }

    /// Creates an immovable particle
    pub fn new_static(position: Vector2, radius: f32) -> Self {
        Self::new(position, radius, 0.0)
    }

    /// Sets the velocity without touching `previous_position`.
    ///
    /// Explicit and semi-implicit Euler read `velocity` directly; use
    /// [`Particle::with_implied_velocity`] when the Verlet integrator must see it too.
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the velocity and `previous_position = position - velocity * dt`
    pub fn with_implied_velocity(mut self, velocity: Vector2, dt: f32) -> Self {
        self.velocity = velocity;
        self.previous_position = self.position - velocity * dt;
        self
    }

    pub fn with_previous_position(mut self, previous_position: Vector2) -> Self {
        self.previous_position = previous_position;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vector2) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Sets the mass and keeps `inverse_mass` consistent with it
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self.inverse_mass = inverse_mass_of(mass);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.restitution = material.restitution;
        self.friction = material.friction;
        self.damping = material.damping;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn material(&self) -> Material {
        Material::new(self.restitution, self.friction, self.damping)
    }

    pub fn kind(&self) -> ParticleKind {
        ParticleKind::from_inverse_mass(self.inverse_mass)
    }

    pub fn is_static(&self) -> bool {
        self.kind().is_static()
    }

    /// Linear momentum (`mass * velocity`), zero for static particles
    pub fn momentum(&self) -> Vector2 {
        if self.is_static() {
            Vector2::zero()
        } else {
            self.velocity * self.mass
        }
    }

    /// Recomputes `inverse_mass` from `mass`
    pub fn sync_inverse_mass(&mut self) {
        self.inverse_mass = inverse_mass_of(self.mass);
    }
}
