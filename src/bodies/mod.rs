mod particle;
mod material;
mod body_type;

pub use self::particle::Particle;
pub use self::material::Material;
pub use self::body_type::{inverse_mass_of, ParticleKind};
