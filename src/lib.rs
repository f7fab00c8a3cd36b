pub mod math;
pub mod core;
pub mod bodies;
pub mod collision;
pub mod forces;
pub mod integration;
pub mod systems;

/// Re-export common types for easier usage
pub use crate::core::{FixedTimestep, ParticleColumns, SimulationConfig, World, WorldSnapshot};
pub use crate::bodies::{Material, Particle, ParticleKind};
pub use crate::integration::IntegratorType;
pub use crate::math::Vector2;
pub use crate::systems::{CollisionSystem, MovementSystem, System, SystemManager};

/// Error types for the particle simulation
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Simulation stability error: {0}")]
        SimulationError(String),

        #[error("Internal error: {0}")]
        InternalError(String),
    }
}

/// Result type for simulation setup operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
