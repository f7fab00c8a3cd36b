mod integrator;
mod euler;
mod verlet;
mod symplectic_euler;

pub use self::integrator::{Integrator, IntegratorType, KinematicState};
pub use self::euler::EulerIntegrator;
pub use self::verlet::VerletIntegrator;
pub use self::symplectic_euler::SymplecticEulerIntegrator;
