mod collision_pair;
mod broad_phase;
mod narrow_phase;
mod contact_manifold;
mod contact_solver;
mod boundary;

pub use self::collision_pair::CollisionPair;
pub use self::broad_phase::UniformGridBroadPhase;
pub use self::narrow_phase::{circles_overlap, pair_overlaps};
pub use self::contact_manifold::ContactManifold;
pub use self::contact_solver::SequentialImpulseSolver;
pub use self::boundary::contain_particles;
