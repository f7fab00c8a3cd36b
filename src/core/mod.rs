pub mod world;
pub mod config;
pub mod storage;
pub mod grid;
pub mod snapshot;
pub mod timing;
mod scheduler;

pub use self::world::{ParticleColumns, World};
pub use self::config::{
    GridConfig, NeighborStencil, OutOfBoundsPolicy, SimulationConfig, SolverConfig, Walls,
    MAX_GRID_CELLS,
};
pub use self::storage::ParticleStorage;
pub use self::grid::{GridInfo, SpatialGrid};
pub use self::snapshot::WorldSnapshot;
pub use self::timing::{Accumulator, CollisionTimings, ScopedTimer};
pub use self::scheduler::FixedTimestep;
