use bitflags::bitflags;

use crate::error::PhysicsError;
use crate::integration::IntegratorType;
use crate::math::Vector2;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Which walls of the world bounding box contain dynamic particles
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
    pub struct Walls: u8 {
        /// `y = min_y`
        const GROUND  = 0b0001;

        /// `y = max_y`
        const CEILING = 0b0010;

        /// `x = min_x`
        const LEFT    = 0b0100;

        /// `x = max_x`
        const RIGHT   = 0b1000;

        /// Ground and both side walls, open at the top
        const BASIN = Self::GROUND.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

impl Default for Walls {
    fn default() -> Self {
        Self::all()
    }
}

/// What the broad phase does with a particle whose center lies outside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum OutOfBoundsPolicy {
    /// Not indexed this tick; only boundary containment brings it back
    #[default]
    Ignore,

    /// Indexed in the nearest edge cell
    ClampToEdge,
}

/// Neighbor cells visited from each grid cell during pair generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum NeighborStencil {
    /// (+1,0), (0,+1), (+1,+1), (-1,+1): every adjacent cell pair exactly once
    #[default]
    Half,

    /// (+1,0), (0,+1), (+1,+1) only; misses anti-diagonal cell pairs
    Legacy,
}

impl NeighborStencil {
    /// Cell offsets in visiting order
    pub fn offsets(self) -> &'static [(i32, i32)] {
        const HALF: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];
        match self {
            Self::Half => &HALF,
            Self::Legacy => &HALF[..3],
        }
    }
}

/// Upper bound on the number of grid cells a [`GridConfig`] may describe
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Bounding box and cell size of the spatial grid (also the containment walls)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct GridConfig {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub cell_size: f32,
}

impl GridConfig {
    pub fn new(min: Vector2, max: Vector2, cell_size: f32) -> Self {
        Self {
            min_x: min.x,
            max_x: max.x,
            min_y: min.y,
            max_y: max.y,
            cell_size,
        }
    }

    pub fn min(&self) -> Vector2 {
        Vector2::new(self.min_x, self.min_y)
    }

    pub fn max(&self) -> Vector2 {
        Vector2::new(self.max_x, self.max_y)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Cells along x and y, `ceil(extent / cell_size)`. Saturates on overflow.
    pub fn cell_counts(&self) -> (usize, usize) {
        (
            (self.width() / self.cell_size).ceil().max(0.0) as usize,
            (self.height() / self.cell_size).ceil().max(0.0) as usize,
        )
    }

    /// Returns true if `position` lies inside the box (edges included)
    pub fn contains(&self, position: Vector2) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }

    pub fn validate(&self) -> Result<()> {
        let values = [self.min_x, self.max_x, self.min_y, self.max_y, self.cell_size];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "grid bounds must be finite: {:?}",
                self
            )));
        }
        if self.max_x <= self.min_x || self.max_y <= self.min_y {
            return Err(PhysicsError::InvalidParameter(format!(
                "grid bounds are empty: x [{}, {}], y [{}, {}]",
                self.min_x, self.max_x, self.min_y, self.max_y
            )));
        }
        if self.cell_size <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }
        let (cells_x, cells_y) = self.cell_counts();
        match cells_x.checked_mul(cells_y) {
            Some(total) if total <= MAX_GRID_CELLS => Ok(()),
            _ => Err(PhysicsError::InvalidParameter(format!(
                "grid of {}x{} cells exceeds the limit of {} cells",
                cells_x, cells_y, MAX_GRID_CELLS
            ))),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_x: -100.0,
            max_x: 100.0,
            min_y: -100.0,
            max_y: 100.0,
            cell_size: 5.0,
        }
    }
}

/// Tunables of the contact solver and boundary containment
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Penetration tolerated before positional correction kicks in
    pub position_correction_slop: f32,

    /// Fraction of the remaining penetration corrected per contact (0.2-0.4 is typical).
    /// Higher corrects faster but injects more energy.
    pub position_correction_percent: f32,

    /// Velocity components below this magnitude are snapped to zero after a contact
    pub velocity_epsilon: f32,

    /// Contacts whose centers are closer than this are skipped as coincident
    pub min_contact_distance: f32,

    /// Distance a particle is pushed inside a wall past the exact contact position
    pub boundary_nudge: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            position_correction_slop: 0.001,
            position_correction_percent: 0.4,
            velocity_epsilon: 1.0e-3,
            min_contact_distance: 1.0e-6,
            boundary_nudge: 1.0e-4,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("position_correction_slop", self.position_correction_slop),
            ("position_correction_percent", self.position_correction_percent),
            ("velocity_epsilon", self.velocity_epsilon),
            ("min_contact_distance", self.min_contact_distance),
            ("boundary_nudge", self.boundary_nudge),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PhysicsError::InvalidParameter(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Configuration parameters for the particle simulation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// The fixed time step for the simulation
    pub time_step: f32,

    /// Cap on ticks run per frame by `FixedTimestep`
    pub max_substeps: u32,

    /// Gravity acceleration applied to every dynamic particle
    pub gravity: Vector2,

    /// Exponential velocity decay rate added to every particle's own damping, in 1/s
    pub global_damping: f32,

    /// The integrator used by the movement system
    pub integrator: IntegratorType,

    pub grid: GridConfig,

    pub solver: SolverConfig,

    pub walls: Walls,

    pub out_of_bounds: OutOfBoundsPolicy,

    pub neighbor_stencil: NeighborStencil,

    /// Whether the collision system records per-phase timings
    pub collect_timings: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: 1.0 / 60.0,
            max_substeps: 10,
            gravity: Vector2::new(0.0, -9.81),
            global_damping: 0.0,
            integrator: IntegratorType::default(),
            grid: GridConfig::default(),
            solver: SolverConfig::default(),
            walls: Walls::default(),
            out_of_bounds: OutOfBoundsPolicy::default(),
            neighbor_stencil: NeighborStencil::default(),
            collect_timings: false,
        }
    }
}

impl SimulationConfig {
    /// Default configuration with the given gravity and time step
    pub fn with_gravity(gravity: Vector2, time_step: f32) -> Self {
        Self {
            gravity,
            time_step,
            ..Self::default()
        }
    }

    /// Checks the configuration for values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        if self.max_substeps == 0 {
            return Err(PhysicsError::InvalidParameter(
                "max_substeps must be at least 1".to_string(),
            ));
        }
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if !self.global_damping.is_finite() || self.global_damping < 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "global damping must be finite and non-negative, got {}",
                self.global_damping
            )));
        }
        self.grid.validate()?;
        self.solver.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = SimulationConfig::default();
        config.time_step = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.grid.cell_size = -1.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.grid.max_x = config.grid.min_x;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.solver.position_correction_percent = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_oversized_grids() {
        let huge = GridConfig::new(Vector2::new(-1e30, -1e30), Vector2::new(1e30, 1e30), 1.0);
        assert!(matches!(huge.validate(), Err(PhysicsError::InvalidParameter(_))));

        // Width overflows to infinity even though every bound is finite
        let wide = GridConfig::new(Vector2::new(-3e38, 0.0), Vector2::new(3e38, 1.0), 1.0);
        assert!(wide.validate().is_err());

        let too_many = GridConfig::new(Vector2::zero(), Vector2::new(1e5, 1e5), 1.0);
        assert!(too_many.validate().is_err());

        let at_limit = GridConfig::new(Vector2::zero(), Vector2::new(4096.0, 4096.0), 1.0);
        assert_eq!(at_limit.cell_counts(), (4096, 4096));
        assert!(at_limit.validate().is_ok());

        let mut config = SimulationConfig::default();
        config.grid = huge;
        assert!(config.validate().is_err());
    }

    #[test]
    fn legacy_stencil_is_prefix_of_half() {
        let half = NeighborStencil::Half.offsets();
        let legacy = NeighborStencil::Legacy.offsets();
        assert_eq!(legacy.len(), 3);
        assert_eq!(&half[..3], legacy);
        assert_eq!(half[3], (-1, 1));
    }

    #[test]
    fn basin_has_no_ceiling() {
        assert!(!Walls::BASIN.contains(Walls::CEILING));
        assert!(Walls::default().contains(Walls::BASIN | Walls::CEILING));
    }
}
