use crate::bodies::{inverse_mass_of, Material, Particle};
use crate::core::{
    GridConfig, NeighborStencil, OutOfBoundsPolicy, ParticleStorage, SimulationConfig,
    SolverConfig, SpatialGrid, Walls, WorldSnapshot,
};
use crate::error::PhysicsError;
use crate::integration::IntegratorType;
use crate::math::Vector2;
use crate::Result;

/// Column-wise initial state for [`World::from_columns`].
///
/// The position columns are required. Every other column may be left empty,
/// in which case each particle gets the default for that field (velocity 0,
/// mass 1, radius 1, restitution 1, damping 0, friction 0).
#[derive(Debug, Clone, Default)]
pub struct ParticleColumns {
    pub position_x: Vec<f32>,
    pub position_y: Vec<f32>,
    pub velocity_x: Vec<f32>,
    pub velocity_y: Vec<f32>,
    pub mass: Vec<f32>,
    pub radius: Vec<f32>,
    pub restitution: Vec<f32>,
    pub damping: Vec<f32>,
    pub friction: Vec<f32>,
}

impl ParticleColumns {
    /// Columns with only positions set
    pub fn from_positions(position_x: Vec<f32>, position_y: Vec<f32>) -> Self {
        Self {
            position_x,
            position_y,
            ..Self::default()
        }
    }

    fn check_lengths(&self) -> Result<usize> {
        let len = self.position_x.len();
        if self.position_y.len() != len {
            return Err(PhysicsError::InvalidParameter(format!(
                "position_y has {} entries, position_x has {}",
                self.position_y.len(),
                len
            )));
        }
        let optional = [
            ("velocity_x", self.velocity_x.len()),
            ("velocity_y", self.velocity_y.len()),
            ("mass", self.mass.len()),
            ("radius", self.radius.len()),
            ("restitution", self.restitution.len()),
            ("damping", self.damping.len()),
            ("friction", self.friction.len()),
        ];
        for (name, column_len) in optional {
            if column_len != 0 && column_len != len {
                return Err(PhysicsError::InvalidParameter(format!(
                    "{} has {} entries, expected 0 or {}",
                    name, column_len, len
                )));
            }
        }
        Ok(len)
    }
}

#[inline]
fn column_or(column: &[f32], index: usize, default: f32) -> f32 {
    column.get(index).copied().unwrap_or(default)
}

/// The simulation state: particle columns, the spatial grid and global tunables.
///
/// Indices are plain positions in the particle columns. They stay valid until
/// the next removal: [`World::remove_particle`] moves the last particle into
/// the removed slot. Removals must not happen while a tick is running.
///
/// Accessors never fail on a bad index. Readers return a neutral default and
/// writers do nothing. [`World::particle`] is the checked alternative.
#[derive(Debug, Clone)]
pub struct World {
    particles: ParticleStorage,
    grid: SpatialGrid,
    config: SimulationConfig,
    time: f32,
    tick_count: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::from_valid_config(SimulationConfig::default())
    }
}

impl World {
    /// Creates an empty world with the default grid and the given gravity and time step
    pub fn new(gravity: Vector2, time_step: f32) -> Self {
        Self::from_valid_config(SimulationConfig::with_gravity(gravity, time_step))
    }

    /// Creates an empty world after validating the configuration
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Creates a world pre-seeded from parallel columns.
    ///
    /// `previous_position` is set to `position - velocity * time_step`, so
    /// every integrator starts from the supplied velocity.
    pub fn from_columns(config: SimulationConfig, columns: ParticleColumns) -> Result<Self> {
        config.validate()?;
        let len = columns.check_lengths()?;

        let mut world = Self::from_valid_config(config);
        world.particles.reserve(len);
        let dt = world.config.time_step;
        let defaults = Material::default();

        for i in 0..len {
            let radius = column_or(&columns.radius, i, 1.0);
            if !radius.is_finite() || radius <= 0.0 {
                return Err(PhysicsError::InvalidParameter(format!(
                    "particle {} has radius {}, must be positive",
                    i, radius
                )));
            }
            let position = Vector2::new(columns.position_x[i], columns.position_y[i]);
            let velocity = Vector2::new(
                column_or(&columns.velocity_x, i, 0.0),
                column_or(&columns.velocity_y, i, 0.0),
            );
            let particle = Particle::new(position, radius, column_or(&columns.mass, i, 1.0))
                .with_implied_velocity(velocity, dt)
                .with_restitution(column_or(&columns.restitution, i, defaults.restitution))
                .with_damping(column_or(&columns.damping, i, defaults.damping))
                .with_friction(column_or(&columns.friction, i, defaults.friction));
            world.add_particle(particle);
        }

        log::debug!("seeded world with {} particles", len);
        Ok(world)
    }

    fn from_valid_config(config: SimulationConfig) -> Self {
        let grid = SpatialGrid::new(&config.grid);
        log::debug!(
            "created world: gravity {}, dt {}, {}x{} grid cells of size {}",
            config.gravity,
            config.time_step,
            grid.info().num_cells_x,
            grid.info().num_cells_y,
            config.grid.cell_size
        );
        Self {
            particles: ParticleStorage::new(),
            grid,
            config,
            time: 0.0,
            tick_count: 0,
        }
    }

    // ---- configuration ----

    /// Returns the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the gravity vector
    pub fn get_gravity(&self) -> Vector2 {
        self.config.gravity
    }

    /// Sets the gravity vector
    pub fn set_gravity(&mut self, gravity: Vector2) {
        self.config.gravity = gravity;
    }

    /// Time step used by `SystemManager::step`
    pub fn get_time_step(&self) -> f32 {
        self.config.time_step
    }

    /// Sets the time step used by `SystemManager::step`
    pub fn set_time_step(&mut self, time_step: f32) {
        self.config.time_step = time_step;
    }

    /// Damping rate applied to every particle on top of its own
    pub fn get_global_damping(&self) -> f32 {
        self.config.global_damping
    }

    /// Sets the global damping rate, in 1/s
    pub fn set_global_damping(&mut self, damping: f32) {
        self.config.global_damping = damping;
    }

    /// Returns the active integrator
    pub fn get_integrator(&self) -> IntegratorType {
        self.config.integrator
    }

    /// Switches the integrator. Takes effect on the next tick without a
    /// velocity jump, since previous positions are kept in sync with velocities.
    pub fn set_integrator(&mut self, integrator: IntegratorType) {
        self.config.integrator = integrator;
    }

    /// Contact solver tunables, editable between ticks
    pub fn solver_config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config.solver
    }

    /// Selects which bounding-box walls contain particles
    pub fn set_walls(&mut self, walls: Walls) {
        self.config.walls = walls;
    }

    /// Sets how the broad phase treats particles outside the grid
    pub fn set_out_of_bounds_policy(&mut self, policy: OutOfBoundsPolicy) {
        self.config.out_of_bounds = policy;
    }

    /// Sets the neighbor cells visited during pair generation
    pub fn set_neighbor_stencil(&mut self, stencil: NeighborStencil) {
        self.config.neighbor_stencil = stencil;
    }

    /// Enables per-phase collision timings
    pub fn set_collect_timings(&mut self, enabled: bool) {
        self.config.collect_timings = enabled;
    }

    /// Replaces the world bounds and cell size, rebuilding the grid
    pub fn set_grid_config(&mut self, grid: GridConfig) -> Result<()> {
        grid.validate()?;
        self.config.grid = grid;
        self.grid.rebuild(&grid);
        log::debug!(
            "rebuilt grid: x [{}, {}], y [{}, {}], {}x{} cells",
            grid.min_x,
            grid.max_x,
            grid.min_y,
            grid.max_y,
            self.grid.info().num_cells_x,
            self.grid.info().num_cells_y
        );
        Ok(())
    }

    // ---- particles ----

    /// Appends a particle and returns its index.
    ///
    /// The caller decides `previous_position`: equal to `position` for zero
    /// implied velocity, or `position - velocity * dt` to start Verlet moving.
    pub fn add_particle(&mut self, particle: Particle) -> usize {
        if !particle.radius.is_finite() || particle.radius <= 0.0 {
            log::warn!("adding particle with non-positive radius {}", particle.radius);
        } else if particle.radius * 2.0 > self.config.grid.cell_size {
            log::warn!(
                "particle diameter {} exceeds cell size {}; some contacts may be missed",
                particle.radius * 2.0,
                self.config.grid.cell_size
            );
        }
        if particle.inverse_mass > 0.0 && !particle.mass.is_finite() {
            log::warn!("adding dynamic particle with non-finite mass {}", particle.mass);
        }
        self.particles.push(&particle)
    }

    /// Removes a particle in O(1). The last particle takes over `index`.
    /// Returns `None` and does nothing when `index` is out of range.
    pub fn remove_particle(&mut self, index: usize) -> Option<Particle> {
        self.particles.swap_remove(index)
    }

    /// Removes every particle and resets the clock
    pub fn clear(&mut self) {
        self.particles.clear();
        self.grid.clear();
        self.time = 0.0;
        self.tick_count = 0;
    }

    /// Returns the number of particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if the world holds no particles
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Copies out every field of one particle
    pub fn get_particle(&self, index: usize) -> Option<Particle> {
        self.particles.get(index)
    }

    /// Checked variant of [`World::get_particle`]
    pub fn particle(&self, index: usize) -> Result<Particle> {
        self.particles.get(index).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!(
                "particle {} not found ({} particles)",
                index,
                self.particles.len()
            ))
        })
    }

    /// Iterates over every particle in index order
    pub fn iter_particles(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.particles.len()).filter_map(move |i| self.particles.get(i))
    }

    /// Read-only column views
    pub fn particles(&self) -> &ParticleStorage {
        &self.particles
    }

    /// Mutable column views for live tuning.
    ///
    /// Editing `mass` requires editing `inverse_mass` to match, and editing a
    /// velocity under the Verlet integrator requires re-deriving the previous position.
    pub fn particles_mut(&mut self) -> &mut ParticleStorage {
        &mut self.particles
    }

    /// The spatial grid as populated by the last collision pass
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Flat grid cell of a position, `None` outside the grid
    pub fn cell_of(&self, position: Vector2) -> Option<usize> {
        self.grid.cell_of(position)
    }

    /// Current position, zero vector when out of range
    pub fn get_position(&self, index: usize) -> Vector2 {
        if index < self.particles.len() {
            self.particles.position(index)
        } else {
            Vector2::zero()
        }
    }

    /// Teleports a particle: sets the position, snaps the previous position to
    /// it and zeroes the velocity, so the move carries no implied velocity.
    pub fn set_position(&mut self, index: usize, position: Vector2) {
        if index >= self.particles.len() {
            return;
        }
        self.particles.set_position(index, position);
        self.particles.set_previous_position(index, position);
        self.particles.set_velocity(index, Vector2::zero());
    }

    /// Position one tick ago, zero when out of range
    pub fn get_previous_position(&self, index: usize) -> Vector2 {
        if index < self.particles.len() {
            self.particles.previous_position(index)
        } else {
            Vector2::zero()
        }
    }

    /// Velocity, zero when out of range
    pub fn get_velocity(&self, index: usize) -> Vector2 {
        if index < self.particles.len() {
            self.particles.velocity(index)
        } else {
            Vector2::zero()
        }
    }

    /// Sets the velocity and re-derives the previous position using the world time step
    pub fn set_velocity(&mut self, index: usize, velocity: Vector2) {
        if index >= self.particles.len() {
            return;
        }
        self.particles.set_velocity(index, velocity);
        self.particles.sync_previous_position(index, self.config.time_step);
    }

    /// Persisted non-gravity acceleration, zero when out of range
    pub fn get_acceleration(&self, index: usize) -> Vector2 {
        if index < self.particles.len() {
            self.particles.acceleration(index)
        } else {
            Vector2::zero()
        }
    }

    /// Sets the persisted non-gravity acceleration
    pub fn set_acceleration(&mut self, index: usize, acceleration: Vector2) {
        if index >= self.particles.len() {
            return;
        }
        self.particles.acceleration_x[index] = acceleration.x;
        self.particles.acceleration_y[index] = acceleration.y;
    }

    /// Mass, 0 when out of range
    pub fn get_mass(&self, index: usize) -> f32 {
        self.particles.mass.get(index).copied().unwrap_or(0.0)
    }

    /// Sets the mass and the matching inverse mass (`mass <= 0` makes the particle static)
    pub fn set_mass(&mut self, index: usize, mass: f32) {
        if index >= self.particles.len() {
            return;
        }
        self.particles.mass[index] = mass;
        self.particles.inverse_mass[index] = inverse_mass_of(mass);
    }

    /// Inverse mass, 0 when out of range
    pub fn get_inverse_mass(&self, index: usize) -> f32 {
        self.particles.inverse_mass.get(index).copied().unwrap_or(0.0)
    }

    /// True for static particles; also true when out of range
    pub fn is_static(&self, index: usize) -> bool {
        self.get_inverse_mass(index) <= 0.0
    }

    /// Radius, 0 when out of range
    pub fn get_radius(&self, index: usize) -> f32 {
        self.particles.radius.get(index).copied().unwrap_or(0.0)
    }

    /// Sets the radius
    pub fn set_radius(&mut self, index: usize, radius: f32) {
        if let Some(slot) = self.particles.radius.get_mut(index) {
            *slot = radius;
        }
    }

    /// Restitution, 1.0 when out of range
    pub fn get_restitution(&self, index: usize) -> f32 {
        self.particles.restitution.get(index).copied().unwrap_or(1.0)
    }

    /// Sets the restitution
    pub fn set_restitution(&mut self, index: usize, restitution: f32) {
        if let Some(slot) = self.particles.restitution.get_mut(index) {
            *slot = restitution;
        }
    }

    /// Damping, 0.0 when out of range
    pub fn get_damping(&self, index: usize) -> f32 {
        self.particles.damping.get(index).copied().unwrap_or(0.0)
    }

    /// Sets the per-particle damping rate
    pub fn set_damping(&mut self, index: usize, damping: f32) {
        if let Some(slot) = self.particles.damping.get_mut(index) {
            *slot = damping;
        }
    }

    /// Friction, 0.0 when out of range
    pub fn get_friction(&self, index: usize) -> f32 {
        self.particles.friction.get(index).copied().unwrap_or(0.0)
    }

    /// Sets the linear drag coefficient
    pub fn set_friction(&mut self, index: usize, friction: f32) {
        if let Some(slot) = self.particles.friction.get_mut(index) {
            *slot = friction;
        }
    }

    /// Copies restitution, friction and damping from a material preset
    pub fn set_material(&mut self, index: usize, material: Material) {
        if index >= self.particles.len() {
            return;
        }
        self.particles.restitution[index] = material.restitution;
        self.particles.friction[index] = material.friction;
        self.particles.damping[index] = material.damping;
    }

    // ---- aggregates ----

    /// Sum of `mass * velocity` over dynamic particles
    pub fn total_momentum(&self) -> Vector2 {
        self.iter_particles()
            .fold(Vector2::zero(), |sum, particle| sum + particle.momentum())
    }

    /// Sum of `0.5 * mass * |velocity|^2` over dynamic particles
    pub fn kinetic_energy(&self) -> f32 {
        self.iter_particles()
            .filter(|particle| !particle.is_static())
            .map(|particle| 0.5 * particle.mass * particle.velocity.length_squared())
            .sum()
    }

    /// Reports the first particle whose position or velocity is no longer finite.
    /// Ticks never check this themselves; call it between ticks.
    pub fn check_state(&self) -> Result<()> {
        if !self.particles.is_consistent() {
            return Err(PhysicsError::InternalError(
                "particle columns have diverging lengths".to_string(),
            ));
        }
        for i in 0..self.particles.len() {
            if !self.particles.position(i).is_finite() || !self.particles.velocity(i).is_finite() {
                return Err(PhysicsError::SimulationError(format!(
                    "particle {} has a non-finite position or velocity",
                    i
                )));
            }
        }
        Ok(())
    }

    // ---- snapshots ----

    /// Captures every particle and the clock
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            particles: self.iter_particles().collect(),
            time: self.time,
            tick_count: self.tick_count,
        }
    }

    /// Replaces every particle with the snapshot's.
    ///
    /// Inverse masses are recomputed from masses, and previous positions are
    /// re-derived from velocities with the world time step.
    pub fn restore(&mut self, snapshot: &WorldSnapshot) {
        self.particles.clear();
        self.particles.reserve(snapshot.len());
        for particle in snapshot.prepared(self.config.time_step) {
            self.particles.push(&particle);
        }
        self.grid.clear();
        self.time = snapshot.time;
        self.tick_count = snapshot.tick_count;
        log::debug!("restored snapshot with {} particles", snapshot.len());
    }

    // ---- clock ----

    /// Simulated seconds elapsed
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Ticks run through a `SystemManager`
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub(crate) fn advance_clock(&mut self, dt: f32) {
        self.time += dt;
        self.tick_count += 1;
    }

    /// Disjoint borrows for the systems: configuration, particles, grid
    pub(crate) fn parts_mut(&mut self) -> (&SimulationConfig, &mut ParticleStorage, &mut SpatialGrid) {
        (&self.config, &mut self.particles, &mut self.grid)
    }
}
