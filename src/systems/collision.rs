use crate::collision::{contain_particles, pair_overlaps, CollisionPair, SequentialImpulseSolver, UniformGridBroadPhase};
use crate::core::{CollisionTimings, ScopedTimer, World};

/// Counters from the most recent collision tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Particles that landed in a grid cell
    pub indexed_particles: usize,

    /// Pairs produced by the broad phase
    pub candidate_pairs: usize,

    /// Candidate pairs whose circles overlap
    pub overlapping_pairs: usize,

    /// Overlapping pairs that produced a contact
    pub resolved_contacts: usize,

    /// Particles pushed back inside a wall
    pub boundary_contacts: usize,
}

/// Detects and resolves particle contacts, then contains particles inside the walls.
///
/// A tick runs four phases in fixed order: refill the grid, enumerate
/// candidate pairs, test and resolve each overlapping pair immediately, and
/// apply wall containment. Nothing carries over between ticks except buffer
/// allocations and the diagnostics.
#[derive(Debug, Clone, Default)]
pub struct CollisionSystem {
    broad_phase: UniformGridBroadPhase,
    timings: CollisionTimings,
    stats: CollisionStats,
}

impl CollisionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &'static str {
        "collision"
    }

    pub fn update(&mut self, world: &mut World, dt: f32) {
        let (config, particles, grid) = world.parts_mut();
        let timed = config.collect_timings;
        let solver = SequentialImpulseSolver::new(config.solver);
        let mut stats = CollisionStats::default();

        {
            let _timer = ScopedTimer::new(&mut self.timings.grid, timed);
            stats.indexed_particles = UniformGridBroadPhase::populate_grid(grid, particles, config.out_of_bounds);
        }

        {
            let _timer = ScopedTimer::new(&mut self.timings.broad_phase, timed);
            self.broad_phase.update(grid, particles, config.neighbor_stencil);
        }
        stats.candidate_pairs = self.broad_phase.pairs().len();

        {
            let _timer = ScopedTimer::new(&mut self.timings.narrow_phase, timed);
            for &pair in self.broad_phase.pairs() {
                if !pair_overlaps(particles, pair) {
                    continue;
                }
                stats.overlapping_pairs += 1;
                if solver.resolve_contact(particles, pair, dt).is_some() {
                    stats.resolved_contacts += 1;
                }
            }
        }

        {
            let _timer = ScopedTimer::new(&mut self.timings.boundary, timed);
            stats.boundary_contacts = contain_particles(particles, &config.grid, config.walls, &config.solver, dt);
        }

        self.stats = stats;
    }

    /// Broad-phase output of the last tick, in resolution order
    pub fn candidate_pairs(&self) -> &[CollisionPair] {
        self.broad_phase.pairs()
    }

    /// Per-phase timings, recorded only while `collect_timings` is enabled
    pub fn timings(&self) -> &CollisionTimings {
        &self.timings
    }

    pub fn reset_timings(&mut self) {
        self.timings.reset();
    }

    pub fn last_stats(&self) -> CollisionStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Particle;
    use crate::math::Vector2;

    #[test]
    fn stats_count_each_phase() {
        let mut world = World::new(Vector2::zero(), 0.016);
        world.add_particle(Particle::new(Vector2::new(-1.0, 0.0), 1.0, 1.0).with_velocity(Vector2::new(1.0, 0.0)));
        world.add_particle(Particle::new(Vector2::new(0.9, 0.0), 1.0, 1.0).with_velocity(Vector2::new(-1.0, 0.0)));
        world.add_particle(Particle::new(Vector2::new(50.0, 50.0), 1.0, 1.0));

        let mut system = CollisionSystem::new();
        system.update(&mut world, 0.016);

        let stats = system.last_stats();
        assert_eq!(stats.indexed_particles, 3);
        assert_eq!(stats.candidate_pairs, 1);
        assert_eq!(stats.overlapping_pairs, 1);
        assert_eq!(stats.resolved_contacts, 1);
        assert_eq!(stats.boundary_contacts, 0);
        assert_eq!(system.candidate_pairs(), &[CollisionPair::new(0, 1)]);
    }

    #[test]
    fn timings_follow_config_flag() {
        let mut world = World::new(Vector2::zero(), 0.016);
        world.add_particle(Particle::new(Vector2::zero(), 1.0, 1.0));
        let mut system = CollisionSystem::new();

        system.update(&mut world, 0.016);
        assert_eq!(system.timings().grid.count(), 0);

        world.set_collect_timings(true);
        system.update(&mut world, 0.016);
        system.update(&mut world, 0.016);
        assert_eq!(system.timings().grid.count(), 2);
        assert_eq!(system.timings().boundary.count(), 2);

        system.reset_timings();
        assert_eq!(system.timings().narrow_phase.count(), 0);
    }
}
