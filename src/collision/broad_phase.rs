use crate::collision::CollisionPair;
use crate::core::{NeighborStencil, OutOfBoundsPolicy, ParticleStorage, SpatialGrid};

/// Uniform-grid broad phase.
///
/// Each tick the grid is refilled from particle centers, then candidate pairs
/// are enumerated cell by cell in flat index order: first every pair inside
/// the cell (insertion order, `i < j`), then every particle of the cell
/// against every particle of each stencil neighbor, in stencil order. Each
/// unordered cell pair is visited once, so no pair is emitted twice.
///
/// Completeness needs `cell_size >= 2 * max_radius`: overlapping circles then
/// always sit in the same or adjacent cells.
#[derive(Debug, Clone, Default)]
pub struct UniformGridBroadPhase {
    pairs: Vec<CollisionPair>,
}

impl UniformGridBroadPhase {
    /// Creates a new grid broad phase
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the grid and inserts every particle at the cell of its center.
    /// Returns the number of particles indexed.
    pub fn populate_grid(grid: &mut SpatialGrid, particles: &ParticleStorage, policy: OutOfBoundsPolicy) -> usize {
        grid.clear();
        let mut indexed = 0;
        for i in 0..particles.len() {
            let position = particles.position(i);
            let cell = match policy {
                OutOfBoundsPolicy::Ignore => grid.info().cell_of(position),
                OutOfBoundsPolicy::ClampToEdge => grid.info().clamped_cell_of(position),
            };
            if let Some(cell) = cell {
                grid.insert(cell, i);
                indexed += 1;
            }
        }
        indexed
    }

    /// Enumerates candidate pairs from a populated grid, dropping pairs where both particles are static
    pub fn update(&mut self, grid: &SpatialGrid, particles: &ParticleStorage, stencil: NeighborStencil) {
        self.pairs.clear();
        let info = grid.info();
        let inverse_mass = particles.inverse_mass();
        let push = |pairs: &mut Vec<CollisionPair>, a: usize, b: usize| {
            if inverse_mass[a] <= 0.0 && inverse_mass[b] <= 0.0 {
                return;
            }
            pairs.push(CollisionPair::new(a, b));
        };

        for cell in 0..grid.cell_count() {
            let current = grid.cell(cell);
            if current.is_empty() {
                continue;
            }

            for (i, &a) in current.iter().enumerate() {
                for &b in &current[i + 1..] {
                    push(&mut self.pairs, a, b);
                }
            }

            for &(dx, dy) in stencil.offsets() {
                let Some(neighbor) = info.offset_cell(cell, dx, dy) else {
                    continue;
                };
                let neighbors = grid.cell(neighbor);
                for &a in current {
                    for &b in neighbors {
                        push(&mut self.pairs, a, b);
                    }
                }
            }
        }
    }

    /// Candidate pairs from the last update, in resolution order
    pub fn pairs(&self) -> &[CollisionPair] {
        &self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Particle;
    use crate::core::GridConfig;
    use crate::math::Vector2;

    fn setup(points: &[(f32, f32, f32)]) -> (SpatialGrid, ParticleStorage) {
        let grid = SpatialGrid::new(&GridConfig::new(Vector2::zero(), Vector2::new(20.0, 20.0), 5.0));
        let mut particles = ParticleStorage::new();
        for &(x, y, mass) in points {
            particles.push(&Particle::new(Vector2::new(x, y), 1.0, mass));
        }
        (grid, particles)
    }

    fn run(points: &[(f32, f32, f32)], stencil: NeighborStencil) -> Vec<CollisionPair> {
        let (mut grid, particles) = setup(points);
        UniformGridBroadPhase::populate_grid(&mut grid, &particles, OutOfBoundsPolicy::Ignore);
        let mut broad_phase = UniformGridBroadPhase::new();
        broad_phase.update(&grid, &particles, stencil);
        broad_phase.pairs().to_vec()
    }

    #[test]
    fn same_cell_pairs_come_before_neighbor_pairs() {
        // 0 and 1 share cell (0,0); 2 is in (1,0)
        let pairs = run(&[(1.0, 1.0, 1.0), (2.0, 1.0, 1.0), (6.0, 1.0, 1.0)], NeighborStencil::Half);
        assert_eq!(
            pairs,
            vec![CollisionPair::new(0, 1), CollisionPair::new(0, 2), CollisionPair::new(1, 2)]
        );
    }

    #[test]
    fn neighbors_follow_stencil_order() {
        // 0 at (0,0); 1 right (1,0); 2 up (0,1); 3 diagonal (1,1)
        let pairs = run(
            &[(4.0, 4.0, 1.0), (6.0, 4.0, 1.0), (4.0, 6.0, 1.0), (6.0, 6.0, 1.0)],
            NeighborStencil::Half,
        );
        assert_eq!(
            &pairs[..3],
            &[CollisionPair::new(0, 1), CollisionPair::new(0, 2), CollisionPair::new(0, 3)]
        );
        // every unordered pair exactly once
        let mut unordered: Vec<_> = pairs.iter().map(CollisionPair::unordered).collect();
        unordered.sort();
        assert_eq!(unordered, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn legacy_stencil_misses_anti_diagonal() {
        // 0 in (1,0), 1 in (0,1)
        let points = [(5.5, 4.5, 1.0), (4.5, 5.5, 1.0)];
        assert!(run(&points, NeighborStencil::Legacy).is_empty());
        assert_eq!(run(&points, NeighborStencil::Half), vec![CollisionPair::new(0, 1)]);
    }

    #[test]
    fn static_pairs_are_dropped() {
        let pairs = run(&[(1.0, 1.0, 0.0), (2.0, 1.0, 0.0), (3.0, 1.0, 1.0)], NeighborStencil::Half);
        assert_eq!(pairs, vec![CollisionPair::new(0, 2), CollisionPair::new(1, 2)]);
    }

    #[test]
    fn negative_inverse_mass_counts_as_static() {
        let (mut grid, mut particles) = setup(&[(1.0, 1.0, 1.0), (2.0, 1.0, 1.0)]);
        particles.inverse_mass_mut()[0] = -1.0;
        particles.inverse_mass_mut()[1] = 0.0;
        UniformGridBroadPhase::populate_grid(&mut grid, &particles, OutOfBoundsPolicy::Ignore);
        let mut broad_phase = UniformGridBroadPhase::new();
        broad_phase.update(&grid, &particles, NeighborStencil::Half);
        assert!(broad_phase.pairs().is_empty());
    }

    #[test]
    fn out_of_bounds_particles_follow_policy() {
        let (mut grid, particles) = setup(&[(-1.0, 1.0, 1.0), (0.5, 1.0, 1.0)]);
        assert_eq!(UniformGridBroadPhase::populate_grid(&mut grid, &particles, OutOfBoundsPolicy::Ignore), 1);
        assert_eq!(grid.cell(0), &[1]);

        assert_eq!(
            UniformGridBroadPhase::populate_grid(&mut grid, &particles, OutOfBoundsPolicy::ClampToEdge),
            2
        );
        assert_eq!(grid.cell(0), &[0, 1]);
    }
}
