use crate::core::{GridConfig, ParticleStorage, SolverConfig, Walls};

/// Keeps dynamic particles inside the enabled walls of the world rectangle.
///
/// A particle whose circle crosses a wall is moved just inside it, and if its
/// velocity points out through that wall the component is reflected and
/// scaled by the particle's restitution. Returns the number of particles that
/// touched at least one wall.
pub fn contain_particles(
    particles: &mut ParticleStorage,
    bounds: &GridConfig,
    walls: Walls,
    solver: &SolverConfig,
    dt: f32,
) -> usize {
    if walls.is_empty() {
        return 0;
    }

    let nudge = solver.boundary_nudge;
    let mut contained = 0;
    for i in 0..particles.len() {
        if !particles.is_dynamic(i) {
            continue;
        }

        let radius = particles.radius[i];
        let restitution = particles.restitution[i];
        let mut position = particles.position(i);
        let mut velocity = particles.velocity(i);
        let mut touched = false;

        if walls.contains(Walls::LEFT) && position.x - radius < bounds.min_x {
            position.x = bounds.min_x + radius + nudge;
            if velocity.x < 0.0 {
                velocity.x = -velocity.x * restitution;
            }
            touched = true;
        }
        if walls.contains(Walls::RIGHT) && position.x + radius > bounds.max_x {
            position.x = bounds.max_x - radius - nudge;
            if velocity.x > 0.0 {
                velocity.x = -velocity.x * restitution;
            }
            touched = true;
        }
        if walls.contains(Walls::GROUND) && position.y - radius < bounds.min_y {
            position.y = bounds.min_y + radius + nudge;
            if velocity.y < 0.0 {
                velocity.y = -velocity.y * restitution;
            }
            touched = true;
        }
        if walls.contains(Walls::CEILING) && position.y + radius > bounds.max_y {
            position.y = bounds.max_y - radius - nudge;
            if velocity.y > 0.0 {
                velocity.y = -velocity.y * restitution;
            }
            touched = true;
        }

        if touched {
            particles.set_position(i, position);
            particles.set_velocity(i, velocity.snapped(solver.velocity_epsilon));
            particles.sync_previous_position(i, dt);
            contained += 1;
        }
    }
    contained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Particle;
    use crate::math::Vector2;
    use approx::assert_relative_eq;

    fn bounds() -> GridConfig {
        GridConfig::new(Vector2::new(0.0, 0.0), Vector2::new(10.0, 10.0), 2.0)
    }

    fn single(particle: Particle) -> ParticleStorage {
        let mut storage = ParticleStorage::new();
        storage.push(&particle);
        storage
    }

    #[test]
    fn ground_reflects_with_restitution() {
        let mut particles = single(
            Particle::new(Vector2::new(5.0, 0.5), 1.0, 1.0)
                .with_velocity(Vector2::new(0.0, -4.0))
                .with_restitution(0.5),
        );
        let touched = contain_particles(&mut particles, &bounds(), Walls::all(), &SolverConfig::default(), 0.1);
        assert_eq!(touched, 1);
        assert_relative_eq!(particles.position_y[0], 1.0001, epsilon = 1e-6);
        assert_relative_eq!(particles.velocity_y[0], 2.0);
        assert_relative_eq!(particles.previous_position_y[0], 1.0001 - 0.2, epsilon = 1e-6);
    }

    #[test]
    fn inward_velocity_is_kept() {
        let mut particles = single(
            Particle::new(Vector2::new(9.5, 5.0), 1.0, 1.0).with_velocity(Vector2::new(-3.0, 0.0)),
        );
        contain_particles(&mut particles, &bounds(), Walls::all(), &SolverConfig::default(), 0.1);
        assert_relative_eq!(particles.position_x[0], 8.9999, epsilon = 1e-6);
        assert_eq!(particles.velocity_x[0], -3.0);
    }

    #[test]
    fn disabled_walls_do_nothing() {
        let mut particles = single(
            Particle::new(Vector2::new(5.0, 12.0), 1.0, 1.0).with_velocity(Vector2::new(0.0, 3.0)),
        );
        let touched = contain_particles(&mut particles, &bounds(), Walls::BASIN, &SolverConfig::default(), 0.1);
        assert_eq!(touched, 0);
        assert_eq!(particles.position_y[0], 12.0);
        assert_eq!(particles.velocity_y[0], 3.0);
    }

    #[test]
    fn static_particles_are_ignored() {
        let mut particles = single(Particle::new_static(Vector2::new(-5.0, -5.0), 1.0));
        let touched = contain_particles(&mut particles, &bounds(), Walls::all(), &SolverConfig::default(), 0.1);
        assert_eq!(touched, 0);
        assert_eq!(particles.position(0), Vector2::new(-5.0, -5.0));
    }
}
