use crate::core::World;
use crate::forces::{damping_factor, total_acceleration};
use crate::integration::KinematicState;

/// Advances every dynamic particle by one tick with the world's integrator.
///
/// Per particle: gravity, stored acceleration and friction drag are summed,
/// the integrator runs, velocity decays by `exp(-(global + own damping) * dt)`
/// and the previous position is re-derived from the damped velocity. The last
/// step is what makes damping visible to position Verlet.
///
/// Static particles are skipped entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "movement"
    }

    pub fn update(&mut self, world: &mut World, dt: f32) {
        let (config, particles, _) = world.parts_mut();
        let integrator = config.integrator;
        let gravity = config.gravity;
        let global_damping = config.global_damping;

        for i in 0..particles.len() {
            if particles.inverse_mass[i] <= 0.0 {
                continue;
            }

            let velocity = particles.velocity(i);
            let acceleration = total_acceleration(gravity, particles.acceleration(i), velocity, particles.friction[i]);

            let mut state = KinematicState {
                position: particles.position(i),
                previous_position: particles.previous_position(i),
                velocity,
            };
            integrator.integrate(&mut state, acceleration, dt);

            let velocity = state.velocity * damping_factor(global_damping + particles.damping[i], dt);
            particles.set_position(i, state.position);
            particles.set_velocity(i, velocity);
            particles.sync_previous_position(i, dt);
        }
    }
}
