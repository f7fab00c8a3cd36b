use crate::forces::friction_acceleration;
use crate::math::Vector2;

/// Acceleration acting on one dynamic particle during a step.
///
/// Gravity is added fresh every step and never persisted; `external` is the
/// particle's stored non-gravity acceleration. Velocity damping is not part of
/// this sum: it is applied afterwards as an exponential decay.
#[inline]
pub fn total_acceleration(gravity: Vector2, external: Vector2, velocity: Vector2, friction: f32) -> Vector2 {
    gravity + external + friction_acceleration(velocity, friction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_gravity_external_and_drag() {
        let acceleration = total_acceleration(
            Vector2::new(0.0, -10.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(4.0, 0.0),
            0.5,
        );
        assert_eq!(acceleration, Vector2::new(0.0, -10.0));
    }
}
