use crate::math::Vector2;

/// Speeds below this produce no friction drag
pub const FRICTION_SPEED_THRESHOLD: f32 = 1.0e-6;

/// Linear drag opposing motion: `-friction * speed * direction`.
///
/// Zero when the particle is (nearly) at rest, so a resting particle never
/// picks up a direction from rounding noise.
#[inline]
pub fn friction_acceleration(velocity: Vector2, friction: f32) -> Vector2 {
    let speed = velocity.length();
    if speed <= FRICTION_SPEED_THRESHOLD || friction == 0.0 {
        return Vector2::zero();
    }
    let direction = velocity / speed;
    direction * (-friction * speed)
}

/// Velocity scale for exponential damping over one step: `exp(-damping * dt)`
#[inline]
pub fn damping_factor(combined_damping: f32, dt: f32) -> f32 {
    (-combined_damping * dt).exp()
}
