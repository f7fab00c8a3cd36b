use crate::collision::CollisionPair;
use crate::core::ParticleStorage;
use crate::math::Vector2;

/// Circle-circle overlap test on squared distances. Touching counts as overlapping.
#[inline]
pub fn circles_overlap(center_a: Vector2, radius_a: f32, center_b: Vector2, radius_b: f32) -> bool {
    let radius_sum = radius_a + radius_b;
    center_a.distance_squared(&center_b) <= radius_sum * radius_sum
}

/// Overlap test for a candidate pair
#[inline]
pub fn pair_overlaps(particles: &ParticleStorage, pair: CollisionPair) -> bool {
    circles_overlap(
        particles.position(pair.a),
        particles.radius[pair.a],
        particles.position(pair.b),
        particles.radius[pair.b],
    )
}
