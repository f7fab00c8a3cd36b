use phys_particles::math::{self, Vector2};
use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra as na;

#[test]
fn test_vector2_operations() {
    let v1 = Vector2::new(1.0, 2.0);
    let v2 = Vector2::new(4.0, 6.0);

    // Addition
    let sum = v1 + v2;
    assert_eq!(sum.x, 5.0);
    assert_eq!(sum.y, 8.0);

    // Subtraction
    let diff = v2 - v1;
    assert_eq!(diff, Vector2::new(3.0, 4.0));

    // Scalar multiplication, both sides
    assert_eq!(v1 * 2.0, Vector2::new(2.0, 4.0));
    assert_eq!(2.0 * v1, Vector2::new(2.0, 4.0));
    assert_eq!(v2 / 2.0, Vector2::new(2.0, 3.0));
    assert_eq!(-v1, Vector2::new(-1.0, -2.0));

    // Dot product
    assert_eq!(v1.dot(&v2), 1.0 * 4.0 + 2.0 * 6.0);

    // Length and distance
    assert_eq!(diff.length(), 5.0);
    assert_eq!(diff.length_squared(), 25.0);
    assert_eq!(v1.distance(&v2), 5.0);
    assert_eq!(v1.distance_squared(&v2), 25.0);

    // Normalize
    let normalized = v2.normalize();
    assert_relative_eq!(normalized.length(), 1.0);
    assert_relative_eq!(normalized.x, v2.x / v2.length());
    assert_relative_eq!(normalized.y, v2.y / v2.length());
}

#[test]
fn test_vector2_assign_operators() {
    let mut v = Vector2::new(1.0, 1.0);
    v += Vector2::new(2.0, 3.0);
    assert_eq!(v, Vector2::new(3.0, 4.0));
    v -= Vector2::unit_x();
    assert_eq!(v, Vector2::new(2.0, 4.0));
    v *= 0.5;
    assert_eq!(v, Vector2::new(1.0, 2.0));
    v /= 2.0;
    assert_eq!(v, Vector2::new(0.5, 1.0));
}

#[test]
fn test_zero_vector_normalize_is_unchanged() {
    let tiny = Vector2::new(1e-8, 0.0);
    assert_eq!(tiny.normalize(), tiny);
    assert_eq!(Vector2::zero().normalize(), Vector2::zero());
    assert!(Vector2::zero().is_zero());
}

#[test]
fn test_snapping() {
    let v = Vector2::new(5e-4, -2.0).snapped(1e-3);
    assert_eq!(v, Vector2::new(0.0, -2.0));

    assert_eq!(math::snap_to_zero(-9e-4, 1e-3), 0.0);
    assert_eq!(math::snap_to_zero(1e-3, 1e-3), 1e-3);
    assert!(math::approx_zero(5e-7));
    assert!(math::approx_eq(1.0, 1.0 + 5e-7));
}

#[test]
fn test_finite_checks() {
    assert!(Vector2::new(1.0, -1.0).is_finite());
    assert!(!Vector2::new(f32::NAN, 0.0).is_finite());
    assert!(!Vector2::new(0.0, f32::INFINITY).is_finite());
}

#[test]
fn test_lerp() {
    let a = Vector2::new(0.0, 10.0);
    let b = Vector2::new(10.0, 0.0);
    assert_eq!(a.lerp(&b, 0.0), a);
    assert_eq!(a.lerp(&b, 1.0), b);
    assert_relative_eq!(a.lerp(&b, 0.25), Vector2::new(2.5, 7.5));
}

#[test]
fn test_conversions() {
    let v: Vector2 = [3.0, 4.0].into();
    assert_eq!(v, Vector2::new(3.0, 4.0));
    let v: Vector2 = (3.0, 4.0).into();
    assert_eq!(v, Vector2::new(3.0, 4.0));
    let array: [f32; 2] = v.into();
    assert_eq!(array, [3.0, 4.0]);
    assert_eq!(v.to_string(), "(3, 4)");
}

#[test]
fn test_nalgebra_interop() {
    let v = Vector2::new(3.0, -4.0);
    let na_v: na::Vector2<f32> = v.into();
    assert_eq!(na_v, na::Vector2::new(3.0, -4.0));
    assert_eq!(Vector2::from(na_v), v);

    // Both agree on the basic operations
    let other = Vector2::new(0.5, 2.0);
    assert_relative_eq!(v.dot(&other), na_v.dot(&other.to_nalgebra()));
    assert_relative_eq!(v.length(), na_v.norm());
    assert_relative_eq!(v.normalize(), Vector2::from_nalgebra(&na_v.normalize()), epsilon = 1e-6);
}

#[test]
fn test_approx_comparisons() {
    let a = Vector2::new(1.0, 2.0);
    let b = Vector2::new(1.0 + 1e-7, 2.0 - 1e-7);
    assert_abs_diff_eq!(a, b, epsilon = 1e-6);
    assert_relative_eq!(a, b, epsilon = 1e-6);
    assert!(!approx::abs_diff_eq!(a, Vector2::new(1.1, 2.0), epsilon = 1e-3));
}
