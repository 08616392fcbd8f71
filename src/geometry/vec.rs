// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Vector and plane/line distance helpers

use nalgebra::{Point3, Vector3};

/// Threshold below which a vector is treated as having no direction
pub const DEGENERATE_EPS: f64 = 1e-10;

/// Normalize a vector, returning it unchanged when its length is below
/// the degeneracy threshold
pub fn normalize_or_keep(v: Vector3<f64>) -> Vector3<f64> {
    let len = v.norm();
    if len > DEGENERATE_EPS {
        v / len
    } else {
        v
    }
}

/// Signed distance from a point to the plane through `plane_point` with `normal`
pub fn distance_to_plane(
    point: &Point3<f64>,
    plane_point: &Point3<f64>,
    normal: &Vector3<f64>,
) -> f64 {
    (point - plane_point).dot(normal)
}

/// Distance from a point to the line through `line_point` with `direction`
///
/// A degenerate direction collapses the line to a point.
pub fn distance_to_line(
    point: &Point3<f64>,
    line_point: &Point3<f64>,
    direction: &Vector3<f64>,
) -> f64 {
    if direction.norm_squared() < DEGENERATE_EPS {
        return (point - line_point).norm();
    }
    let t = (point - line_point).dot(direction);
    let foot = line_point + direction * t;
    (point - foot).norm()
}

/// Rotate a vector around the x axis given precomputed sin/cos
pub fn rot_x(v: Vector3<f64>, sin: f64, cos: f64) -> Vector3<f64> {
    Vector3::new(v.x, v.y * cos - v.z * sin, v.y * sin + v.z * cos)
}

/// Rotate a vector around the z axis given precomputed sin/cos
pub fn rot_z(v: Vector3<f64>, sin: f64, cos: f64) -> Vector3<f64> {
    Vector3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cross_antisymmetry() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-2.0, 0.5, 4.0);
        assert_relative_eq!(a.cross(&b), -b.cross(&a));
    }

    #[test]
    fn test_dot_with_normalized_recovers_length() {
        let a = Vector3::new(3.0, -4.0, 12.0);
        let n = normalize_or_keep(a);
        assert_relative_eq!(a.dot(&n), a.norm(), epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_idempotent() {
        let a = normalize_or_keep(Vector3::new(0.3, 0.4, 0.5));
        let twice = normalize_or_keep(a);
        assert_relative_eq!(a, twice, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_degenerate_keeps_vector() {
        let tiny = Vector3::new(1e-12, 0.0, 0.0);
        assert_eq!(normalize_or_keep(tiny), tiny);
    }

    #[test]
    fn test_distance_to_plane_signed() {
        let origin = Point3::origin();
        let up = Vector3::z();
        assert_relative_eq!(distance_to_plane(&Point3::new(1.0, 2.0, 3.0), &origin, &up), 3.0);
        assert_relative_eq!(
            distance_to_plane(&Point3::new(1.0, 2.0, -3.0), &origin, &up),
            -3.0
        );
    }

    #[test]
    fn test_distance_to_line() {
        let d = distance_to_line(
            &Point3::new(0.0, 5.0, 0.0),
            &Point3::origin(),
            &Vector3::x(),
        );
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn test_distance_to_degenerate_line() {
        let d = distance_to_line(
            &Point3::new(3.0, 4.0, 0.0),
            &Point3::origin(),
            &Vector3::zeros(),
        );
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn test_rotations() {
        let (s, c) = std::f64::consts::FRAC_PI_2.sin_cos();
        let v = rot_z(Vector3::x(), s, c);
        assert_relative_eq!(v, Vector3::y(), epsilon = 1e-12);
        let v = rot_x(Vector3::y(), s, c);
        assert_relative_eq!(v, Vector3::z(), epsilon = 1e-12);
    }
}
