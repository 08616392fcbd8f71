// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Adaptive sizing field consulted by triangulation quality checks
//!
//! The field is an explicit value object owned by the model and passed by
//! reference into the triangulator, so quality evaluation stays testable in
//! isolation.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Gradient-driven mesh sizing policy with optional point samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingField {
    gradient: f64,
    base_size: f64,
    sample_points: Vec<[f64; 2]>,
    sample_sizes: Vec<f64>,
}

impl SizingField {
    pub fn new(gradient: f64, base_size: f64) -> Self {
        Self {
            gradient,
            base_size,
            sample_points: Vec::new(),
            sample_sizes: Vec::new(),
        }
    }

    /// Replace the whole field: gradient, base size, and the sample arrays.
    /// Mismatched sample lengths are truncated to the shorter array.
    pub fn update(
        &mut self,
        gradient: f64,
        base_size: f64,
        sample_points: &[[f64; 2]],
        sample_sizes: &[f64],
    ) {
        let n = sample_points.len().min(sample_sizes.len());
        self.gradient = gradient;
        self.base_size = base_size;
        self.sample_points = sample_points[..n].to_vec();
        self.sample_sizes = sample_sizes[..n].to_vec();
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    pub fn base_size(&self) -> f64 {
        self.base_size
    }

    pub fn sample_count(&self) -> usize {
        self.sample_points.len()
    }

    /// Accept a triangle when its longest edge stays within 150% of the
    /// desired size at its centroid and its smallest interior angle stays
    /// above the gradient-relaxed threshold.
    pub fn is_triangle_suitable(
        &self,
        v1: &Point3<f64>,
        v2: &Point3<f64>,
        v3: &Point3<f64>,
    ) -> bool {
        let centroid = Point3::new(
            (v1.x + v2.x + v3.x) / 3.0,
            (v1.y + v2.y + v3.y) / 3.0,
            (v1.z + v2.z + v3.z) / 3.0,
        );
        let desired_size = self.base_size * (1.0 + self.gradient * centroid.coords.norm());

        let e1 = (v2 - v1).norm();
        let e2 = (v3 - v2).norm();
        let e3 = (v1 - v3).norm();
        let max_edge = e1.max(e2).max(e3);

        let min_angle = min_angle_degrees(v1, v2, v3);
        let min_angle_threshold = 20.0 * (1.0 - self.gradient * 0.25);

        max_edge <= desired_size * 1.5 && min_angle >= min_angle_threshold
    }
}

impl Default for SizingField {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Smallest interior angle of a triangle, in degrees
fn min_angle_degrees(v1: &Point3<f64>, v2: &Point3<f64>, v3: &Point3<f64>) -> f64 {
    let e1 = v2 - v1;
    let e2 = v3 - v2;
    let e3 = v1 - v3;

    let l1 = e1.norm();
    let l2 = e2.norm();
    let l3 = e3.norm();

    let a1 = (-e1.dot(&e3) / (l1 * l3)).acos().to_degrees();
    let a2 = (-e1.dot(&e2) / (l1 * l2)).acos().to_degrees();
    let a3 = (-e2.dot(&e3) / (l2 * l3)).acos().to_degrees();

    a1.min(a2).min(a3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_min_angle_equilateral() {
        let h = 3.0_f64.sqrt() / 2.0;
        let angle = min_angle_degrees(
            &Point3::origin(),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.5, h, 0.0),
        );
        assert_relative_eq!(angle, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_well_shaped_triangle_near_origin_is_suitable() {
        let field = SizingField::new(1.0, 1.0);
        let h = 3.0_f64.sqrt() / 2.0;
        assert!(field.is_triangle_suitable(
            &Point3::origin(),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.5, h, 0.0),
        ));
    }

    #[test]
    fn test_oversized_triangle_rejected() {
        let field = SizingField::new(0.0, 1.0);
        // Edges of length 10 against a flat desired size of 1.0
        assert!(!field.is_triangle_suitable(
            &Point3::origin(),
            &Point3::new(10.0, 0.0, 0.0),
            &Point3::new(5.0, 8.0, 0.0),
        ));
    }

    #[test]
    fn test_sliver_triangle_rejected() {
        let field = SizingField::new(0.0, 100.0);
        // Huge allowed size, but a near-degenerate angle
        assert!(!field.is_triangle_suitable(
            &Point3::origin(),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.5, 0.001, 0.0),
        ));
    }

    #[test]
    fn test_update_replaces_field() {
        let mut field = SizingField::default();
        field.update(0.5, 2.0, &[[0.0, 0.0], [1.0, 1.0]], &[0.1, 0.2]);
        assert_relative_eq!(field.gradient(), 0.5);
        assert_relative_eq!(field.base_size(), 2.0);
        assert_eq!(field.sample_count(), 2);

        field.update(0.1, 1.0, &[], &[]);
        assert_eq!(field.sample_count(), 0);
    }
}
