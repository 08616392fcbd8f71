// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Bounding box utilities

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Tight bounds of a point set; empty input yields the empty box
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// True when the boxes are separated on at least one axis
    pub fn disjoint(&self, other: &Aabb) -> bool {
        self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bbox = Aabb::from_points(&[
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-1.0, -2.0, -3.0),
        ]);
        assert_eq!(bbox.min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.max, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_disjoint() {
        let a = Aabb::from_points(&[Point3::origin(), Point3::new(1.0, 1.0, 1.0)]);
        let b = Aabb::from_points(&[Point3::new(2.0, 0.0, 0.0), Point3::new(3.0, 1.0, 1.0)]);
        let c = Aabb::from_points(&[Point3::new(0.5, 0.5, 0.5), Point3::new(1.5, 1.5, 1.5)]);
        assert!(a.disjoint(&b));
        assert!(b.disjoint(&a));
        assert!(!a.disjoint(&c));
    }

    #[test]
    fn test_touching_boxes_are_not_disjoint() {
        let a = Aabb::from_points(&[Point3::origin(), Point3::new(1.0, 1.0, 1.0)]);
        let b = Aabb::from_points(&[Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0)]);
        assert!(!a.disjoint(&b));
    }
}
