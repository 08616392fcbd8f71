// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Surface: a vertex cloud with triangle connectivity, hull, and bounds

use crate::geometry::{self, compute_convex_hull, triangle, Aabb, Triangle};
use crate::quality::SizingField;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A named surface of the model
///
/// Vertices are appended incrementally; bounds, hull, and triangles are
/// derived on demand by the pipeline phases and mutated in place afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    pub name: String,
    pub kind: String,
    /// Nominal target element size
    pub size: f64,
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<Triangle>,
    pub convex_hull: Vec<Point3<f64>>,
    pub bounds: Aabb,
    /// Boundary constraint segments, derived in the constraint phase
    pub constraints: Vec<[usize; 2]>,
    pub constraint_size: f64,
}

impl Surface {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            size: 0.0,
            vertices: Vec::new(),
            triangles: Vec::new(),
            convex_hull: Vec::new(),
            bounds: Aabb::empty(),
            constraints: Vec::new(),
            constraint_size: 0.0,
        }
    }

    pub fn add_vertex(&mut self, vertex: Point3<f64>) {
        self.vertices.push(vertex);
    }

    /// Recompute the tight bounding box of the vertex cloud
    pub fn calculate_min_max(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        self.bounds = Aabb::from_points(&self.vertices);
    }

    /// Recompute bounds, then the hull seed of the vertex cloud
    pub fn calculate_convex_hull(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        self.calculate_min_max();
        self.convex_hull = compute_convex_hull(&self.vertices);
    }

    /// Build the coarse constrained triangulation; computes the hull first
    /// when a previous phase has not
    pub fn triangulate(&mut self, sizing: Option<&SizingField>) {
        if self.vertices.len() < 3 {
            return;
        }
        if self.convex_hull.is_empty() {
            self.calculate_convex_hull();
        }
        self.triangles = geometry::triangulate(&self.vertices, &self.convex_hull, sizing);
    }

    /// Snap intersection points near the hull boundary onto it.
    ///
    /// The hull is fanned into triangles; every point within half the
    /// nominal size of its closest hull-triangle plane is projected onto
    /// that plane.
    pub fn align_intersections(&self, points: &mut [Point3<f64>]) {
        if self.convex_hull.len() < 3 {
            return;
        }

        let hull_triangles: Vec<[Point3<f64>; 3]> = (1..self.convex_hull.len() - 1)
            .map(|i| [self.convex_hull[0], self.convex_hull[i], self.convex_hull[i + 1]])
            .collect();

        let tolerance = 0.5 * self.size;
        if tolerance <= 0.0 {
            return;
        }

        for point in points.iter_mut() {
            let mut best: Option<(f64, nalgebra::Vector3<f64>)> = None;
            for tri in &hull_triangles {
                let normal = triangle::normal(&tri[0], &tri[1], &tri[2]);
                if normal.norm_squared() < 1e-10 {
                    continue;
                }
                let dist = geometry::vec::distance_to_plane(point, &tri[0], &normal);
                match best {
                    Some((d, _)) if d.abs() <= dist.abs() => {}
                    _ => best = Some((dist, normal)),
                }
            }
            if let Some((dist, normal)) = best {
                if dist.abs() < tolerance {
                    *point -= normal * dist;
                }
            }
        }
    }

    /// Derive the boundary constraint loop from the hull points
    pub fn calculate_constraints(&mut self) {
        self.constraints.clear();
        let mut boundary: Vec<usize> = Vec::new();
        for hull_point in &self.convex_hull {
            if let Some(idx) = self
                .vertices
                .iter()
                .position(|v| (v - hull_point).norm_squared() < 1e-10)
            {
                // Degenerate hull seeds can repeat a point
                if !boundary.contains(&idx) {
                    boundary.push(idx);
                }
            }
        }
        if boundary.len() < 2 {
            return;
        }
        for i in 0..boundary.len() {
            self.constraints
                .push([boundary[i], boundary[(i + 1) % boundary.len()]]);
        }
    }

    /// Constraint size: the nominal size capped by the shortest constraint
    /// segment
    pub fn calculate_size_of_constraints(&mut self) {
        let shortest = self
            .constraints
            .iter()
            .map(|seg| (self.vertices[seg[1]] - self.vertices[seg[0]]).norm())
            .fold(f64::INFINITY, f64::min);
        if shortest.is_finite() {
            self.constraint_size = if self.size > 0.0 {
                self.size.min(shortest)
            } else {
                shortest
            };
        }
    }
}
