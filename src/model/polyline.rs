// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Polyline: an ordered point chain with derived segments and bounds

use crate::geometry::Aabb;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A named polyline of the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub name: String,
    /// Nominal target element size
    pub size: f64,
    pub vertices: Vec<Point3<f64>>,
    /// Consecutive-pair index tuples derived from the vertex chain
    pub segments: Vec<[usize; 2]>,
    pub bounds: Aabb,
    pub constraints: Vec<[usize; 2]>,
    pub constraint_size: f64,
}

impl Polyline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0.0,
            vertices: Vec::new(),
            segments: Vec::new(),
            bounds: Aabb::empty(),
            constraints: Vec::new(),
            constraint_size: 0.0,
        }
    }

    pub fn add_vertex(&mut self, vertex: Point3<f64>) {
        self.vertices.push(vertex);
    }

    /// Recompute the tight bounding box of the chain
    pub fn calculate_min_max(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        self.bounds = Aabb::from_points(&self.vertices);
    }

    /// Derive segments as consecutive vertex pairs (open chain).
    ///
    /// With `fine` and a positive nominal size, the chain is first refined so
    /// that no segment is longer than the size; intermediate vertices are
    /// interpolated along each span.
    pub fn calculate_segments(&mut self, fine: bool) {
        self.segments.clear();
        if self.vertices.len() < 2 {
            return;
        }

        if fine && self.size > 0.0 {
            self.refine_chain();
        }

        for i in 0..self.vertices.len() - 1 {
            self.segments.push([i, i + 1]);
        }
    }

    /// Rebuild the vertex chain with interpolated points so that no span
    /// exceeds the nominal size
    fn refine_chain(&mut self) {
        let mut refined = Vec::with_capacity(self.vertices.len());
        for window in self.vertices.windows(2) {
            let (a, b) = (window[0], window[1]);
            refined.push(a);
            let length = (b - a).norm();
            let pieces = (length / self.size).ceil() as usize;
            for k in 1..pieces {
                let t = k as f64 / pieces as f64;
                refined.push(a + (b - a) * t);
            }
        }
        if let Some(last) = self.vertices.last() {
            refined.push(*last);
        }
        self.vertices = refined;
    }

    /// Polyline constraints are its own segment chain
    pub fn calculate_constraints(&mut self) {
        self.constraints = self.segments.clone();
    }

    /// Constraint size: the nominal size capped by the shortest segment
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
