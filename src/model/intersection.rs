// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Intersection curves and triple points

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Squared distance below which two intersection points are the same point
pub const POINT_MERGE_EPS_SQ: f64 = 1e-10;

/// The discovered curve where two model objects meet
///
/// `id1`/`id2` index the participants: two surfaces, or a polyline and a
/// surface when `is_polyline_mesh` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intersection {
    pub id1: usize,
    pub id2: usize,
    pub is_polyline_mesh: bool,
    pub points: Vec<Point3<f64>>,
    /// Total chord length of the curve, filled by the sizing pass
    pub length: f64,
}

impl Intersection {
    pub fn new(id1: usize, id2: usize, is_polyline_mesh: bool) -> Self {
        Self {
            id1,
            id2,
            is_polyline_mesh,
            points: Vec::new(),
            length: 0.0,
        }
    }

    pub fn add_point(&mut self, point: Point3<f64>) {
        self.points.push(point);
    }

    /// True when an equal point (within the merge tolerance) is already stored
    pub fn contains_point(&self, point: &Point3<f64>) -> bool {
        self.points
            .iter()
            .any(|p| (p - point).norm_squared() < POINT_MERGE_EPS_SQ)
    }

    /// True when the two curves share at least one participant id
    pub fn shares_participant(&self, other: &Intersection) -> bool {
        self.id1 == other.id1
            || self.id1 == other.id2
            || self.id2 == other.id1
            || self.id2 == other.id2
    }

    /// Chord length over consecutive points
    pub fn chord_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }

    /// Re-order points lexicographically by (x, y, z) with a per-axis
    /// tolerance; an approximation of order along the curve
    pub fn sort_points(&mut self) {
        if self.points.len() <= 1 {
            return;
        }
        self.points.sort_by(|a, b| {
            if (a.x - b.x).abs() > 1e-10 {
                return a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal);
            }
            if (a.y - b.y).abs() > 1e-10 {
                return a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal);
            }
            a.z.partial_cmp(&b.z).unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

/// A point where two intersection curves coincide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriplePoint {
    pub point: Point3<f64>,
    /// Indices of the intersections this point belongs to (at least two)
    pub intersection_ids: Vec<usize>,
}

impl TriplePoint {
    pub fn new(point: Point3<f64>) -> Self {
        Self {
            point,
            intersection_ids: Vec::new(),
        }
    }

    pub fn add_intersection(&mut self, id: usize) {
        self.intersection_ids.push(id);
    }
}
