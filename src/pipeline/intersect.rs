// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Pairwise intersection discovery
//!
//! Both routines prune with the bounding boxes, then test candidate
//! primitive pairs with coarse proxies: surface pairs compare triangle
//! centroids against the averaged nominal sizes, polyline segments are cut
//! against triangle planes with a centroid-distance inside test. Neither is
//! an exact primitive intersection; callers must not assume geometric
//! exactness.

use crate::geometry::triangle;
use crate::model::{Intersection, Polyline, Surface, POINT_MERGE_EPS_SQ};
use nalgebra::Point3;

/// Intersection curve of two surfaces, or None when the pair yields no points.
///
/// Symmetric in its arguments up to id order: swapping the surfaces reports
/// the same point set.
pub fn surface_surface(
    surface1: &Surface,
    surface2: &Surface,
    id1: usize,
    id2: usize,
) -> Option<Intersection> {
    if surface1.bounds.disjoint(&surface2.bounds) {
        return None;
    }

    let threshold = 0.5 * (surface1.size + surface2.size) / 2.0;
    let mut points: Vec<Point3<f64>> = Vec::new();

    for tri1 in &surface1.triangles {
        let centroid1 = triangle::centroid(
            &surface1.vertices[tri1.indices[0]],
            &surface1.vertices[tri1.indices[1]],
            &surface1.vertices[tri1.indices[2]],
        );
        for tri2 in &surface2.triangles {
            let centroid2 = triangle::centroid(
                &surface2.vertices[tri2.indices[0]],
                &surface2.vertices[tri2.indices[1]],
                &surface2.vertices[tri2.indices[2]],
            );

            if (centroid1 - centroid2).norm() < threshold {
                let midpoint = nalgebra::center(&centroid1, &centroid2);
                push_unique(&mut points, midpoint);
            }
        }
    }

    build_intersection(points, id1, id2, false)
}

/// Intersection points of a polyline's segments with a surface's triangles,
/// or None when the pair yields no points
pub fn polyline_surface(
    polyline: &Polyline,
    surface: &Surface,
    polyline_id: usize,
    surface_id: usize,
) -> Option<Intersection> {
    if polyline.bounds.disjoint(&surface.bounds) {
        return None;
    }

    let mut points: Vec<Point3<f64>> = Vec::new();

    for seg in &polyline.segments {
        let v1 = polyline.vertices[seg[0]];
        let v2 = polyline.vertices[seg[1]];

        for tri in &surface.triangles {
            let tv1 = &surface.vertices[tri.indices[0]];
            let tv2 = &surface.vertices[tri.indices[1]];
            let tv3 = &surface.vertices[tri.indices[2]];

            let normal = triangle::normal(tv1, tv2, tv3);
            let dist1 = (v1 - tv1).dot(&normal);
            let dist2 = (v2 - tv1).dot(&normal);

            // Both endpoints strictly on one side: the segment misses the plane
            if dist1 * dist2 > 0.0 {
                continue;
            }

            let t = dist1 / (dist1 - dist2);
            let hit = v1 + (v2 - v1) * t;

            // Coarse inside test against the triangle centroid
            let centroid = triangle::centroid(tv1, tv2, tv3);
            if (hit - centroid).norm() < 0.5 * surface.size {
                push_unique(&mut points, hit);
            }
        }
    }

    build_intersection(points, polyline_id, surface_id, true)
}

fn push_unique(points: &mut Vec<Point3<f64>>, candidate: Point3<f64>) {
    let duplicate = points
        .iter()
        .any(|p| (p - candidate).norm_squared() < POINT_MERGE_EPS_SQ);
    if !duplicate {
        points.push(candidate);
    }
}

fn build_intersection(
    points: Vec<Point3<f64>>,
    id1: usize,
    id2: usize,
    is_polyline_mesh: bool,
) -> Option<Intersection> {
    if points.is_empty() {
        return None;
    }
    let mut intersection = Intersection::new(id1, id2, is_polyline_mesh);
    for point in points {
        intersection.add_point(point);
    }
    Some(intersection)
}
