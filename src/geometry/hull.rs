// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Convex hull seed construction
//!
//! Produces the extremal tetrahedron of a point cloud: the two points of
//! maximum pairwise distance, the point furthest from the line through them,
//! and the point furthest from the plane of the first three. This is a seed
//! for downstream boundary handling, not a full incremental hull; no point
//! absorption takes place afterwards.

use super::vec::{distance_to_plane, normalize_or_keep};
use nalgebra::Point3;

/// Compute the hull seed of a point set.
///
/// Inputs with three or fewer points are returned unchanged. Degenerate
/// clouds (collinear or coplanar) produce small or duplicate seeds rather
/// than an error.
pub fn compute_convex_hull(points: &[Point3<f64>]) -> Vec<Point3<f64>> {
    if points.len() <= 3 {
        return points.to_vec();
    }

    // Two points of maximum pairwise squared distance
    let mut max_dist = 0.0;
    let (mut a, mut b) = (0, 0);
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let dist = (points[i] - points[j]).norm_squared();
            if dist > max_dist {
                max_dist = dist;
                a = i;
                b = j;
            }
        }
    }

    // Point furthest from the line ab
    let ab = normalize_or_keep(points[b] - points[a]);
    let mut max_dist = 0.0;
    let mut c = 0;
    for (i, point) in points.iter().enumerate() {
        if i == a || i == b {
            continue;
        }
        let ac = point - points[a];
        let foot = points[a] + ab * ac.dot(&ab);
        let dist = (point - foot).norm_squared();
        if dist > max_dist {
            max_dist = dist;
            c = i;
        }
    }

    // Point furthest from the plane abc
    let normal = normalize_or_keep((points[b] - points[a]).cross(&(points[c] - points[a])));
    let mut max_dist = 0.0;
    let mut d = 0;
    for (i, point) in points.iter().enumerate() {
        if i == a || i == b || i == c {
            continue;
        }
        let dist = distance_to_plane(point, &points[a], &normal).abs();
        if dist > max_dist {
            max_dist = dist;
            d = i;
        }
    }

    vec![points[a], points[b], points[c], points[d]]
}
