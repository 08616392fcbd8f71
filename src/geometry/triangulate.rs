// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Coarse constrained triangulation of a surface point set
//!
//! The point cloud is projected into a local 2D frame spanned by the first
//! three hull points, then triangulated incrementally: each inserted point
//! removes the triangles whose circumcircle contains it and re-fans the
//! resulting cavity boundary. Triangles touching no hull vertex are dropped
//! afterwards; if nothing survives, the hull boundary is fan-triangulated.
//!
//! Ties and near-cocircular configurations are resolved by plain float
//! comparisons. This is a coarse triangulation, not a certified Delaunay one.

use super::triangle::Triangle;
use super::vec::{normalize_or_keep, DEGENERATE_EPS};
use crate::quality::SizingField;
use nalgebra::Point3;

/// Triangulate `vertices` constrained to the hull boundary.
///
/// Under-determined inputs (fewer than 3 vertices or hull points) yield an
/// empty triangle set. When a sizing field is supplied, interior triangles
/// must also pass its suitability check; the fan fallback is exempt so a
/// boundary-only surface always triangulates.
pub fn triangulate(
    vertices: &[Point3<f64>],
    hull: &[Point3<f64>],
    sizing: Option<&SizingField>,
) -> Vec<Triangle> {
    if vertices.len() < 3 || hull.len() < 3 {
        return Vec::new();
    }

    // Local frame from the first three hull points
    let origin = hull[0];
    let normal = normalize_or_keep((hull[1] - hull[0]).cross(&(hull[2] - hull[0])));
    let x_axis = normalize_or_keep(hull[1] - origin);
    let y_axis = normalize_or_keep(normal.cross(&x_axis));

    let projected: Vec<[f64; 2]> = vertices
        .iter()
        .map(|v| {
            let rel = v - origin;
            [rel.dot(&x_axis), rel.dot(&y_axis)]
        })
        .collect();

    // Hull points matched back to vertex indices form the boundary constraint
    let boundary: Vec<usize> = hull
        .iter()
        .filter_map(|hull_point| {
            vertices
                .iter()
                .position(|v| (v - hull_point).norm_squared() < 1e-10)
        })
        .collect();

    let mut triangles = incremental_triangulation(vertices, &projected);

    // Keep triangles anchored to the boundary (and acceptable to the sizing
    // field when one is consulted)
    triangles.retain(|tri| {
        let anchored = tri.iter().any(|idx| boundary.contains(idx));
        let suitable = sizing.map_or(true, |field| {
            field.is_triangle_suitable(
                &vertices[tri[0]],
                &vertices[tri[1]],
                &vertices[tri[2]],
            )
        });
        anchored && suitable
    });

    if triangles.is_empty() && boundary.len() >= 3 {
        triangles = fan_triangulation(&boundary);
    }

    triangles.into_iter().map(Triangle::new).collect()
}

/// Fan from the first boundary vertex; produces boundary_len - 2 triangles
fn fan_triangulation(boundary: &[usize]) -> Vec<[usize; 3]> {
    (1..boundary.len() - 1)
        .map(|i| [boundary[0], boundary[i], boundary[i + 1]])
        .collect()
}

/// Incremental circumcircle-based insertion over the projected points
fn incremental_triangulation(
    vertices: &[Point3<f64>],
    projected: &[[f64; 2]],
) -> Vec<[usize; 3]> {
    let Some(seed) = find_seed_triangle(vertices) else {
        return Vec::new();
    };

    let mut triangles = vec![seed];

    for i in 0..vertices.len() {
        if seed.contains(&i) {
            continue;
        }

        let bad: Vec<usize> = triangles
            .iter()
            .enumerate()
            .filter(|(_, tri)| circumcircle_contains(projected, tri, &projected[i]))
            .map(|(j, _)| j)
            .collect();

        if bad.is_empty() {
            continue;
        }

        let cavity = cavity_boundary(&triangles, &bad);

        // Remove in descending index order so earlier positions stay valid
        for &j in bad.iter().rev() {
            triangles.remove(j);
        }

        for [e0, e1] in cavity {
            triangles.push([e0, e1, i]);
        }
    }

    triangles
}

/// First index triple spanning a non-degenerate triangle
fn find_seed_triangle(vertices: &[Point3<f64>]) -> Option<[usize; 3]> {
    for p1 in 0..vertices.len() {
        for p2 in (p1 + 1)..vertices.len() {
            for p3 in (p2 + 1)..vertices.len() {
                let e1 = vertices[p2] - vertices[p1];
                let e2 = vertices[p3] - vertices[p1];
                if e1.cross(&e2).norm_squared() > DEGENERATE_EPS {
                    return Some([p1, p2, p3]);
                }
            }
        }
    }
    None
}

/// Edges of the removed triangles that are not shared between two of them
fn cavity_boundary(triangles: &[[usize; 3]], bad: &[usize]) -> Vec<[usize; 2]> {
    let mut boundary = Vec::new();
    for (pos, &j) in bad.iter().enumerate() {
        let tri = triangles[j];
        for edge in [[tri[0], tri[1]], [tri[1], tri[2]], [tri[2], tri[0]]] {
            let shared = bad.iter().enumerate().any(|(other_pos, &k)| {
                if other_pos == pos {
                    return false;
                }
                let other = triangles[k];
                let other_edges = [[other[0], other[1]], [other[1], other[2]], [other[2], other[0]]];
                other_edges
                    .iter()
                    .any(|e| (e[0] == edge[0] && e[1] == edge[1]) || (e[0] == edge[1] && e[1] == edge[0]))
            });
            if !shared {
                boundary.push(edge);
            }
        }
    }
    boundary
}

/// 2D circumcircle containment via the circumcenter; degenerate triangles
/// contain nothing
fn circumcircle_contains(projected: &[[f64; 2]], tri: &[usize; 3], p: &[f64; 2]) -> bool {
    let [ax, ay] = projected[tri[0]];
    let [bx, by] = projected[tri[1]];
    let [cx, cy] = projected[tri[2]];

    let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
    if d.abs() < 1e-12 {
        return false;
    }

    let a2 = ax * ax + ay * ay;
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
    let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;

    let radius_sq = (ax - ux).powi(2) + (ay - uy).powi(2);
    let dist_sq = (p[0] - ux).powi(2) + (p[1] - uy).powi(2);
    dist_sq < radius_sq
}
