// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Triple-point resolution and merge-back
//!
//! Two intersection curves that share a participant and approach each other
//! within tolerance define a triple point at the midpoint of their closest
//! pair. Triple points are later folded back into every curve they belong
//! to, after which each curve is re-sorted spatially.

use crate::model::{Intersection, TriplePoint};

/// Distance below which the closest pair of two curves marks a triple point
const TRIPLE_POINT_EPS: f64 = 1e-6;

/// Test two curves for a shared triple point.
///
/// Preconditions are checked here: both curves non-empty and sharing at
/// least one participant id. The search is an exhaustive nearest-pair scan;
/// per-curve point counts are small.
pub fn find_triple_point(
    inter1: &Intersection,
    inter2: &Intersection,
    idx1: usize,
    idx2: usize,
) -> Option<TriplePoint> {
    if inter1.points.is_empty() || inter2.points.is_empty() {
        return None;
    }
    if !inter1.shares_participant(inter2) {
        return None;
    }

    let mut min_distance = f64::MAX;
    let mut closest = inter1.points[0];

    for p1 in &inter1.points {
        for p2 in &inter2.points {
            let distance = (p2 - p1).norm();
            if distance < min_distance {
                min_distance = distance;
                closest = nalgebra::center(p1, p2);
            }
        }
    }

    if min_distance < TRIPLE_POINT_EPS {
        let mut tp = TriplePoint::new(closest);
        tp.add_intersection(idx1);
        tp.add_intersection(idx2);
        Some(tp)
    } else {
        None
    }
}

/// Fold triple points back into their curves, then re-sort every curve.
///
/// Idempotent: a point already present within tolerance is not appended
/// again, and re-sorting an ordered curve is a no-op.
pub fn insert_triple_points(intersections: &mut [Intersection], triple_points: &[TriplePoint]) {
    for tp in triple_points {
        for &id in &tp.intersection_ids {
            if let Some(intersection) = intersections.get_mut(id) {
                if !intersection.contains_point(&tp.point) {
                    intersection.add_point(tp.point);
                }
            }
        }
    }

    for intersection in intersections.iter_mut() {
        intersection.sort_points();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn curve(id1: usize, id2: usize, points: &[[f64; 3]]) -> Intersection {
        let mut inter = Intersection::new(id1, id2, false);
        for p in points {
            inter.add_point(Point3::new(p[0], p[1], p[2]));
        }
        inter
    }

    #[test]
    fn test_disjoint_participants_skip() {
        let a = curve(0, 1, &[[0.0, 0.0, 0.0]]);
        let b = curve(2, 3, &[[0.0, 0.0, 0.0]]);
        assert!(find_triple_point(&a, &b, 0, 1).is_none());
    }

    #[test]
    fn test_far_curves_yield_nothing() {
        let a = curve(0, 1, &[[0.0, 0.0, 0.0]]);
        let b = curve(1, 2, &[[5.0, 0.0, 0.0]]);
        assert!(find_triple_point(&a, &b, 0, 1).is_none());
    }

    #[test]
    fn test_coincident_curves_yield_midpoint() {
        let a = curve(0, 1, &[[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]);
        let b = curve(1, 2, &[[2.0, 2.0, 2.0 + 1e-8], [9.0, 9.0, 9.0]]);
        let tp = find_triple_point(&a, &b, 3, 7).unwrap();
        assert_eq!(tp.intersection_ids, vec![3, 7]);
        assert!((tp.point - Point3::new(2.0, 2.0, 2.0)).norm() < 1e-7);
    }

    #[test]
    fn test_empty_curve_skipped() {
        let a = curve(0, 1, &[]);
        let b = curve(1, 2, &[[0.0, 0.0, 0.0]]);
        assert!(find_triple_point(&a, &b, 0, 1).is_none());
    }

    #[test]
    fn test_merge_back_idempotent() {
        let mut intersections = vec![
            curve(0, 1, &[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]]),
            curve(1, 2, &[[5.0, 0.0, 0.0]]),
        ];
        let mut tp = TriplePoint::new(Point3::new(1.0, 0.0, 0.0));
        tp.add_intersection(0);
        tp.add_intersection(1);
        let triple_points = vec![tp];

        insert_triple_points(&mut intersections, &triple_points);
        let after_first: Vec<usize> = intersections.iter().map(|i| i.points.len()).collect();
        assert_eq!(after_first, vec![3, 2]);

        insert_triple_points(&mut intersections, &triple_points);
        let after_second: Vec<usize> = intersections.iter().map(|i| i.points.len()).collect();
        assert_eq!(after_first, after_second);

        // Curves come out sorted
        assert_eq!(intersections[0].points[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_out_of_range_id_ignored() {
        let mut intersections = vec![curve(0, 1, &[[0.0, 0.0, 0.0]])];
        let mut tp = TriplePoint::new(Point3::new(1.0, 0.0, 0.0));
        tp.add_intersection(0);
        tp.add_intersection(42);
        insert_triple_points(&mut intersections, &[tp]);
        assert_eq!(intersections[0].points.len(), 2);
    }
}
