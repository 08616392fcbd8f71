// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Pre-mesh pipeline orchestrator
//!
//! Seven barrier phases over the model: hulls, segmentation, triangulation,
//! surface-surface intersections, polyline-surface intersections, sizing and
//! triple points, then hull alignment and constraints. Each phase fans out
//! its independent units of work with rayon and fully joins before the next
//! phase starts. Pair phases collect their results into per-phase buffers
//! and merge after the join, so the shared collections need no lock and come
//! out in ascending pair order.

mod intersect;
mod triple;

pub use intersect::{polyline_surface, surface_surface};
pub use triple::{find_triple_point, insert_triple_points};

use crate::model::{Intersection, Model, TriplePoint};
use chrono::Local;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const TIME_FORMAT: &str = "%a %b %e %T %Y";

/// Structured outcome of a pre-mesh run, complementing the textual progress
/// channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PreMeshReport {
    pub surfaces: usize,
    pub polylines: usize,
    pub intersections: usize,
    pub triple_points: usize,
    pub elapsed_ms: u128,
}

impl Model {
    /// Run the full pre-mesh phase pipeline.
    ///
    /// The callback receives human-readable phase-start/phase-end strings
    /// and the elapsed-time summary; the returned report carries the counts.
    pub fn pre_mesh_job<F: FnMut(&str)>(&mut self, mut progress: F) -> PreMeshReport {
        let start = Instant::now();
        progress(&format!(
            ">Start Time: {}\n",
            Local::now().format(TIME_FORMAT)
        ));

        // Convex hulls, one task per surface
        progress(">Start calculating convexhull...\n");
        self.surfaces
            .par_iter_mut()
            .for_each(|surface| surface.calculate_convex_hull());
        progress(">...finished");

        // Coarse segmentation, one task per polyline
        progress(">Start coarse segmentation...\n");
        self.polylines.par_iter_mut().for_each(|polyline| {
            polyline.calculate_min_max();
            polyline.calculate_segments(false);
        });
        progress(">...finished");

        // Coarse triangulation, one task per surface
        progress(">Start coarse triangulation...\n");
        let sizing = self.sizing.as_ref();
        self.surfaces
            .par_iter_mut()
            .for_each(|surface| surface.triangulate(sizing));
        progress(">...finished");

        // Surface-surface intersections, one task per unordered pair
        progress(">Start calculating surface-surface intersections...\n");
        self.intersections.clear();
        let n = self.surfaces.len();
        if n > 1 {
            let surfaces = &self.surfaces;
            let pairs: Vec<(usize, usize)> = (0..n - 1)
                .flat_map(|s1| ((s1 + 1)..n).map(move |s2| (s1, s2)))
                .collect();
            let mut found: Vec<Intersection> = pairs
                .par_iter()
                .filter_map(|&(s1, s2)| {
                    intersect::surface_surface(&surfaces[s1], &surfaces[s2], s1, s2)
                })
                .collect();
            self.intersections.append(&mut found);
        }
        progress(">...finished");

        // Polyline-surface intersections, one task per (polyline, surface)
        progress(">Start calculating polyline-surface intersections...\n");
        if !self.polylines.is_empty() && !self.surfaces.is_empty() {
            let polylines = &self.polylines;
            let surfaces = &self.surfaces;
            let pairs: Vec<(usize, usize)> = (0..polylines.len())
                .flat_map(|p| (0..surfaces.len()).map(move |s| (p, s)))
                .collect();
            let mut found: Vec<Intersection> = pairs
                .par_iter()
                .filter_map(|&(p, s)| {
                    intersect::polyline_surface(&polylines[p], &surfaces[s], p, s)
                })
                .collect();
            self.intersections.append(&mut found);
        }
        progress(">...finished");

        self.calculate_size_of_intersections();

        // Triple points, one task per unordered intersection pair, then the
        // sequential merge-back
        progress(">Start calculating intersection triplepoints...\n");
        self.triple_points.clear();
        let m = self.intersections.len();
        if m > 1 {
            let intersections = &self.intersections;
            let pairs: Vec<(usize, usize)> = (0..m - 1)
                .flat_map(|i1| ((i1 + 1)..m).map(move |i2| (i1, i2)))
                .collect();
            let found: Vec<TriplePoint> = pairs
                .par_iter()
                .filter_map(|&(i1, i2)| {
                    triple::find_triple_point(&intersections[i1], &intersections[i2], i1, i2)
                })
                .collect();
            self.triple_points = found;
        }
        triple::insert_triple_points(&mut self.intersections, &self.triple_points);
        progress(">...finished");

        // Hull alignment, sequential per surface
        progress(">Start aligning Convex Hulls to Intersections...\n");
        let total = self.surfaces.len();
        let Model {
            surfaces,
            intersections,
            ..
        } = self;
        for (s, surface) in surfaces.iter().enumerate() {
            progress(&format!(
                "   >({}/{}) {} ({})",
                s + 1,
                total,
                surface.name,
                surface.kind
            ));
            for intersection in intersections.iter_mut() {
                if !intersection.is_polyline_mesh
                    && (intersection.id1 == s || intersection.id2 == s)
                {
                    surface.align_intersections(&mut intersection.points);
                }
            }
        }
        progress(">...finished");

        // Constraints, sequential
        progress(">Start calculating constraints...\n");
        for surface in self.surfaces.iter_mut() {
            surface.calculate_constraints();
        }
        for polyline in self.polylines.iter_mut() {
            polyline.calculate_constraints();
        }
        progress(">...finished");

        self.calculate_size_of_constraints();

        let elapsed_ms = start.elapsed().as_millis();
        progress(&format!(">End Time: {}\n", Local::now().format(TIME_FORMAT)));
        progress(&format!(">elapsed Time: {}ms\n", elapsed_ms));

        PreMeshReport {
            surfaces: self.surfaces.len(),
            polylines: self.polylines.len(),
            intersections: self.intersections.len(),
            triple_points: self.triple_points.len(),
            elapsed_ms,
        }
    }

    /// Store the chord length of every surface-surface curve; polyline
    /// crossings are isolated points and keep length zero
    fn calculate_size_of_intersections(&mut self) {
        for intersection in &mut self.intersections {
            if intersection.is_polyline_mesh {
                continue;
            }
            intersection.length = intersection.chord_length();
        }
    }

    fn calculate_size_of_constraints(&mut self) {
        for surface in &mut self.surfaces {
            surface.calculate_size_of_constraints();
        }
        for polyline in &mut self.polylines {
            polyline.calculate_size_of_constraints();
        }
    }
}
