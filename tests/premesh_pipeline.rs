// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! End-to-end pre-mesh pipeline scenarios

use anyhow::Result;
use meshprep::{create_polyline, create_surface, Model, SizingField, Surface};
use tempfile::NamedTempFile;

fn unit_square_at(x0: f64, name: &str) -> Surface {
    let mut surface = create_surface(
        &[
            [x0, 0.0, 0.0],
            [x0 + 1.0, 0.0, 0.0],
            [x0 + 1.0, 1.0, 0.0],
            [x0, 1.0, 0.0],
        ],
        &[[0, 1, 2], [0, 2, 3]],
        name,
        "Default",
    );
    surface.size = 1.0;
    surface
}

#[test]
fn test_two_overlapping_squares_intersect() {
    let mut model = Model::new();
    model.append_surface(unit_square_at(0.0, "left"));
    model.append_surface(unit_square_at(0.4, "right"));

    let mut log = Vec::new();
    let report = model.pre_mesh_job(|msg| log.push(msg.to_string()));

    assert!(report.intersections >= 1);
    let inter = &model.intersections[0];
    assert!(!inter.is_polyline_mesh);
    assert!(!inter.points.is_empty());

    // Every hull and triangulation phase was announced
    for phase in [
        "convexhull",
        "coarse segmentation",
        "coarse triangulation",
        "surface-surface",
        "polyline-surface",
        "triplepoints",
        "aligning Convex Hulls",
        "constraints",
    ] {
        assert!(
            log.iter().any(|m| m.contains(phase)),
            "no progress line mentions {phase}"
        );
    }
}

#[test]
fn test_disjoint_surface_stays_isolated() {
    let mut model = Model::new();
    model.append_surface(unit_square_at(0.0, "left"));
    model.append_surface(unit_square_at(0.4, "right"));
    model.append_surface(unit_square_at(500.0, "far"));

    model.pre_mesh_job(|_| {});

    for inter in &model.intersections {
        assert!(inter.id1 != 2 && inter.id2 != 2);
    }
}

#[test]
fn test_triangle_polyline_segments() {
    let mut polyline = create_polyline(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]],
        "triangle",
    );
    polyline.calculate_segments(false);
    // Open chain: three points, two consecutive-pair segments
    assert_eq!(polyline.segments, vec![[0, 1], [1, 2]]);
}

#[test]
fn test_full_run_with_sizing_and_export() -> Result<()> {
    let mut model = Model::new();
    model.append_surface(unit_square_at(0.0, "left"));
    model.append_surface(unit_square_at(0.4, "right"));
    model.append_polyline(create_polyline(
        &[[0.25, 0.5, -1.0], [0.25, 0.5, 1.0]],
        "probe",
    ));
    model.set_mesh_quality(0.8);
    model.set_mesh_algorithm("delaunay".parse().unwrap());
    model.enable_constraints(true);
    model.set_sizing(SizingField::new(1.0, 1.0));

    model.pre_mesh();
    let report = model.pre_mesh_job(|_| {});
    assert!(report.elapsed_ms < 60_000);
    assert!(model
        .intersections
        .iter()
        .any(|i| i.is_polyline_mesh && !i.points.is_empty()));

    model.mesh();
    let file = NamedTempFile::new()?;
    let path = file.path().to_str().unwrap().to_string();
    model.export_vtu(&path)?;
    let content = std::fs::read_to_string(&path)?;
    assert!(content.contains("UnstructuredGrid"));

    Ok(())
}

#[test]
fn test_merge_back_idempotent_across_runs() {
    let mut model = Model::new();
    model.append_surface(unit_square_at(0.0, "a"));
    model.append_surface(unit_square_at(0.4, "b"));

    model.pre_mesh_job(|_| {});
    let snapshot: Vec<Vec<[f64; 3]>> = model
        .intersections
        .iter()
        .map(|i| i.points.iter().map(|p| [p.x, p.y, p.z]).collect())
        .collect();

    // Re-running the merge-back alone must not change the curves
    let triple_points = model.triple_points.clone();
    meshprep::pipeline::insert_triple_points(&mut model.intersections, &triple_points);
    let after: Vec<Vec<[f64; 3]>> = model
        .intersections
        .iter()
        .map(|i| i.points.iter().map(|p| [p.x, p.y, p.z]).collect())
        .collect();
    assert_eq!(snapshot, after);
}
