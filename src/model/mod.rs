// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Model module - the aggregate the pipeline phases communicate through

mod intersection;
mod polyline;
mod surface;

pub use intersection::{Intersection, TriplePoint, POINT_MERGE_EPS_SQ};
pub use polyline::Polyline;
pub use surface::Surface;

use crate::quality::SizingField;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Target meshing strategy tag
///
/// Delaunay and advancing-front meshing are extension points; both currently
/// fall back to the simple fan strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshAlgorithm {
    Delaunay,
    AdvancingFront,
    Simple,
}

impl FromStr for MeshAlgorithm {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "delaunay" => MeshAlgorithm::Delaunay,
            "advancing_front" => MeshAlgorithm::AdvancingFront,
            _ => MeshAlgorithm::Simple,
        })
    }
}

/// Root aggregate owning all surfaces, polylines, and derived pipeline state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub surfaces: Vec<Surface>,
    pub polylines: Vec<Polyline>,
    pub intersections: Vec<Intersection>,
    pub triple_points: Vec<TriplePoint>,
    pub mesh_quality: f64,
    pub mesh_algorithm: MeshAlgorithm,
    pub has_constraints: bool,
    pub sizing: Option<SizingField>,
    /// Mesh buffers filled by the meshing strategies and serialized on export
    pub mesh_vertices: Vec<Point3<f64>>,
    pub mesh_faces: Vec<[usize; 3]>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            surfaces: Vec::new(),
            polylines: Vec::new(),
            intersections: Vec::new(),
            triple_points: Vec::new(),
            mesh_quality: 1.0,
            mesh_algorithm: MeshAlgorithm::Delaunay,
            has_constraints: false,
            sizing: None,
            mesh_vertices: Vec::new(),
            mesh_faces: Vec::new(),
        }
    }

    pub fn append_surface(&mut self, surface: Surface) {
        self.surfaces.push(surface);
    }

    pub fn append_polyline(&mut self, polyline: Polyline) {
        self.polylines.push(polyline);
    }

    pub fn set_mesh_quality(&mut self, quality: f64) {
        self.mesh_quality = quality;
    }

    pub fn set_mesh_algorithm(&mut self, algorithm: MeshAlgorithm) {
        self.mesh_algorithm = algorithm;
    }

    pub fn enable_constraints(&mut self, enable: bool) {
        self.has_constraints = enable;
    }

    pub fn set_sizing(&mut self, sizing: SizingField) {
        self.sizing = Some(sizing);
    }

    /// Reset the derived mesh buffers ahead of a meshing run
    pub fn pre_mesh(&mut self) {
        self.mesh_vertices.clear();
        self.mesh_faces.clear();
        if self.has_constraints {
            self.handle_constraints();
        }
    }

    /// Drop stored constraint state so the pipeline recomputes it
    fn handle_constraints(&mut self) {
        for surface in &mut self.surfaces {
            surface.constraints.clear();
            surface.constraint_size = 0.0;
        }
        for polyline in &mut self.polylines {
            polyline.constraints.clear();
            polyline.constraint_size = 0.0;
        }
    }

    /// Dispatch on the configured algorithm; unimplemented strategies fall
    /// back to the simple fan method
    pub fn mesh(&mut self) {
        match self.mesh_algorithm {
            MeshAlgorithm::Delaunay | MeshAlgorithm::AdvancingFront | MeshAlgorithm::Simple => {
                self.mesh_simple()
            }
        }
    }

    /// Write the mesh buffers to a VTU file
    pub fn export_vtu(&self, path: &str) -> anyhow::Result<()> {
        crate::io::export_vtu(self, path)?;
        Ok(())
    }

    /// Fan-triangulate every closed-enough polyline into the mesh buffers
    fn mesh_simple(&mut self) {
        for polyline in &self.polylines {
            if polyline.vertices.len() < 3 {
                continue;
            }
            let start = self.mesh_vertices.len();
            self.mesh_vertices.extend_from_slice(&polyline.vertices);
            for i in 1..polyline.vertices.len() - 1 {
                self.mesh_faces.push([start, start + i, start + i + 1]);
            }
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

/// Factory: surface from raw coordinate triples and index triples
pub fn create_surface(
    vertices: &[[f64; 3]],
    triangles: &[[usize; 3]],
    name: impl Into<String>,
    kind: impl Into<String>,
) -> Surface {
    let mut surface = Surface::new(name, kind);
    for v in vertices {
        surface.add_vertex(Point3::new(v[0], v[1], v[2]));
    }
    surface.triangles = triangles
        .iter()
        .map(|t| crate::geometry::Triangle::new(*t))
        .collect();
    surface.calculate_min_max();
    surface
}

/// Factory: polyline from raw coordinate triples
pub fn create_polyline(vertices: &[[f64; 3]], name: impl Into<String>) -> Polyline {
    let mut polyline = Polyline::new(name);
    for v in vertices {
        polyline.add_vertex(Point3::new(v[0], v[1], v[2]));
    }
    polyline.calculate_min_max();
    polyline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!(
            "delaunay".parse::<MeshAlgorithm>().unwrap(),
            MeshAlgorithm::Delaunay
        );
        assert_eq!(
            "advancing_front".parse::<MeshAlgorithm>().unwrap(),
            MeshAlgorithm::AdvancingFront
        );
        assert_eq!(
            "anything-else".parse::<MeshAlgorithm>().unwrap(),
            MeshAlgorithm::Simple
        );
    }

    #[test]
    fn test_factories_compute_bounds() {
        let surface = create_surface(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[[0, 1, 2]],
            "s",
            "Default",
        );
        assert_eq!(surface.vertices.len(), 3);
        assert_eq!(surface.triangles.len(), 1);
        assert_eq!(surface.bounds.max, Point3::new(1.0, 1.0, 0.0));

        let polyline = create_polyline(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]], "p");
        assert_eq!(polyline.bounds.max, Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_mesh_simple_fans_polylines() {
        let mut model = Model::new();
        model.append_polyline(create_polyline(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            "quad",
        ));
        model.pre_mesh();
        model.mesh();
        assert_eq!(model.mesh_vertices.len(), 4);
        assert_eq!(model.mesh_faces.len(), 2);
    }

    #[test]
    fn test_pre_mesh_resets_buffers() {
        let mut model = Model::new();
        model.mesh_vertices.push(Point3::origin());
        model.mesh_faces.push([0, 0, 0]);
        model.pre_mesh();
        assert!(model.mesh_vertices.is_empty());
        assert!(model.mesh_faces.is_empty());
    }
}
