// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Meshprep pre-mesh kernel
//!
//! Prepares a multi-object 3D model - surfaces and polylines - for mesh
//! generation: convex-hull seeds, coarse constrained triangulation,
//! surface-surface and polyline-surface intersection discovery, triple-point
//! resolution, and hull-to-intersection alignment, orchestrated as a phased
//! fork-join pipeline.

pub mod geometry;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod quality;

pub use geometry::{compute_convex_hull, Aabb, Triangle};
pub use io::{export_vtu, ExportError};
pub use model::{
    create_polyline, create_surface, Intersection, MeshAlgorithm, Model, Polyline, Surface,
    TriplePoint,
};
pub use pipeline::PreMeshReport;
pub use quality::SizingField;
