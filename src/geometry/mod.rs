// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Geometry module - vector kernel, hulls, and triangulation

mod bbox;
mod hull;
pub mod triangle;
mod triangulate;
pub mod vec;

pub use bbox::Aabb;
pub use hull::compute_convex_hull;
pub use triangle::Triangle;
pub use triangulate::triangulate;
