// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! Triangle connectivity and per-triangle geometric queries

use super::vec::normalize_or_keep;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Triangle defined by three vertex indices into an owning surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Unit normal of the triangle spanned by three points
pub fn normal(v1: &Point3<f64>, v2: &Point3<f64>, v3: &Point3<f64>) -> Vector3<f64> {
    normalize_or_keep((v2 - v1).cross(&(v3 - v1)))
}

pub fn area(v1: &Point3<f64>, v2: &Point3<f64>, v3: &Point3<f64>) -> f64 {
    0.5 * (v2 - v1).cross(&(v3 - v1)).norm()
}

pub fn centroid(v1: &Point3<f64>, v2: &Point3<f64>, v3: &Point3<f64>) -> Point3<f64> {
    Point3::new(
        (v1.x + v2.x + v3.x) / 3.0,
        (v1.y + v2.y + v3.y) / 3.0,
        (v1.z + v2.z + v3.z) / 3.0,
    )
}
