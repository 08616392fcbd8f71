// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! I/O module - mesh container export

mod export_vtu;

pub use export_vtu::{export_vtu, ExportError};
