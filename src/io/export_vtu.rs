// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshprep Inc.

//! VTU (VTK UnstructuredGrid XML) exporter
//!
//! Serializes the model's mesh vertex/face buffers: points as Float64
//! triples, faces as VTK triangle cells (type 5) with connectivity and
//! offsets.

use crate::model::Model;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use thiserror::Error;

/// VTK cell type id for a linear triangle
const VTK_TRIANGLE: u8 = 5;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not open export target {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed writing VTU document")]
    Xml(#[from] quick_xml::Error),
    #[error("i/o failure writing VTU document")]
    Io(#[from] std::io::Error),
}

/// Write the model's mesh buffers to a VTU file
pub fn export_vtu(model: &Model, path: &str) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Open {
        path: path.to_string(),
        source,
    })?;
    let mut writer = Writer::new_with_indent(BufWriter::new(file), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;

    let mut root = BytesStart::new("VTKFile");
    root.push_attribute(("type", "UnstructuredGrid"));
    root.push_attribute(("version", "0.1"));
    root.push_attribute(("byte_order", "LittleEndian"));
    writer.write_event(Event::Start(root))?;

    writer.write_event(Event::Start(BytesStart::new("UnstructuredGrid")))?;

    let mut piece = BytesStart::new("Piece");
    piece.push_attribute(("NumberOfPoints", model.mesh_vertices.len().to_string().as_str()));
    piece.push_attribute(("NumberOfCells", model.mesh_faces.len().to_string().as_str()));
    writer.write_event(Event::Start(piece))?;

    // Points
    writer.write_event(Event::Start(BytesStart::new("Points")))?;
    let mut array = BytesStart::new("DataArray");
    array.push_attribute(("type", "Float64"));
    array.push_attribute(("NumberOfComponents", "3"));
    array.push_attribute(("format", "ascii"));
    writer.write_event(Event::Start(array))?;
    writer.write_event(Event::Text(BytesText::new(&format_points(model))))?;
    writer.write_event(Event::End(BytesEnd::new("DataArray")))?;
    writer.write_event(Event::End(BytesEnd::new("Points")))?;

    // Cells: connectivity, offsets, types
    writer.write_event(Event::Start(BytesStart::new("Cells")))?;

    let mut connectivity = BytesStart::new("DataArray");
    connectivity.push_attribute(("type", "Int32"));
    connectivity.push_attribute(("Name", "connectivity"));
    connectivity.push_attribute(("format", "ascii"));
    writer.write_event(Event::Start(connectivity))?;
    writer.write_event(Event::Text(BytesText::new(&format_connectivity(model))))?;
    writer.write_event(Event::End(BytesEnd::new("DataArray")))?;

    let mut offsets = BytesStart::new("DataArray");
    offsets.push_attribute(("type", "Int32"));
    offsets.push_attribute(("Name", "offsets"));
    offsets.push_attribute(("format", "ascii"));
    writer.write_event(Event::Start(offsets))?;
    writer.write_event(Event::Text(BytesText::new(&format_offsets(model))))?;
    writer.write_event(Event::End(BytesEnd::new("DataArray")))?;

    let mut types = BytesStart::new("DataArray");
    types.push_attribute(("type", "UInt8"));
    types.push_attribute(("Name", "types"));
    types.push_attribute(("format", "ascii"));
    writer.write_event(Event::Start(types))?;
    writer.write_event(Event::Text(BytesText::new(&format_types(model))))?;
    writer.write_event(Event::End(BytesEnd::new("DataArray")))?;

    writer.write_event(Event::End(BytesEnd::new("Cells")))?;

    writer.write_event(Event::Empty(BytesStart::new("CellData")))?;

    writer.write_event(Event::End(BytesEnd::new("Piece")))?;
    writer.write_event(Event::End(BytesEnd::new("UnstructuredGrid")))?;
    writer.write_event(Event::End(BytesEnd::new("VTKFile")))?;

    Ok(())
}

fn format_points(model: &Model) -> String {
    let mut out = String::new();
    for v in &model.mesh_vertices {
        let _ = writeln!(out, "{} {} {}", v.x, v.y, v.z);
    }
    out
}

fn format_connectivity(model: &Model) -> String {
    let mut out = String::new();
    for face in &model.mesh_faces {
        let _ = writeln!(out, "{} {} {}", face[0], face[1], face[2]);
    }
    out
}

fn format_offsets(model: &Model) -> String {
    let mut out = String::new();
    for (i, _) in model.mesh_faces.iter().enumerate() {
        let _ = writeln!(out, "{}", (i + 1) * 3);
    }
    out
}

fn format_types(model: &Model) -> String {
    let mut out = String::new();
    for _ in &model.mesh_faces {
        let _ = writeln!(out, "{}", VTK_TRIANGLE);
    }
    out
}
