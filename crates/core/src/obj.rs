//! Wavefront OBJ export for model descriptors.
//!
//! The output is plain text: vertices, normals, texture coordinates, a
//! material reference, then triangular faces with 1-based `v/vt/vn`
//! indices. No `.mtl` file is written.

use std::fmt::Write as _;

use crate::descriptor::ModelDescriptor;
use crate::error::CoreError;
use crate::mesh::{self, Mesh};

/// First line of every exported file.
pub const OBJ_HEADER: &str = "# Generated OBJ file";

/// Serialize a descriptor's primitive geometry, scaled by its `scale`.
///
/// External assets export their fallback shape; the asset itself is served
/// as-is by the binary download path.
pub fn descriptor_to_obj(descriptor: &ModelDescriptor) -> String {
    let mesh = mesh::tessellate(descriptor.shape()).scaled(descriptor.scale());
    mesh_to_obj(
        &mesh,
        descriptor.display_name(),
        &format!("material_{}", descriptor.id()),
    )
}

/// Serialize an arbitrary mesh.
pub fn mesh_to_obj(mesh: &Mesh, object_name: &str, material: &str) -> String {
    let mut out = String::with_capacity(64 + mesh.vertices.len() * 96 + mesh.triangles.len() * 40);

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{OBJ_HEADER}");
    let _ = writeln!(out, "o {}", sanitize_name(object_name));
    for v in &mesh.vertices {
        let _ = writeln!(out, "v {} {} {}", v[0], v[1], v[2]);
    }
    for n in &mesh.normals {
        let _ = writeln!(out, "vn {} {} {}", n[0], n[1], n[2]);
    }
    for uv in &mesh.uvs {
        let _ = writeln!(out, "vt {} {}", uv[0], uv[1]);
    }
    let _ = writeln!(out, "usemtl {material}");

    let has_attributes = !mesh.normals.is_empty() && !mesh.uvs.is_empty();
    for tri in &mesh.triangles {
        let [a, b, c] = tri.map(|i| i + 1);
        if has_attributes {
            let _ = writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}");
        } else {
            let _ = writeln!(out, "f {a} {b} {c}");
        }
    }
    out
}

/// Download file name for a descriptor: whitespace runs become `_`.
pub fn obj_file_name(display_name: &str) -> String {
    format!("{}.obj", sanitize_name(display_name))
}

fn sanitize_name(name: &str) -> String {
    let joined = name.split_whitespace().collect::<Vec<_>>().join("_");
    if joined.is_empty() {
        "model".to_string()
    } else {
        joined
    }
}

/// Element counts read back from OBJ text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjCounts {
    pub vertices: usize,
    pub normals: usize,
    pub uvs: usize,
    pub faces: usize,
}

/// Count the elements of an OBJ document, checking face indices.
///
/// Every face must be a triangle whose 1-based vertex indices are in range.
pub fn parse_obj_counts(text: &str) -> Result<ObjCounts, CoreError> {
    let mut counts = ObjCounts::default();
    let mut faces: Vec<(usize, Vec<usize>)> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => counts.vertices += 1,
            Some("vn") => counts.normals += 1,
            Some("vt") => counts.uvs += 1,
            Some("f") => {
                let indices = parts
                    .map(|corner| {
                        corner
                            .split('/')
                            .next()
                            .and_then(|i| i.parse::<usize>().ok())
                            .ok_or_else(|| {
                                CoreError::Export(format!(
                                    "Malformed face corner '{corner}' on line {}",
                                    line_no + 1
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if indices.len() != 3 {
                    return Err(CoreError::Export(format!(
                        "Face on line {} has {} corners, expected 3",
                        line_no + 1,
                        indices.len()
                    )));
                }
                faces.push((line_no + 1, indices));
                counts.faces += 1;
            }
            _ => {}
        }
    }

    for (line_no, indices) in &faces {
        if indices.iter().any(|&i| i == 0 || i > counts.vertices) {
            return Err(CoreError::Export(format!(
                "Face on line {line_no} references a vertex outside 1..={}",
                counts.vertices
            )));
        }
    }

    Ok(counts)
}
