//! Triangle meshes for the built-in primitive shapes.
//!
//! Tessellation follows the three.js geometry generators the studio viewer
//! renders with, so an exported OBJ has the same topology as what the user
//! saw. The box is the exception: it uses 8 shared corner vertices instead
//! of 24 per-face ones.

use std::f64::consts::PI;

use crate::classifier::Shape;

/// Box edge length.
pub const BOX_SIZE: f64 = 1.0;

pub const SPHERE_RADIUS: f64 = 0.7;
pub const SPHERE_WIDTH_SEGMENTS: u32 = 32;
pub const SPHERE_HEIGHT_SEGMENTS: u32 = 32;

pub const TORUS_RADIUS: f64 = 0.7;
pub const TORUS_TUBE: f64 = 0.3;
pub const TORUS_RADIAL_SEGMENTS: u32 = 16;
pub const TORUS_TUBULAR_SEGMENTS: u32 = 32;

pub const CYLINDER_RADIUS: f64 = 0.5;
pub const CYLINDER_HEIGHT: f64 = 1.5;
pub const CYLINDER_RADIAL_SEGMENTS: u32 = 32;

/// Indexed triangle mesh with per-vertex normals and texture coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    pub uvs: Vec<[f64; 2]>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Uniformly scale vertex positions. Normals and UVs are unchanged.
    pub fn scaled(mut self, factor: f64) -> Self {
        for v in &mut self.vertices {
            v[0] *= factor;
            v[1] *= factor;
            v[2] *= factor;
        }
        self
    }

    fn push(&mut self, vertex: [f64; 3], normal: [f64; 3], uv: [f64; 2]) -> u32 {
        self.vertices.push(vertex);
        self.normals.push(normal);
        self.uvs.push(uv);
        (self.vertices.len() - 1) as u32
    }
}

/// Tessellate a primitive shape at unit scale.
pub fn tessellate(shape: Shape) -> Mesh {
    match shape {
        Shape::Box => box_mesh(BOX_SIZE),
        Shape::Sphere => sphere_mesh(SPHERE_RADIUS, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS),
        Shape::Torus => torus_mesh(
            TORUS_RADIUS,
            TORUS_TUBE,
            TORUS_RADIAL_SEGMENTS,
            TORUS_TUBULAR_SEGMENTS,
        ),
        Shape::Cylinder => cylinder_mesh(CYLINDER_RADIUS, CYLINDER_HEIGHT, CYLINDER_RADIAL_SEGMENTS),
    }
}

#[inline]
fn normalize(v: [f64; 3]) -> [f64; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len <= f64::EPSILON {
        [0.0, 0.0, 0.0]
    } else {
        [v[0] / len, v[1] / len, v[2] / len]
    }
}

fn box_mesh(size: f64) -> Mesh {
    let h = size / 2.0;
    let mut mesh = Mesh::empty();

    // Back face (-z) counter-clockwise from bottom-left, then the front face.
    let corners = [
        [-h, -h, -h],
        [h, -h, -h],
        [h, h, -h],
        [-h, h, -h],
        [-h, -h, h],
        [h, -h, h],
        [h, h, h],
        [-h, h, h],
    ];
    for c in corners {
        mesh.push(c, normalize(c), [c[0] / size + 0.5, c[1] / size + 0.5]);
    }

    // Counter-clockwise seen from outside.
    #[rustfmt::skip]
    let triangles = vec![
        [4, 5, 6], [4, 6, 7], // +z
        [1, 0, 3], [1, 3, 2], // -z
        [5, 1, 2], [5, 2, 6], // +x
        [0, 4, 7], [0, 7, 3], // -x
        [7, 6, 2], [7, 2, 3], // +y
        [0, 1, 5], [0, 5, 4], // -y
    ];
    mesh.triangles = triangles;
    mesh
}

fn sphere_mesh(radius: f64, width_segments: u32, height_segments: u32) -> Mesh {
    let mut mesh = Mesh::empty();
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = f64::from(iy) / f64::from(height_segments);

        // Pole rows shift their UVs half a segment so the seam lines up.
        let u_offset = if iy == 0 {
            0.5 / f64::from(width_segments)
        } else if iy == height_segments {
            -0.5 / f64::from(width_segments)
        } else {
            0.0
        };

        let mut row = Vec::with_capacity(width_segments as usize + 1);
        for ix in 0..=width_segments {
            let u = f64::from(ix) / f64::from(width_segments);
            let phi = u * 2.0 * PI;
            let theta = v * PI;

            let vertex = [
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ];
            row.push(mesh.push(vertex, normalize(vertex), [u + u_offset, 1.0 - v]));
        }
        grid.push(row);
    }

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];

            // Degenerate triangles at the poles are skipped.
            if iy != 0 {
                mesh.triangles.push([a, b, d]);
            }
            if iy != height_segments as usize - 1 {
                mesh.triangles.push([b, c, d]);
            }
        }
    }
    mesh
}

fn torus_mesh(radius: f64, tube: f64, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let mut mesh = Mesh::empty();

    for j in 0..=radial_segments {
        for i in 0..=tubular_segments {
            let u = f64::from(i) / f64::from(tubular_segments) * 2.0 * PI;
            let v = f64::from(j) / f64::from(radial_segments) * 2.0 * PI;

            let vertex = [
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            ];
            let center = [radius * u.cos(), radius * u.sin(), 0.0];
            let normal = normalize([
                vertex[0] - center[0],
                vertex[1] - center[1],
                vertex[2] - center[2],
            ]);
            let uv = [
                f64::from(i) / f64::from(tubular_segments),
                f64::from(j) / f64::from(radial_segments),
            ];
            mesh.push(vertex, normal, uv);
        }
    }

    let stride = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.triangles.push([a, b, d]);
            mesh.triangles.push([b, c, d]);
        }
    }
    mesh
}

fn cylinder_mesh(radius: f64, height: f64, radial_segments: u32) -> Mesh {
    let mut mesh = Mesh::empty();
    let half_height = height / 2.0;

    // Torso: a single height segment, two rings of radial_segments + 1.
    let mut rings: Vec<Vec<u32>> = Vec::with_capacity(2);
    for y in 0..=1u32 {
        let v = f64::from(y);
        let mut ring = Vec::with_capacity(radial_segments as usize + 1);
        for x in 0..=radial_segments {
            let u = f64::from(x) / f64::from(radial_segments);
            let theta = u * 2.0 * PI;
            let (sin, cos) = theta.sin_cos();
            let vertex = [radius * sin, -v * height + half_height, radius * cos];
            ring.push(mesh.push(vertex, normalize([sin, 0.0, cos]), [u, 1.0 - v]));
        }
        rings.push(ring);
    }
    for x in 0..radial_segments as usize {
        let a = rings[0][x];
        let b = rings[1][x];
        let c = rings[1][x + 1];
        let d = rings[0][x + 1];
        mesh.triangles.push([a, b, d]);
        mesh.triangles.push([b, c, d]);
    }

    push_cylinder_cap(&mut mesh, radius, half_height, radial_segments, true);
    push_cylinder_cap(&mut mesh, radius, half_height, radial_segments, false);
    mesh
}

fn push_cylinder_cap(mesh: &mut Mesh, radius: f64, half_height: f64, segments: u32, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };
    let normal = [0.0, sign, 0.0];

    // One center vertex per segment so each cap triangle gets its own UV.
    let center_start = mesh.vertices.len() as u32;
    for _ in 0..segments {
        mesh.push([0.0, half_height * sign, 0.0], normal, [0.5, 0.5]);
    }

    let rim_start = mesh.vertices.len() as u32;
    for x in 0..=segments {
        let theta = f64::from(x) / f64::from(segments) * 2.0 * PI;
        let (sin, cos) = theta.sin_cos();
        mesh.push(
            [radius * sin, half_height * sign, radius * cos],
            normal,
            [cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5],
        );
    }

    for x in 0..segments {
        let c = center_start + x;
        let i = rim_start + x;
        if top {
            mesh.triangles.push([i, i + 1, c]);
        } else {
            mesh.triangles.push([i + 1, i, c]);
        }
    }
}
