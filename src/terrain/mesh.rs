//! Vertex buffers and parametric geometry (plane grid, torus knot, sphere).

use std::collections::HashSet;
use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Vertex data for wireframe meshes (position only)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }
}

/// Mutable vertex storage for one surface
///
/// Displacement only rewrites `position[2]`; the `dirty` flag tells the
/// renderer to re-upload before the next draw.
#[derive(Debug, Clone)]
pub struct VertexBuffer {
    pub vertices: Vec<Vertex>,
    dirty: bool,
}

impl VertexBuffer {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning whether it was set
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

/// Triangle mesh produced by one of the parametric generators
#[derive(Debug, Clone)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Flat plane in XY centred on the origin, z = 0.
    ///
    /// Rows run from +height/2 down to -height/2, columns from -width/2 to
    /// +width/2, giving (width_segments + 1) * (height_segments + 1) vertices.
    pub fn plane(width: f32, height: f32, width_segments: usize, height_segments: usize) -> Self {
        let grid_x = width_segments.max(1);
        let grid_y = height_segments.max(1);
        let segment_width = width / grid_x as f32;
        let segment_height = height / grid_y as f32;
        let half_width = width / 2.0;
        let half_height = height / 2.0;

        let mut vertices = Vec::with_capacity((grid_x + 1) * (grid_y + 1));
        for iy in 0..=grid_y {
            let y = iy as f32 * segment_height - half_height;
            for ix in 0..=grid_x {
                let x = ix as f32 * segment_width - half_width;
                vertices.push(Vertex::new(x, -y, 0.0));
            }
        }

        let mut indices = Vec::with_capacity(grid_x * grid_y * 6);
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = (ix + (grid_x + 1) * iy) as u32;
                let b = (ix + (grid_x + 1) * (iy + 1)) as u32;
                let c = ((ix + 1) + (grid_x + 1) * (iy + 1)) as u32;
                let d = ((ix + 1) + (grid_x + 1) * iy) as u32;

                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    /// (p, q) torus knot swept by a circular tube
    pub fn torus_knot(
        radius: f32,
        tube: f32,
        tubular_segments: usize,
        radial_segments: usize,
        p: u32,
        q: u32,
    ) -> Self {
        let tubular_segments = tubular_segments.max(3);
        let radial_segments = radial_segments.max(3);
        let (p, q) = (p.max(1) as f32, q as f32);

        let curve = |u: f32| -> Vec3 {
            let cu = u.cos();
            let su = u.sin();
            let qu_over_p = q / p * u;
            let cs = qu_over_p.cos();
            Vec3::new(
                radius * (2.0 + cs) * 0.5 * cu,
                radius * (2.0 + cs) * su * 0.5,
                radius * qu_over_p.sin() * 0.5,
            )
        };

        let mut vertices = Vec::with_capacity((tubular_segments + 1) * (radial_segments + 1));
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * p * PI * 2.0;
            let p1 = curve(u);
            let p2 = curve(u + 0.01);

            // Frenet-like frame along the curve
            let t = p2 - p1;
            let n = p2 + p1;
            let b = t.cross(n);
            let n = b.cross(t).normalize_or_zero();
            let b = b.normalize_or_zero();

            for j in 0..=radial_segments {
                let v = j as f32 / radial_segments as f32 * PI * 2.0;
                let cx = -tube * v.cos();
                let cy = tube * v.sin();
                let pos = p1 + n * cx + b * cy;
                vertices.push(Vertex::new(pos.x, pos.y, pos.z));
            }
        }

        let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);
        for j in 1..=tubular_segments {
            for i in 1..=radial_segments {
                let a = ((radial_segments + 1) * (j - 1) + (i - 1)) as u32;
                let b = ((radial_segments + 1) * j + (i - 1)) as u32;
                let c = ((radial_segments + 1) * j + i) as u32;
                let d = ((radial_segments + 1) * (j - 1) + i) as u32;

                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    /// UV sphere centred on the origin
    pub fn sphere(radius: f32, width_segments: usize, height_segments: usize) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut vertices = Vec::with_capacity((width_segments + 1) * (height_segments + 1));
        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * PI * 2.0;
                vertices.push(Vertex::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                ));
            }
        }

        let row = width_segments + 1;
        let mut indices = Vec::new();
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = (iy * row + ix + 1) as u32;
                let b = (iy * row + ix) as u32;
                let c = ((iy + 1) * row + ix) as u32;
                let d = ((iy + 1) * row + ix + 1) as u32;

                // Pole rows collapse to a single triangle per quad
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    /// Unique triangle edges as a line-list index buffer
    pub fn wireframe_edges(&self) -> Vec<u32> {
        let mut seen = HashSet::with_capacity(self.indices.len());
        let mut edges = Vec::with_capacity(self.indices.len() * 2);

        for tri in self.indices.chunks_exact(3) {
            for (i0, i1) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (i0.min(i1), i0.max(i1));
                if seen.insert(key) {
                    edges.extend_from_slice(&[key.0, key.1]);
                }
            }
        }

        edges
    }
}
