//! # Quad Primitive
//!
//! Bilinear patches between four arbitrary corners, and freeform patches
//! welded between two point sequences.
//!
//! Non-finite input never reaches the output: a patch whose positions or
//! normals come out NaN or infinite is dropped and an empty buffer is
//! returned instead.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::math::{fraction, polygon_normal};
use crate::mesh::MeshBuffer;
use crate::ops::bridge_chain;
use crate::triangulate::triangulate;

/// Parameters for [`generate_quad`].
///
/// Corners are given in order around the quad. The front face is the one
/// from which they appear counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadParams {
    /// Corners `p0, p1, p2, p3`; `u` runs `p0 → p1`, `v` runs `p0 → p3`
    pub corners: [DVec3; 4],
    /// Subdivisions along `u`
    pub segments_u: u32,
    /// Subdivisions along `v`
    pub segments_v: u32,
}

impl QuadParams {
    /// A single-cell quad over four corners.
    pub fn new(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3) -> Self {
        Self {
            corners: [p0, p1, p2, p3],
            segments_u: 1,
            segments_v: 1,
        }
    }

    /// Sets the subdivision counts.
    pub fn with_segments(mut self, segments_u: u32, segments_v: u32) -> Self {
        self.segments_u = segments_u;
        self.segments_v = segments_v;
        self
    }

    /// Bilinear point at `(u, v)`.
    pub fn point(&self, u: f64, v: f64) -> DVec3 {
        let [p0, p1, p2, p3] = self.corners;
        p0.lerp(p1, u).lerp(p3.lerp(p2, u), v)
    }

    /// Unnormalized surface normal `∂P/∂u × ∂P/∂v` at `(u, v)`.
    fn tangent_normal(&self, u: f64, v: f64) -> DVec3 {
        let [p0, p1, p2, p3] = self.corners;
        let du = (p1 - p0).lerp(p2 - p3, v);
        let dv = p3.lerp(p2, u) - p0.lerp(p1, u);
        du.cross(dv)
    }
}

/// Normal mode for [`generate_patch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shading {
    /// Shared vertices with averaged normals
    #[default]
    Smooth,
    /// Per-face vertices with flat normals
    Flat,
}

/// Creates a subdivided bilinear quad.
///
/// `uv0` is the bilinear `(u, v)` parameter. Where the surface derivative
/// vanishes (collapsed corners) the normal falls back to the corner
/// polygon's normal.
///
/// # Example
///
/// ```rust
/// use mesh_synth::primitives::{generate_quad, QuadParams};
/// use glam::DVec3;
///
/// let quad = QuadParams::new(DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y);
/// let mesh = generate_quad(&quad.with_segments(4, 2));
/// assert_eq!(mesh.vertex_count(), 5 * 3);
/// assert_eq!(mesh.triangle_count(), 16);
/// ```
pub fn generate_quad(params: &QuadParams) -> MeshBuffer {
    let columns = params.segments_u as usize + 1;
    let rows = params.segments_v as usize + 1;
    let fallback = polygon_normal(&params.corners).normalize_or_zero();

    let mut mesh = MeshBuffer::with_capacity(columns * rows, 0);
    for row in 0..rows {
        let v = fraction(row, rows);
        for column in 0..columns {
            let u = fraction(column, columns);
            let normal = params.tangent_normal(u, v).try_normalize().unwrap_or(fallback);
            mesh.push_vertex(params.point(u, v), normal, DVec2::new(u, v));
        }
    }
    mesh.triangles = triangulate(rows, columns, false);

    reject_non_finite(mesh, "quad")
}

/// Welds two point sequences into a bilinear patch.
///
/// Rows are interpolated from `side_a` to `side_b` in `segments` steps.
/// `uv.x` runs from side A (0) to side B (1), `uv.y` along the sides. Sides
/// of unequal length are truncated to the shorter one.
pub fn generate_patch(
    side_a: &[DVec3],
    side_b: &[DVec3],
    segments: u32,
    shading: Shading,
) -> MeshBuffer {
    let length = side_a.len().min(side_b.len());
    let row_count = segments as usize + 1;
    let rows: Vec<Vec<DVec3>> = (0..row_count)
        .map(|r| {
            let t = fraction(r, row_count);
            side_a[..length]
                .iter()
                .zip(&side_b[..length])
                .map(|(a, b)| a.lerp(*b, t))
                .collect()
        })
        .collect();

    let mesh = match shading {
        Shading::Flat => bridge_chain(&rows, false, false),
        Shading::Smooth => {
            let mut mesh = MeshBuffer::with_capacity(row_count * length, 0);
            for (r, row) in rows.iter().enumerate() {
                let u = fraction(r, row_count);
                for (i, p) in row.iter().enumerate() {
                    mesh.push_vertex(*p, DVec3::ZERO, DVec2::new(u, fraction(i, length)));
                }
            }
            mesh.triangles = triangulate(row_count, length, false);
            mesh.recompute_normals();
            mesh
        }
    };

    reject_non_finite(mesh, "patch")
}

fn reject_non_finite(mesh: MeshBuffer, what: &str) -> MeshBuffer {
    if mesh.is_finite() {
        mesh
    } else {
        log::warn!("{what}: non-finite geometry, returning an empty buffer");
        MeshBuffer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::test_support::assert_well_formed;

    fn unit_square() -> QuadParams {
        QuadParams::new(DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y)
    }

    #[test]
    fn test_nan_corner_returns_empty_buffer() {
        let quad = QuadParams::new(
            DVec3::new(f64::NAN, 0.0, 0.0),
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(1.0, 1.0, 0.0),
        );
        let mesh = generate_quad(&quad);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_quad_faces_counter_clockwise_side() {
        let mesh = generate_quad(&unit_square().with_segments(3, 3));
        assert_well_formed(&mesh);
        for n in mesh.normals() {
            assert!(n.abs_diff_eq(DVec3::Z, 1e-12));
        }
        let p = mesh.positions();
        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t).map(|i| p[i as usize]);
            assert!((b - a).cross(c - a).z > 0.0);
        }
    }

    #[test]
    fn test_quad_interpolates_corners() {
        let quad = QuadParams::new(
            DVec3::ZERO,
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(2.0, 1.0, 1.0),
            DVec3::new(0.0, 1.0, 0.0),
        )
        .with_segments(2, 2);
        let mesh = generate_quad(&quad);
        assert_eq!(mesh.positions()[8], DVec3::new(2.0, 1.0, 1.0));
        assert_eq!(mesh.positions()[4], quad.point(0.5, 0.5));
        assert_eq!(mesh.uv(0)[5], DVec2::new(1.0, 0.5));
    }

    #[test]
    fn test_collapsed_corner_uses_polygon_normal() {
        let quad = QuadParams::new(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Y);
        let mesh = generate_quad(&quad);
        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 4);
        for n in mesh.normals() {
            assert!(n.abs_diff_eq(DVec3::Z, 1e-12));
        }
    }

    #[test]
    fn test_zero_segments_is_graceful() {
        let mesh = generate_quad(&unit_square().with_segments(0, 0));
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_smooth_patch() {
        let a = [DVec3::ZERO, DVec3::Y, DVec3::new(0.0, 2.0, 0.0)];
        let b = [DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::new(1.0, 2.0, 0.0)];
        let mesh = generate_patch(&a, &b, 2, Shading::Smooth);
        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.triangle_count(), 8);
        // Along the sides × towards B: Y × X = -Z.
        for n in mesh.normals() {
            assert!(n.abs_diff_eq(-DVec3::Z, 1e-12));
        }
    }

    #[test]
    fn test_flat_patch_duplicates_vertices() {
        let a = [DVec3::ZERO, DVec3::Y, DVec3::new(0.0, 2.0, 0.0)];
        let b = [DVec3::X, DVec3::new(1.0, 1.0, 0.5), DVec3::new(1.0, 2.0, 0.0)];
        let mesh = generate_patch(&a, &b, 2, Shading::Flat);
        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 2 * 2 * 4);
        assert_eq!(mesh.triangle_count(), 8);
        assert_eq!(mesh.uv(0)[0].x, 0.0);
        assert_eq!(mesh.uv(0)[mesh.vertex_count() - 1].x, 1.0);
    }

    #[test]
    fn test_patch_with_nan_is_empty() {
        let a = [DVec3::ZERO, DVec3::new(0.0, f64::NAN, 0.0)];
        let b = [DVec3::X, DVec3::new(1.0, 1.0, 0.0)];
        assert!(generate_patch(&a, &b, 1, Shading::Smooth).is_empty());
        assert!(generate_patch(&a, &b, 1, Shading::Flat).is_empty());
    }
}
