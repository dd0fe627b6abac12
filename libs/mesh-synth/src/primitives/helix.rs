//! # Double Helix Primitive
//!
//! Ladder-like ribbon between two phase-offset helices around Y. Rungs are
//! straight lines between matching points of the two strands.

use std::f64::consts::{PI, TAU};

use config::constants::DEFAULT_RESOLUTION;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::math::fraction;
use crate::mesh::MeshBuffer;
use crate::triangulate::triangulate;

/// Parameters for [`generate_double_helix`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoubleHelixParams {
    /// Distance of both strands from the Y axis
    pub radius: f64,
    /// Extent along Y, centered on the origin
    pub height: f64,
    /// Full revolutions over the height
    pub turns: f64,
    /// Angular offset of the second strand in radians
    pub phase_offset: f64,
    /// Segments along the strands
    pub length_resolution: u32,
    /// Segments across each rung
    pub width_resolution: u32,
}

impl Default for DoubleHelixParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 2.0,
            turns: 2.0,
            phase_offset: PI,
            length_resolution: DEFAULT_RESOLUTION * 4,
            width_resolution: 1,
        }
    }
}

impl DoubleHelixParams {
    /// Point on strand `strand` (0 or 1) at parameter `t` in `[0, 1]`.
    pub fn strand_point(&self, strand: usize, t: f64) -> DVec3 {
        let phase = if strand == 0 { 0.0 } else { self.phase_offset };
        let (sin, cos) = (TAU * self.turns * t + phase).sin_cos();
        DVec3::new(self.radius * cos, self.height * (t - 0.5), self.radius * sin)
    }
}

/// Creates a double helix ribbon.
///
/// The grid is `(length_resolution + 1) × (width_resolution + 1)`; `uv.x`
/// runs along the strands and `uv.y` across the rungs. Normals are smooth,
/// recomputed from the faces.
///
/// # Example
///
/// ```rust
/// use mesh_synth::primitives::{generate_double_helix, DoubleHelixParams};
///
/// let params = DoubleHelixParams {
///     length_resolution: 32,
///     width_resolution: 2,
///     ..Default::default()
/// };
/// let mesh = generate_double_helix(&params);
/// assert_eq!(mesh.vertex_count(), 33 * 3);
/// assert_eq!(mesh.triangle_count(), 2 * 32 * 2);
/// ```
pub fn generate_double_helix(params: &DoubleHelixParams) -> MeshBuffer {
    let length = params.length_resolution as usize + 1;
    let width = params.width_resolution as usize + 1;

    let mut mesh = MeshBuffer::with_capacity(length * width, 0);
    for i in 0..length {
        let t = fraction(i, length);
        let (first, second) = (params.strand_point(0, t), params.strand_point(1, t));
        for j in 0..width {
            let s = fraction(j, width);
            mesh.push_vertex(first.lerp(second, s), DVec3::ZERO, DVec2::new(t, s));
        }
    }
    mesh.triangles = triangulate(length, width, false);
    mesh.recompute_normals();

    log::debug!(
        "double helix: {}x{} grid, {} triangles",
        length,
        width,
        mesh.triangle_count()
    );
    mesh
}
