//! # Rectangle Primitive
//!
//! Axis-aligned boxes assembled from six subdivided quads, and flat planes.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::quad::{generate_quad, QuadParams};
use crate::mesh::MeshBuffer;
use crate::ops::combine;

/// Parameters for [`generate_rectangle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleParams {
    /// Extent along X, Y and Z
    pub size: DVec3,
    /// Subdivisions along each face edge
    pub segments: u32,
}

impl Default for RectangleParams {
    fn default() -> Self {
        Self::new(DVec3::ONE, 1)
    }
}

impl RectangleParams {
    /// Creates box parameters.
    pub fn new(size: DVec3, segments: u32) -> Self {
        Self { size, segments }
    }
}

/// Outward normal and in-plane `(u, v)` axes of each box face, `u × v = n`.
const FACES: [(DVec3, DVec3, DVec3); 6] = [
    (DVec3::X, DVec3::NEG_Z, DVec3::Y),
    (DVec3::NEG_X, DVec3::Z, DVec3::Y),
    (DVec3::Y, DVec3::X, DVec3::NEG_Z),
    (DVec3::NEG_Y, DVec3::X, DVec3::Z),
    (DVec3::Z, DVec3::X, DVec3::Y),
    (DVec3::NEG_Z, DVec3::NEG_X, DVec3::Y),
];

/// Creates a box centered on the origin.
///
/// Each face is an independent quad grid with its own vertices, so box
/// edges stay hard.
///
/// # Example
///
/// ```rust
/// use mesh_synth::primitives::{generate_rectangle, RectangleParams};
/// use glam::DVec3;
///
/// let mesh = generate_rectangle(&RectangleParams::new(DVec3::new(2.0, 1.0, 1.0), 1));
/// assert_eq!(mesh.vertex_count(), 24);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn generate_rectangle(params: &RectangleParams) -> MeshBuffer {
    let half = params.size * 0.5;
    let extent = |axis: DVec3| (axis.abs() * half).element_sum();

    let mut mesh = MeshBuffer::new();
    for (normal, u, v) in FACES {
        let origin = normal * extent(normal) - u * extent(u) - v * extent(v);
        let du = u * 2.0 * extent(u);
        let dv = v * 2.0 * extent(v);
        let face = QuadParams::new(origin, origin + du, origin + du + dv, origin + dv)
            .with_segments(params.segments, params.segments);
        combine(&mut mesh, &generate_quad(&face));
    }

    log::debug!(
        "rectangle {:?}: {} triangles",
        params.size,
        mesh.triangle_count()
    );
    mesh
}

/// Creates a flat plane in XZ facing +Y, centered on the origin.
///
/// # Arguments
///
/// * `width` - Extent along X
/// * `length` - Extent along Z
/// * `segments_w` - Subdivisions along X
/// * `segments_l` - Subdivisions along Z
pub fn generate_plane(width: f64, length: f64, segments_w: u32, segments_l: u32) -> MeshBuffer {
    let (hw, hl) = (width * 0.5, length * 0.5);
    let quad = QuadParams::new(
        DVec3::new(-hw, 0.0, hl),
        DVec3::new(hw, 0.0, hl),
        DVec3::new(hw, 0.0, -hl),
        DVec3::new(-hw, 0.0, -hl),
    )
    .with_segments(segments_w, segments_l);
    generate_quad(&quad)
}
