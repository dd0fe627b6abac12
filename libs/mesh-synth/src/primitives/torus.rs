//! # Torus Primitive
//!
//! One minor-circle ring per sample of the major circle, each ring lying in
//! the plane spanned by the major radial direction and the torus axis.

use config::constants::DEFAULT_RESOLUTION;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::Axis;
use crate::mesh::MeshBuffer;
use crate::ring::{circle_points, rings_to_mesh, Ring, RingBasis};

/// Parameters for [`generate_torus`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorusParams {
    /// Distance from the center to the middle of the tube
    pub major_radius: f64,
    /// Tube radius
    pub minor_radius: f64,
    /// Rings around the major circle
    pub major_resolution: u32,
    /// Segments around each tube ring
    pub minor_resolution: u32,
    /// Axis the torus revolves around
    pub axis: Axis,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self::new(1.0, 0.25, DEFAULT_RESOLUTION * 2, DEFAULT_RESOLUTION)
    }
}

impl TorusParams {
    /// Creates torus parameters revolving around Y.
    pub fn new(
        major_radius: f64,
        minor_radius: f64,
        major_resolution: u32,
        minor_resolution: u32,
    ) -> Self {
        Self {
            major_radius,
            minor_radius,
            major_resolution,
            minor_resolution,
            axis: Axis::Y,
        }
    }
}

/// Creates a torus centered on the origin.
///
/// `uv.x` runs around the major circle, `uv.y` around the tube.
///
/// # Example
///
/// ```rust
/// use mesh_synth::primitives::{generate_torus, TorusParams};
///
/// let mesh = generate_torus(&TorusParams::new(2.0, 0.5, 24, 12));
/// assert_eq!(mesh.vertex_count(), 25 * 13);
/// assert_eq!(mesh.triangle_count(), 2 * 24 * 12);
/// ```
pub fn generate_torus(params: &TorusParams) -> MeshBuffer {
    let axis = params.axis.direction();
    let major = circle_points(
        params.major_radius,
        DVec3::ZERO,
        params.major_resolution,
        RingBasis::for_axis(params.axis),
    );

    // Minor rings run counter-clockwise around the major tangent and are
    // stacked along it, so the unflipped grid faces away from the tube core.
    let rings: Vec<Ring> = major
        .samples()
        .iter()
        .map(|center| {
            let basis = RingBasis::new(-axis, center.normal);
            circle_points(params.minor_radius, center.position, params.minor_resolution, basis)
                .with_u(center.uv.y)
        })
        .collect();

    let mesh = rings_to_mesh(&rings, false);
    log::debug!(
        "torus: {} x {} rings, {} triangles",
        rings.len(),
        params.minor_resolution + 1,
        mesh.triangle_count()
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::test_support::{assert_well_formed, signed_volume};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    /// Distance from `p` to the tube's core circle.
    fn tube_distance(p: DVec3, axis: DVec3, major: f64) -> f64 {
        let height = p.dot(axis);
        let planar = (p - axis * height).length();
        ((planar - major).powi(2) + height * height).sqrt()
    }

    #[test]
    fn test_points_lie_on_tube() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let params = TorusParams {
                axis,
                ..TorusParams::new(3.0, 0.75, 16, 8)
            };
            let mesh = generate_torus(&params);
            assert_well_formed(&mesh);
            for p in mesh.positions() {
                assert_abs_diff_eq!(tube_distance(*p, axis.direction(), 3.0), 0.75, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_normals_point_away_from_core() {
        let mesh = generate_torus(&TorusParams::new(2.0, 0.5, 12, 6));
        for (p, n) in mesh.positions().iter().zip(mesh.normals()) {
            let core = DVec3::new(p.x, 0.0, p.z).normalize() * 2.0;
            assert!(n.abs_diff_eq((*p - core) / 0.5, 1e-9));
        }
    }

    #[test]
    fn test_torus_volume_is_positive() {
        let mesh = generate_torus(&TorusParams::new(2.0, 0.5, 64, 32));
        let exact = 2.0 * PI * PI * 2.0 * 0.25;
        let volume = signed_volume(&mesh);
        assert!(volume > 0.95 * exact && volume < 1.01 * exact);
    }

    #[test]
    fn test_seams_are_closed() {
        let mesh = generate_torus(&TorusParams::new(2.0, 0.5, 10, 5));
        let p = mesh.positions();
        let stride = 6;
        for j in 0..stride {
            assert!(p[j].distance(p[10 * stride + j]) < 1e-4);
        }
        assert!(p[0].distance(p[5]) < 1e-4);
    }
}
