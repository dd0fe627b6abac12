//! # Sphere Primitive
//!
//! Latitude rings stacked from the +Y pole to the -Y pole. Each ring is a
//! circle of radius `r·sin(φ)` at height `r·cos(φ)`.

use std::f64::consts::PI;

use config::constants::{DEFAULT_RESOLUTION, EPSILON};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::Axis;
use crate::math::fraction;
use crate::mesh::MeshBuffer;
use crate::ring::{circle_points, rings_to_mesh, PointSample, Ring, RingBasis};

/// Parameters for [`generate_sphere`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereParams {
    /// Sphere radius
    pub radius: f64,
    /// Segments around each latitude ring
    pub resolution: u32,
    /// Force an odd ring count so one ring lies exactly on the equator
    pub equator: bool,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self::new(0.5, DEFAULT_RESOLUTION, false)
    }
}

impl SphereParams {
    /// Creates sphere parameters.
    pub fn new(radius: f64, resolution: u32, equator: bool) -> Self {
        Self {
            radius,
            resolution,
            equator,
        }
    }

    /// Number of latitude rings, poles included.
    pub fn ring_count(&self) -> usize {
        let count = self.resolution as usize / 2 + 1;
        if self.equator && count % 2 == 0 {
            count + 1
        } else {
            count
        }
    }
}

/// Creates a UV sphere centered on the origin.
///
/// `uv.x` runs from the +Y pole (0) to the -Y pole (1), `uv.y` around the
/// latitude rings.
///
/// # Example
///
/// ```rust
/// use mesh_synth::primitives::{generate_sphere, SphereParams};
///
/// let params = SphereParams::new(1.0, 16, true);
/// let mesh = generate_sphere(&params);
/// assert_eq!(params.ring_count() % 2, 1);
/// assert_eq!(mesh.vertex_count(), params.ring_count() * 17);
/// ```
pub fn generate_sphere(params: &SphereParams) -> MeshBuffer {
    // Rings run towards -Y, against the basis forward, so the grid is flipped.
    let mesh = rings_to_mesh(&latitude_rings(params), true);
    log::debug!(
        "sphere: {} rings, {} triangles",
        params.ring_count(),
        mesh.triangle_count()
    );
    mesh
}

/// Latitude rings from the +Y pole to the -Y pole with radial normals.
pub(crate) fn latitude_rings(params: &SphereParams) -> Vec<Ring> {
    let count = params.ring_count();
    let basis = RingBasis::for_axis(Axis::Y);

    (0..count)
        .map(|i| {
            let t = fraction(i, count);
            let (sin, cos) = (PI * t).sin_cos();
            let circle = circle_points(
                params.radius * sin,
                DVec3::Y * (params.radius * cos),
                params.resolution,
                basis,
            );
            let samples = circle
                .samples()
                .iter()
                .map(|s| PointSample {
                    position: s.position,
                    uv: DVec2::new(t, s.uv.y),
                    normal: radial_normal(s.position, params.radius),
                })
                .collect();
            Ring::new(samples)
        })
        .collect()
}

fn radial_normal(position: DVec3, radius: f64) -> DVec3 {
    if radius.abs() > EPSILON {
        position / radius
    } else {
        DVec3::Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::test_support::{assert_faces_outward, assert_well_formed, signed_volume};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_equator_forces_odd_ring_count() {
        for resolution in [4, 8, 10, 16, 31] {
            let params = SphereParams::new(1.0, resolution, true);
            assert_eq!(params.ring_count() % 2, 1, "resolution {resolution}");
        }
        assert_eq!(SphereParams::new(1.0, 6, false).ring_count(), 4);
        assert_eq!(SphereParams::new(1.0, 6, true).ring_count(), 5);
    }

    #[test]
    fn test_equator_ring_on_sphere() {
        let params = SphereParams::new(2.0, 16, true);
        let mesh = generate_sphere(&params);
        let stride = params.resolution as usize + 1;
        let equator = params.ring_count() / 2;
        for p in &mesh.positions()[equator * stride..(equator + 1) * stride] {
            assert!((p.length() - 2.0).abs() < 1e-3);
            assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_all_points_on_sphere_with_radial_normals() {
        let mesh = generate_sphere(&SphereParams::new(1.5, 12, false));
        assert_well_formed(&mesh);
        for (p, n) in mesh.positions().iter().zip(mesh.normals()) {
            assert_abs_diff_eq!(p.length(), 1.5, epsilon = 1e-12);
            assert!(n.abs_diff_eq(*p / 1.5, 1e-12));
        }
    }

    #[test]
    fn test_sphere_faces_outward() {
        let mesh = generate_sphere(&SphereParams::new(1.0, 24, true));
        assert_faces_outward(&mesh, DVec3::ZERO);
        let volume = signed_volume(&mesh);
        let exact = 4.0 / 3.0 * PI;
        assert!(volume > 0.9 * exact && volume < exact);
    }

    #[test]
    fn test_poles() {
        let params = SphereParams::new(1.0, 8, false);
        let mesh = generate_sphere(&params);
        assert!(mesh.positions()[0].abs_diff_eq(DVec3::Y, 1e-12));
        assert!(mesh.positions()[mesh.vertex_count() - 1].abs_diff_eq(-DVec3::Y, 1e-12));
    }

    #[test]
    fn test_zero_resolution_is_single_point() {
        let mesh = generate_sphere(&SphereParams::new(1.0, 0, false));
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.triangle_count(), 0);
        assert_well_formed(&mesh);
    }
}
