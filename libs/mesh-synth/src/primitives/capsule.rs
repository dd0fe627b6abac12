//! # Capsule Primitive
//!
//! A cylindrical body between two hemispheres. The hemispheres are the two
//! halves of an equator sphere, pulled apart along Y by the body length; the
//! duplicated equator ring bounds the body.

use config::constants::{DEFAULT_RESOLUTION, EPSILON};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::sphere::{latitude_rings, SphereParams};
use crate::mesh::MeshBuffer;
use crate::ring::{rings_to_mesh, PointSample, Ring};

/// Parameters for [`generate_capsule`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleParams {
    /// Radius of the body and both hemispheres
    pub radius: f64,
    /// Tip-to-tip length along Y
    pub height: f64,
    /// Segments around the circumference
    pub resolution: u32,
}

impl Default for CapsuleParams {
    fn default() -> Self {
        Self::new(0.5, 2.0, DEFAULT_RESOLUTION)
    }
}

impl CapsuleParams {
    /// Creates capsule parameters.
    pub fn new(radius: f64, height: f64, resolution: u32) -> Self {
        Self {
            radius,
            height,
            resolution,
        }
    }

    /// Length of the cylindrical section, zero when the hemispheres touch.
    pub fn body_length(&self) -> f64 {
        (self.height - 2.0 * self.radius).max(0.0)
    }
}

/// Creates a capsule centered on the origin.
///
/// `uv.x` follows arc length over the whole profile, tip to tip, so the
/// body does not stretch the texture.
///
/// # Example
///
/// ```rust
/// use mesh_synth::primitives::{generate_capsule, CapsuleParams};
///
/// let mesh = generate_capsule(&CapsuleParams::new(0.5, 3.0, 16));
/// let (min, max) = mesh.bounding_box();
/// assert!((max.y - min.y - 3.0).abs() < 1e-9);
/// ```
pub fn generate_capsule(params: &CapsuleParams) -> MeshBuffer {
    let sphere = SphereParams::new(params.radius, params.resolution, true);
    let rings = latitude_rings(&sphere);
    let equator = rings.len() / 2;

    let body = params.body_length();
    let half = body * 0.5;
    let quarter_arc = params.radius * std::f64::consts::FRAC_PI_2;
    let total = 2.0 * quarter_arc + body;

    let mut profile = Vec::with_capacity(rings.len() + 1);
    for (i, ring) in rings.iter().enumerate() {
        let upper = i <= equator;
        // Arc length from the top tip along the undisplaced sphere.
        let sphere_arc = ring.samples().first().map_or(0.0, |s| s.uv.x) * 2.0 * quarter_arc;

        if i == equator && body > EPSILON {
            profile.push(reparameterize(ring, half, sphere_arc, total));
            profile.push(reparameterize(ring, -half, sphere_arc + body, total));
        } else if upper {
            profile.push(reparameterize(ring, half, sphere_arc, total));
        } else {
            profile.push(reparameterize(ring, -half, sphere_arc + body, total));
        }
    }

    let mesh = rings_to_mesh(&profile, true);
    log::debug!(
        "capsule: body {:.4}, {} rings, {} triangles",
        body,
        profile.len(),
        mesh.triangle_count()
    );
    mesh
}

/// Moves a ring along Y and rewrites `uv.x` as normalized arc length.
fn reparameterize(ring: &Ring, offset: f64, arc: f64, total: f64) -> Ring {
    let u = if total > EPSILON { arc / total } else { 0.0 };
    Ring::new(
        ring.samples()
            .iter()
            .map(|s| PointSample {
                position: s.position + DVec3::Y * offset,
                uv: DVec2::new(u, s.uv.y),
                normal: s.normal,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::test_support::{assert_faces_outward, assert_well_formed, signed_volume};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_capsule_extent() {
        let mesh = generate_capsule(&CapsuleParams::new(0.5, 3.0, 16));
        assert_well_formed(&mesh);
        let (min, max) = mesh.bounding_box();
        assert_abs_diff_eq!(max.y, 1.5, epsilon = 1e-9);
        assert_abs_diff_eq!(min.y, -1.5, epsilon = 1e-9);
        assert_abs_diff_eq!(max.x, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_capsule_has_extra_ring_for_body() {
        let params = CapsuleParams::new(0.5, 3.0, 16);
        let sphere_rings = SphereParams::new(0.5, 16, true).ring_count();
        let mesh = generate_capsule(&params);
        assert_eq!(mesh.vertex_count(), (sphere_rings + 1) * 17);
    }

    #[test]
    fn test_short_capsule_is_a_sphere() {
        let params = CapsuleParams::new(1.0, 1.0, 12);
        assert_eq!(params.body_length(), 0.0);
        let mesh = generate_capsule(&params);
        let sphere_rings = SphereParams::new(1.0, 12, true).ring_count();
        assert_eq!(mesh.vertex_count(), sphere_rings * 13);
        for p in mesh.positions() {
            assert_abs_diff_eq!(p.length(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_capsule_faces_outward() {
        let mesh = generate_capsule(&CapsuleParams::new(1.0, 4.0, 32));
        assert_faces_outward(&mesh, DVec3::ZERO);
        let exact = PI * 2.0 + 4.0 / 3.0 * PI;
        let volume = signed_volume(&mesh);
        assert!(volume > 0.9 * exact && volume < exact);
    }

    #[test]
    fn test_capsule_uv_is_arc_length() {
        let params = CapsuleParams::new(1.0, 2.0 + PI, 8);
        let mesh = generate_capsule(&params);
        let uv = mesh.uv(0);
        assert_eq!(uv.first().map(|u| u.x), Some(0.0));
        assert_abs_diff_eq!(uv[uv.len() - 1].x, 1.0, epsilon = 1e-12);
        // Body length equals the full hemisphere arc sum, so the body spans
        // the middle half of U.
        let stride = 9;
        let rings = mesh.vertex_count() / stride;
        let top_of_body = uv[(rings / 2 - 1) * stride].x;
        let bottom_of_body = uv[(rings / 2) * stride].x;
        assert_abs_diff_eq!(top_of_body, 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(bottom_of_body, 0.75, epsilon = 1e-12);
    }
}
