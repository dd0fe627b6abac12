//! # Primitives
//!
//! Mesh generation for parametric solids. Every generator is a pure function
//! from shape parameters to a fresh [`MeshBuffer`](crate::MeshBuffer) and
//! never fails: zero resolutions degrade to minimal output.

pub mod capsule;
pub mod cylinder;
pub mod helix;
pub mod quad;
pub mod rectangle;
pub mod rounded_rect;
pub mod sphere;
pub mod tetrahedron;
pub mod torus;

pub use capsule::{generate_capsule, CapsuleParams};
pub use cylinder::{generate_cylinder, CylinderParams};
pub use helix::{generate_double_helix, DoubleHelixParams};
pub use quad::{generate_patch, generate_quad, QuadParams, Shading};
pub use rectangle::{generate_plane, generate_rectangle, RectangleParams};
pub use rounded_rect::{generate_rounded_rect, RoundedRectParams};
pub use sphere::{generate_sphere, SphereParams};
pub use tetrahedron::{generate_tetrahedron, TetrahedronParams};
pub use torus::{generate_torus, TorusParams};

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// World axis a primitive is aligned with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// The X axis
    X,
    /// The Y axis
    #[default]
    Y,
    /// The Z axis
    Z,
}

impl Axis {
    /// Unit vector along the axis.
    pub fn direction(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }
}

/// Shared assertions for generator tests.
#[cfg(test)]
pub(crate) mod test_support {
    use crate::MeshBuffer;
    use glam::DVec3;

    /// Checks the channel invariant and finiteness.
    pub fn assert_well_formed(mesh: &MeshBuffer) {
        assert!(mesh.validate().is_ok(), "{:?}", mesh.validate());
        assert!(mesh.is_finite());
        assert_eq!(mesh.triangles().len() % 3, 0);
    }

    /// Checks that every non-degenerate face points away from `center`.
    pub fn assert_faces_outward(mesh: &MeshBuffer, center: DVec3) {
        let p = mesh.positions();
        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t).map(|i| p[i as usize]);
            let normal = (b - a).cross(c - a);
            if normal.length() < 1e-9 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(
                normal.dot(centroid - center) > 0.0,
                "triangle {t} faces inward"
            );
        }
    }

    /// Signed volume enclosed by a closed mesh.
    pub fn signed_volume(mesh: &MeshBuffer) -> f64 {
        let p = mesh.positions();
        (0..mesh.triangle_count())
            .map(|t| {
                let [a, b, c] = mesh.triangle(t).map(|i| p[i as usize]);
                a.dot(b.cross(c)) / 6.0
            })
            .sum()
    }
}
