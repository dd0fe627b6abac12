//! # Tetrahedron Primitive
//!
//! Regular tetrahedron from a single height, apex up, centroid at the
//! origin. Face normals are placed analytically from the dihedral angle
//! instead of being recovered from cross products.

use std::f64::consts::TAU;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::mesh::MeshBuffer;
use crate::ops::{bridge_hard, combine};

/// Dihedral angle of a regular tetrahedron, `acos(1/3)`.
pub const DIHEDRAL_ANGLE: f64 = 1.230_959_417_340_774_6;

/// Parameters for [`generate_tetrahedron`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TetrahedronParams {
    /// Apex-to-base height
    pub height: f64,
    /// Border width of each face; `Some` builds four open triangular frames
    pub frame_width: Option<f64>,
}

impl Default for TetrahedronParams {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TetrahedronParams {
    /// Creates parameters for a solid tetrahedron.
    pub fn new(height: f64) -> Self {
        Self {
            height,
            frame_width: None,
        }
    }

    /// Edge length of the tetrahedron.
    pub fn edge_length(&self) -> f64 {
        self.height * 1.5_f64.sqrt()
    }
}

/// Creates a tetrahedron mesh.
///
/// Solid tetrahedra have one vertex triple per face (12 vertices). The
/// hollow variant insets every face towards its centroid by `frame_width`
/// and bridges the outer edge loop to the inset loop.
///
/// # Example
///
/// ```rust
/// use mesh_synth::primitives::{generate_tetrahedron, TetrahedronParams};
///
/// let mesh = generate_tetrahedron(&TetrahedronParams::new(1.0));
/// assert_eq!(mesh.vertex_count(), 12);
/// assert_eq!(mesh.triangle_count(), 4);
/// ```
pub fn generate_tetrahedron(params: &TetrahedronParams) -> MeshBuffer {
    let faces = faces(params.height);

    let mesh = match params.frame_width {
        Some(width) => {
            let inradius = params.edge_length() / (2.0 * 3.0_f64.sqrt());
            let scale = if inradius > 0.0 {
                (1.0 - width / inradius).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut mesh = MeshBuffer::new();
            for (corners, _) in &faces {
                let centroid = (corners[0] + corners[1] + corners[2]) / 3.0;
                let inner: Vec<DVec3> = corners
                    .iter()
                    .map(|c| centroid + (*c - centroid) * scale)
                    .collect();
                combine(&mut mesh, &bridge_hard(corners, &inner, true, false, false));
            }
            mesh
        }
        None => {
            let mut mesh = MeshBuffer::with_capacity(12, 12);
            let uvs = [DVec2::ZERO, DVec2::X, DVec2::new(0.5, 1.0)];
            for (corners, normal) in &faces {
                let base = mesh.vertex_count() as u32;
                for (corner, uv) in corners.iter().zip(uvs) {
                    mesh.push_vertex(*corner, *normal, uv);
                }
                mesh.extend_triangles(&[0, 1, 2], base);
            }
            mesh
        }
    };

    log::debug!(
        "tetrahedron h={}: {} triangles",
        params.height,
        mesh.triangle_count()
    );
    mesh
}

/// The four faces as counter-clockwise (seen from outside) corner triples
/// with their outward normals: three sides, then the base.
fn faces(height: f64) -> [([DVec3; 3], DVec3); 4] {
    let edge = height * 1.5_f64.sqrt();
    let circumradius = edge / 3.0_f64.sqrt();
    let apex = DVec3::new(0.0, 0.75 * height, 0.0);
    let base_y = -0.25 * height;

    let base = |k: f64| {
        let (sin, cos) = (TAU * k / 3.0).sin_cos();
        DVec3::new(circumradius * sin, base_y, circumradius * cos)
    };
    let b = [base(0.0), base(1.0), base(2.0)];

    let (horizontal, vertical) = (DIHEDRAL_ANGLE.sin(), DIHEDRAL_ANGLE.cos());
    let side = |k: usize| {
        // The side opposite base vertex k + 2 faces away from it.
        let (sin, cos) = (TAU * (k as f64 + 0.5) / 3.0).sin_cos();
        let normal = DVec3::new(horizontal * sin, vertical, horizontal * cos);
        ([apex, b[k], b[(k + 1) % 3]], normal)
    };

    let faces = [side(0), side(1), side(2), ([b[0], b[2], b[1]], DVec3::NEG_Y)];
    faces.map(|(corners, normal)| (wind_outward(corners, normal), normal))
}

/// Orders a triangle so its winding agrees with `normal`.
fn wind_outward([a, b, c]: [DVec3; 3], normal: DVec3) -> [DVec3; 3] {
    if (b - a).cross(c - a).dot(normal) < 0.0 {
        [a, c, b]
    } else {
        [a, b, c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::test_support::{assert_faces_outward, assert_well_formed, signed_volume};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_dihedral_constant() {
        assert_abs_diff_eq!(DIHEDRAL_ANGLE, (1.0_f64 / 3.0).acos(), epsilon = 1e-15);
    }

    #[test]
    fn test_regular_edges_and_height() {
        let params = TetrahedronParams::new(2.0);
        let mesh = generate_tetrahedron(&params);
        assert_well_formed(&mesh);
        let p = mesh.positions();
        for t in 0..4 {
            let [a, b, c] = mesh.triangle(t).map(|i| p[i as usize]);
            for (x, y) in [(a, b), (b, c), (c, a)] {
                assert_abs_diff_eq!(x.distance(y), params.edge_length(), epsilon = 1e-12);
            }
        }
        let (min, max) = mesh.bounding_box();
        assert_abs_diff_eq!(max.y - min.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_analytic_normals_match_geometry() {
        let mesh = generate_tetrahedron(&TetrahedronParams::new(1.0));
        let p = mesh.positions();
        for t in 0..4 {
            let [a, b, c] = mesh.triangle(t);
            let geometric = (p[b as usize] - p[a as usize])
                .cross(p[c as usize] - p[a as usize])
                .normalize();
            assert!(geometric.abs_diff_eq(mesh.normals()[a as usize], 1e-12));
        }
    }

    #[test]
    fn test_faces_meet_at_dihedral_angle() {
        let faces = faces(1.0);
        for i in 0..4 {
            for j in (i + 1)..4 {
                let between = faces[i].1.angle_between(faces[j].1);
                assert_abs_diff_eq!(between, PI - DIHEDRAL_ANGLE, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_volume() {
        let params = TetrahedronParams::new(1.0);
        let mesh = generate_tetrahedron(&params);
        assert_faces_outward(&mesh, DVec3::ZERO);
        let a = params.edge_length();
        assert_abs_diff_eq!(signed_volume(&mesh), a.powi(3) / (6.0 * 2.0_f64.sqrt()), epsilon = 1e-12);
    }

    #[test]
    fn test_hollow_frames() {
        let params = TetrahedronParams {
            frame_width: Some(0.05),
            ..TetrahedronParams::new(1.0)
        };
        let mesh = generate_tetrahedron(&params);
        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 4 * 3 * 4);
        assert_eq!(mesh.triangle_count(), 4 * 6);
        assert_faces_outward(&mesh, DVec3::ZERO);

        // Frames cover less than the full faces.
        let solid = signed_volume(&generate_tetrahedron(&TetrahedronParams::new(1.0)));
        let framed = signed_volume(&mesh);
        assert!(framed > 0.0 && framed < solid);
    }

    #[test]
    fn test_oversized_frame_closes_faces() {
        let params = TetrahedronParams {
            frame_width: Some(10.0),
            ..TetrahedronParams::new(1.0)
        };
        let mesh = generate_tetrahedron(&params);
        let solid = signed_volume(&generate_tetrahedron(&TetrahedronParams::new(1.0)));
        assert_abs_diff_eq!(signed_volume(&mesh), solid, epsilon = 1e-12);
    }
}
