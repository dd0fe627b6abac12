//! # Cylinder Primitive
//!
//! Generates ring-stacked cylinders with optional cap fans and a hollow
//! (tube) variant.
//!
//! Three UV channels are written:
//!
//! - `uv0`: normalized (length, circumference)
//! - `uv1`: physical (length, circumference) in world units
//! - `uv2`: length in circumference units, circumference normalized, so a
//!   square texture tiles without stretching

use std::f64::consts::TAU;

use config::constants::{DEFAULT_HEIGHT_RESOLUTION, DEFAULT_RESOLUTION, EPSILON};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::Axis;
use crate::math::fraction;
use crate::mesh::MeshBuffer;
use crate::ops::{bridge_hard, combine};
use crate::ring::{circle_points, rings_to_mesh, Ring, RingBasis};

/// Parameters for [`generate_cylinder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderParams {
    /// Outer radius
    pub radius: f64,
    /// Length along the axis, centered on the origin
    pub height: f64,
    /// Segments around the circumference
    pub loops: u32,
    /// Number of rings stacked along the axis (at least 2 for a surface)
    pub height_resolution: u32,
    /// Close both ends with cap fans (ignored for hollow cylinders)
    pub with_caps: bool,
    /// Axis the cylinder is aligned with
    pub axis: Axis,
    /// Turn the mesh inside out
    pub flip: bool,
    /// Inner radius; `Some` builds a tube with bridged rims
    pub inner_radius: Option<f64>,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 1.0,
            loops: DEFAULT_RESOLUTION,
            height_resolution: DEFAULT_HEIGHT_RESOLUTION,
            with_caps: true,
            axis: Axis::Y,
            flip: false,
            inner_radius: None,
        }
    }
}

impl CylinderParams {
    /// Creates parameters for a solid, capped cylinder along Y.
    pub fn new(radius: f64, height: f64, loops: u32, height_resolution: u32) -> Self {
        Self {
            radius,
            height,
            loops,
            height_resolution,
            ..Default::default()
        }
    }
}

/// Creates a cylinder mesh.
///
/// # Arguments
///
/// * `params` - Shape and resolution parameters
///
/// # Returns
///
/// A body of `height_resolution` rings of `loops + 1` samples, followed by
/// one ring-copy fan per cap.
///
/// # Example
///
/// ```rust
/// use mesh_synth::primitives::{generate_cylinder, CylinderParams};
///
/// let mesh = generate_cylinder(&CylinderParams::new(1.0, 2.0, 8, 2));
/// assert_eq!(mesh.vertex_count(), 2 * 9 + 2 * 9);
/// ```
pub fn generate_cylinder(params: &CylinderParams) -> MeshBuffer {
    let basis = RingBasis::for_axis(params.axis);

    let mut mesh = match params.inner_radius {
        Some(inner) => hollow(params, inner, basis),
        None => {
            let mut mesh = body(params.radius, params, basis);
            if params.with_caps {
                let half = params.height * 0.5;
                combine(&mut mesh, &cap(params.radius, half, params.loops, basis, true));
                combine(&mut mesh, &cap(params.radius, -half, params.loops, basis, false));
            }
            mesh
        }
    };

    if params.flip {
        mesh.flip_faces();
    }

    log::debug!(
        "cylinder: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}

/// Side wall at `radius`, facing away from the axis.
fn body(radius: f64, params: &CylinderParams, basis: RingBasis) -> MeshBuffer {
    let rings = params.height_resolution as usize;
    let axis = basis.forward();

    let stack: Vec<Ring> = (0..rings)
        .map(|i| {
            let t = fraction(i, rings);
            let center = axis * (params.height * (t - 0.5));
            circle_points(radius, center, params.loops, basis).with_u(t)
        })
        .collect();

    let mut mesh = rings_to_mesh(&stack, false);
    fill_scaled_uvs(&mut mesh, params.height, TAU * radius);
    mesh
}

/// Cap fan over a copy of the end ring, facing `+axis` when `top`.
fn cap(radius: f64, offset: f64, loops: u32, basis: RingBasis, top: bool) -> MeshBuffer {
    let axis = basis.forward();
    let normal = if top { axis } else { -axis };
    let ring = circle_points(radius, axis * offset, loops, basis);

    let mut mesh = MeshBuffer::with_capacity(ring.len(), ring.len().saturating_sub(3) * 3);
    let mut physical = Vec::with_capacity(ring.len());
    for sample in ring.samples() {
        let local = DVec2::new(sample.normal.dot(basis.right), sample.normal.dot(basis.up));
        mesh.push_vertex(sample.position, normal, local * 0.5 + 0.5);
        physical.push(local * radius);
    }
    mesh.uvs[1] = physical;
    mesh.uvs[2] = mesh.uvs[0].clone();

    // Sample `loops` duplicates sample 0 and is left out of the fan.
    for j in 1..(loops as usize).saturating_sub(1) {
        let (a, b) = (j as u32, j as u32 + 1);
        if top {
            mesh.triangles.extend_from_slice(&[0, a, b]);
        } else {
            mesh.triangles.extend_from_slice(&[0, b, a]);
        }
    }
    mesh
}

/// Outer wall, inward-facing inner wall and two bridged rims.
fn hollow(params: &CylinderParams, inner: f64, basis: RingBasis) -> MeshBuffer {
    let axis = basis.forward();
    let half = params.height * 0.5;
    let width = params.radius - inner;

    let mut mesh = body(params.radius, params, basis);
    let mut inner_wall = body(inner, params, basis);
    inner_wall.flip_faces();
    combine(&mut mesh, &inner_wall);

    let rim = |radius: f64, offset: f64| {
        circle_points(radius, axis * offset, params.loops, basis).positions()
    };

    let mut top = bridge_hard(&rim(params.radius, half), &rim(inner, half), false, false, false);
    let mut bottom = bridge_hard(&rim(inner, -half), &rim(params.radius, -half), false, false, false);
    fill_scaled_uvs(&mut top, width, TAU * params.radius);
    fill_scaled_uvs(&mut bottom, width, TAU * params.radius);
    combine(&mut mesh, &top);
    combine(&mut mesh, &bottom);
    mesh
}

/// Derives `uv1` and `uv2` from the normalized `uv0` channel.
pub(crate) fn fill_scaled_uvs(mesh: &mut MeshBuffer, length: f64, circumference: f64) {
    let tile = if circumference > EPSILON {
        length / circumference
    } else {
        0.0
    };
    mesh.uvs[1] = mesh.uvs[0]
        .iter()
        .map(|uv| DVec2::new(uv.x * length, uv.y * circumference))
        .collect();
    mesh.uvs[2] = mesh.uvs[0]
        .iter()
        .map(|uv| DVec2::new(uv.x * tile, uv.y))
        .collect();
}
