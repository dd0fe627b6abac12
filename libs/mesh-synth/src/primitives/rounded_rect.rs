//! # Rounded Rectangle Primitive
//!
//! A rounded-corner outline in XY extruded along Z. The solid variant caps
//! both ends with fans; the hollow frame variant cuts an inner outline out
//! of the caps and lines the opening with a hard-edged wall.

use std::f64::consts::{FRAC_PI_2, PI};

use config::constants::{DEFAULT_CORNER_RESOLUTION, EPSILON};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::Axis;
use crate::mesh::MeshBuffer;
use crate::ops::{bridge_hard, bridge_soft, combine, fan};
use crate::ring::{arc_points, RingBasis};

/// Parameters for [`generate_rounded_rect`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundedRectParams {
    /// Extent along X
    pub width: f64,
    /// Extent along Y
    pub height: f64,
    /// Extent along Z
    pub depth: f64,
    /// Corner radius, clamped to half the smaller side
    pub corner_radius: f64,
    /// Segments per corner arc
    pub corner_resolution: u32,
    /// Border width of a hollow frame; `None` builds a solid slab
    pub frame_width: Option<f64>,
}

impl Default for RoundedRectParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 0.1,
            corner_radius: 0.1,
            corner_resolution: DEFAULT_CORNER_RESOLUTION,
            frame_width: None,
        }
    }
}

impl RoundedRectParams {
    /// Creates parameters for a solid slab.
    pub fn new(width: f64, height: f64, depth: f64, corner_radius: f64) -> Self {
        Self {
            width,
            height,
            depth,
            corner_radius,
            ..Default::default()
        }
    }
}

/// Creates a rounded rectangle slab or frame centered on the origin.
///
/// # Example
///
/// ```rust
/// use mesh_synth::primitives::{generate_rounded_rect, RoundedRectParams};
///
/// let mesh = generate_rounded_rect(&RoundedRectParams::new(2.0, 1.0, 0.2, 0.25));
/// assert!(mesh.validate().is_ok());
/// assert!(mesh.triangle_count() > 0);
/// ```
pub fn generate_rounded_rect(params: &RoundedRectParams) -> MeshBuffer {
    let half = DVec2::new(params.width, params.height) * 0.5;
    let radius = params.corner_radius.clamp(0.0, half.min_element().max(0.0));
    let resolution = if radius > EPSILON {
        params.corner_resolution
    } else {
        0
    };
    let front = DVec3::Z * (params.depth * 0.5);
    let outer = outline(half, radius, resolution);

    // Side wall: back to front gives outward normals for a CCW outline.
    let mut mesh = bridge_soft(&shift(&outer, -front), &shift(&outer, front), true, false, false);

    let inner_half = params.frame_width.map(|fw| half - DVec2::splat(fw));
    match inner_half {
        Some(inner_half) if inner_half.min_element() > EPSILON => {
            let inner_radius = (radius - (half.x - inner_half.x)).max(0.0);
            let inner = outline(inner_half, inner_radius, resolution);
            let (inner_front, inner_back) = (shift(&inner, front), shift(&inner, -front));
            let (outer_front, outer_back) = (shift(&outer, front), shift(&outer, -front));

            combine(&mut mesh, &bridge_hard(&outer_front, &inner_front, true, false, false));
            combine(&mut mesh, &bridge_hard(&inner_back, &outer_back, true, false, false));
            combine(&mut mesh, &bridge_hard(&inner_front, &inner_back, true, false, false));
        }
        _ => {
            let uv = DVec2::splat(0.5);
            combine(
                &mut mesh,
                &fan(&shift(&outer, front), front, uv, Some(DVec3::Z), true, false),
            );
            combine(
                &mut mesh,
                &fan(&shift(&outer, -front), -front, uv, Some(DVec3::NEG_Z), true, true),
            );
        }
    }

    log::debug!(
        "rounded rect {}x{}x{} r={}: {} triangles",
        params.width,
        params.height,
        params.depth,
        radius,
        mesh.triangle_count()
    );
    mesh
}

/// Counter-clockwise outline (seen from +Z) of four corner arcs in z = 0.
///
/// Each arc contributes `resolution + 1` points; the loop is left open.
fn outline(half: DVec2, radius: f64, resolution: u32) -> Vec<DVec3> {
    let basis = RingBasis::for_axis(Axis::Z);
    let inset = half - DVec2::splat(radius);
    let corners = [
        (DVec2::new(inset.x, -inset.y), -FRAC_PI_2),
        (DVec2::new(inset.x, inset.y), 0.0),
        (DVec2::new(-inset.x, inset.y), FRAC_PI_2),
        (DVec2::new(-inset.x, -inset.y), PI),
    ];

    corners
        .iter()
        .flat_map(|(center, start)| {
            arc_points(radius, center.extend(0.0), *start, FRAC_PI_2, resolution, basis).positions()
        })
        .collect()
}

fn shift(points: &[DVec3], offset: DVec3) -> Vec<DVec3> {
    points.iter().map(|p| *p + offset).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::test_support::{assert_faces_outward, assert_well_formed, signed_volume};
    use approx::assert_abs_diff_eq;

    fn rounded_area(w: f64, h: f64, r: f64) -> f64 {
        w * h - (4.0 - PI) * r * r
    }

    #[test]
    fn test_outline_is_counter_clockwise() {
        let points = outline(DVec2::new(1.0, 0.5), 0.2, 4);
        assert_eq!(points.len(), 20);
        let normal = crate::math::polygon_normal(&points);
        assert!(normal.z > 0.0);
        assert!(points[0].abs_diff_eq(DVec3::new(0.8, -0.5, 0.0), 1e-12));
    }

    #[test]
    fn test_solid_slab_volume() {
        let params = RoundedRectParams {
            corner_resolution: 32,
            ..RoundedRectParams::new(2.0, 1.0, 0.5, 0.25)
        };
        let mesh = generate_rounded_rect(&params);
        assert_well_formed(&mesh);
        assert_faces_outward(&mesh, DVec3::ZERO);
        let exact = rounded_area(2.0, 1.0, 0.25) * 0.5;
        assert_abs_diff_eq!(signed_volume(&mesh), exact, epsilon = 1e-3 * exact);
    }

    #[test]
    fn test_sharp_corners_make_a_box() {
        let mesh = generate_rounded_rect(&RoundedRectParams::new(2.0, 1.0, 1.0, 0.0));
        assert_well_formed(&mesh);
        assert_abs_diff_eq!(signed_volume(&mesh), 2.0, epsilon = 1e-12);
        assert_eq!(mesh.bounding_box().1, DVec3::new(1.0, 0.5, 0.5));
    }

    #[test]
    fn test_radius_is_clamped() {
        let mesh = generate_rounded_rect(&RoundedRectParams::new(1.0, 1.0, 1.0, 5.0));
        let (min, max) = mesh.bounding_box();
        assert_abs_diff_eq!(max.x - min.x, 1.0, epsilon = 1e-9);
        assert!(mesh.is_finite());
    }

    #[test]
    fn test_hollow_frame_volume() {
        let params = RoundedRectParams {
            corner_resolution: 32,
            frame_width: Some(0.1),
            ..RoundedRectParams::new(2.0, 1.0, 0.5, 0.25)
        };
        let mesh = generate_rounded_rect(&params);
        assert_well_formed(&mesh);
        let exact = (rounded_area(2.0, 1.0, 0.25) - rounded_area(1.8, 0.8, 0.15)) * 0.5;
        assert_abs_diff_eq!(signed_volume(&mesh), exact, epsilon = 5e-3 * exact);
    }

    #[test]
    fn test_frame_wider_than_slab_is_solid() {
        let solid = generate_rounded_rect(&RoundedRectParams::new(2.0, 1.0, 0.5, 0.25));
        let params = RoundedRectParams {
            frame_width: Some(0.6),
            ..RoundedRectParams::new(2.0, 1.0, 0.5, 0.25)
        };
        assert_eq!(generate_rounded_rect(&params), solid);
    }

    #[test]
    fn test_hollow_inner_wall_faces_opening() {
        let params = RoundedRectParams {
            frame_width: Some(0.2),
            ..RoundedRectParams::new(2.0, 2.0, 0.5, 0.0)
        };
        let mesh = generate_rounded_rect(&params);
        let p = mesh.positions();
        let mut inner_faces = 0;
        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t).map(|i| p[i as usize]);
            let centroid = (a + b + c) / 3.0;
            let normal = (b - a).cross(c - a);
            let on_inner_wall = centroid.x.abs().max(centroid.y.abs()) < 0.8 + 1e-9
                && centroid.x.abs().max(centroid.y.abs()) > 0.8 - 1e-9;
            if on_inner_wall && normal.length() > 1e-12 {
                inner_faces += 1;
                assert!(normal.dot(DVec3::new(centroid.x, centroid.y, 0.0)) < 0.0);
            }
        }
        assert!(inner_faces > 0);
    }
}
