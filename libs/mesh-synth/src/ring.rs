//! # Ring Sampler
//!
//! Parametric point loops: circles, arcs and the grid assembly that turns a
//! stack of rings into a mesh.
//!
//! A ring sampled at resolution `N` holds `N + 1` samples. Sample `N`
//! repeats sample `0` with `uv.y = 1`, so the texture seam is explicit.

use std::f64::consts::TAU;

use config::constants::RING_CLOSURE_EPSILON;
use glam::{DVec2, DVec3};

use crate::math::fraction;
use crate::mesh::MeshBuffer;
use crate::primitives::Axis;
use crate::triangulate::triangulate;

/// One sample of a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSample {
    /// Sample position
    pub position: DVec3,
    /// Texture coordinate; `uv.y` runs around the ring
    pub uv: DVec2,
    /// Outward unit normal
    pub normal: DVec3,
}

/// Orientation of a ring's plane.
///
/// Samples run from `right` towards `up`, counter-clockwise when viewed
/// from the tip of [`RingBasis::forward`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBasis {
    /// Direction at a quarter turn
    pub up: DVec3,
    /// Direction of the first sample
    pub right: DVec3,
}

impl RingBasis {
    /// Creates a basis from its two in-plane axes.
    pub fn new(up: DVec3, right: DVec3) -> Self {
        Self { up, right }
    }

    /// Basis whose forward direction is the given world axis.
    pub fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::new(DVec3::Z, DVec3::Y),
            Axis::Y => Self::new(DVec3::X, DVec3::Z),
            Axis::Z => Self::new(DVec3::Y, DVec3::X),
        }
    }

    /// Normal of the ring plane, `right × up`.
    #[inline]
    pub fn forward(&self) -> DVec3 {
        self.right.cross(self.up)
    }

    /// In-plane unit direction at `angle` radians from `right`.
    #[inline]
    pub fn direction(&self, angle: f64) -> DVec3 {
        let (sin, cos) = angle.sin_cos();
        self.right * cos + self.up * sin
    }
}

/// An ordered loop of point samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ring {
    samples: Vec<PointSample>,
}

impl Ring {
    /// Wraps a list of samples.
    pub fn new(samples: Vec<PointSample>) -> Self {
        Self { samples }
    }

    /// The samples in order.
    #[inline]
    pub fn samples(&self) -> &[PointSample] {
        &self.samples
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the ring has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns true if the first and last samples coincide.
    pub fn is_closed(&self) -> bool {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) if self.samples.len() > 1 => {
                first.position.distance(last.position) < RING_CLOSURE_EPSILON
            }
            _ => false,
        }
    }

    /// Sample positions.
    pub fn positions(&self) -> Vec<DVec3> {
        self.samples.iter().map(|s| s.position).collect()
    }

    /// The same ring traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self::new(self.samples.iter().rev().copied().collect())
    }

    /// The same ring moved by `offset`.
    pub fn translated(&self, offset: DVec3) -> Self {
        Self::new(
            self.samples
                .iter()
                .map(|s| PointSample {
                    position: s.position + offset,
                    ..*s
                })
                .collect(),
        )
    }

    /// Overrides the `uv.x` coordinate of every sample.
    pub fn with_u(mut self, u: f64) -> Self {
        for s in &mut self.samples {
            s.uv.x = u;
        }
        self
    }
}

/// Samples `resolution + 1` points around a circle.
///
/// The circle lies in the plane spanned by `basis.right` and `basis.up`.
/// The last sample is an exact copy of the first with `uv.y = 1`.
/// A resolution of zero yields a single sample.
///
/// # Example
///
/// ```rust
/// use mesh_synth::{circle_points, RingBasis};
/// use glam::DVec3;
///
/// let ring = circle_points(1.0, DVec3::ZERO, 8, RingBasis::new(DVec3::Y, DVec3::X));
/// assert_eq!(ring.len(), 9);
/// assert!(ring.is_closed());
/// ```
pub fn circle_points(radius: f64, center: DVec3, resolution: u32, basis: RingBasis) -> Ring {
    let count = resolution as usize + 1;
    let mut samples = Vec::with_capacity(count);

    for k in 0..count {
        let angle = if k == count - 1 || resolution == 0 {
            0.0
        } else {
            TAU * k as f64 / f64::from(resolution)
        };
        let direction = basis.direction(angle);
        samples.push(PointSample {
            position: center + direction * radius,
            uv: DVec2::new(0.0, fraction(k, count)),
            normal: direction,
        });
    }

    Ring::new(samples)
}

/// Samples `resolution + 1` points along a circular arc.
///
/// The arc starts at `start_angle` (radians from `basis.right`) and sweeps
/// `sweep` radians towards `basis.up`. Both endpoints are included.
pub fn arc_points(
    radius: f64,
    center: DVec3,
    start_angle: f64,
    sweep: f64,
    resolution: u32,
    basis: RingBasis,
) -> Ring {
    let count = resolution as usize + 1;
    let samples = (0..count)
        .map(|k| {
            let t = fraction(k, count);
            let direction = basis.direction(start_angle + sweep * t);
            PointSample {
                position: center + direction * radius,
                uv: DVec2::new(0.0, t),
                normal: direction,
            }
        })
        .collect();

    Ring::new(samples)
}

/// Assembles stacked rings of equal length into a mesh.
///
/// Positions, normals and uv0 are copied from the samples; triangles come
/// from [`triangulate`] over the `rings × samples` grid.
pub fn rings_to_mesh(rings: &[Ring], flip: bool) -> MeshBuffer {
    let length = rings.first().map_or(0, Ring::len);
    debug_assert!(rings.iter().all(|r| r.len() == length));

    let mut mesh = MeshBuffer::with_capacity(rings.len() * length, 0);
    for sample in rings.iter().flat_map(Ring::samples) {
        mesh.push_vertex(sample.position, sample.normal, sample.uv);
    }
    mesh.triangles = triangulate(rings.len(), length, flip);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_circle_closure() {
        for n in [3, 8, 33] {
            let ring = circle_points(2.5, DVec3::new(1.0, 2.0, 3.0), n, RingBasis::for_axis(Axis::Z));
            assert_eq!(ring.len(), n as usize + 1);
            let first = ring.samples()[0].position;
            let last = ring.samples()[n as usize].position;
            assert!(first.distance(last) < 1e-4);
            assert!(ring.is_closed());
        }
    }

    #[test]
    fn test_circle_radius_and_normals() {
        let center = DVec3::new(0.0, 5.0, 0.0);
        let ring = circle_points(3.0, center, 12, RingBasis::for_axis(Axis::Y));
        for s in ring.samples() {
            assert_abs_diff_eq!(s.position.distance(center), 3.0, epsilon = 1e-12);
            assert!(s.normal.abs_diff_eq((s.position - center) / 3.0, 1e-12));
            assert_abs_diff_eq!(s.position.y, 5.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_circle_uv_runs_around() {
        let ring = circle_points(1.0, DVec3::ZERO, 4, RingBasis::for_axis(Axis::Z));
        let v: Vec<f64> = ring.samples().iter().map(|s| s.uv.y).collect();
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_circle_zero_resolution_is_single_point() {
        let ring = circle_points(1.0, DVec3::ZERO, 0, RingBasis::for_axis(Axis::Z));
        assert_eq!(ring.len(), 1);
        assert!(!ring.is_closed());
        assert!(ring.samples()[0].position.is_finite());
    }

    #[test]
    fn test_axis_bases_are_right_handed() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let basis = RingBasis::for_axis(axis);
            assert_eq!(basis.forward(), axis.direction());
        }
    }

    #[test]
    fn test_arc_endpoints() {
        let basis = RingBasis::for_axis(Axis::Z);
        let arc = arc_points(1.0, DVec3::ZERO, 0.0, std::f64::consts::FRAC_PI_2, 4, basis);
        assert_eq!(arc.len(), 5);
        assert!(arc.samples()[0].position.abs_diff_eq(DVec3::X, 1e-12));
        assert!(arc.samples()[4].position.abs_diff_eq(DVec3::Y, 1e-12));
        assert!(!arc.is_closed());
    }

    #[test]
    fn test_reversed_and_translated() {
        let ring = circle_points(1.0, DVec3::ZERO, 4, RingBasis::for_axis(Axis::Z));
        let moved = ring.reversed().translated(DVec3::Z);
        assert_eq!(moved.samples()[0].position, ring.samples()[4].position + DVec3::Z);
        assert_eq!(moved.with_u(0.5).samples()[2].uv.x, 0.5);
    }

    #[test]
    fn test_rings_to_mesh_faces_outward() {
        let basis = RingBasis::for_axis(Axis::Z);
        let rings = vec![
            circle_points(1.0, DVec3::ZERO, 8, basis),
            circle_points(1.0, DVec3::Z, 8, basis),
        ];
        let mesh = rings_to_mesh(&rings, false);
        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.triangle_count(), 16);
        assert!(mesh.validate().is_ok());

        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t);
            let p = mesh.positions();
            let normal = (p[b as usize] - p[a as usize]).cross(p[c as usize] - p[a as usize]);
            let centroid = (p[a as usize] + p[b as usize] + p[c as usize]) / 3.0;
            let radial = DVec3::new(centroid.x, centroid.y, 0.0);
            assert!(normal.dot(radial) > 0.0);
        }
    }
}
