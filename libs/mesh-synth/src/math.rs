//! # Geometry Helpers
//!
//! Small vector utilities shared by the ring sampler, the bridge engine and
//! the path frame solver.

use config::constants::PARALLEL_EPSILON;
use glam::{DQuat, DVec3};

/// An infinite plane given by a point and a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Any point on the plane
    pub origin: DVec3,
    /// Unit normal
    pub normal: DVec3,
}

impl Plane {
    /// Creates a plane through `origin` with the given normal.
    pub fn new(origin: DVec3, normal: DVec3) -> Self {
        Self { origin, normal }
    }

    /// Signed distance from `point` to the plane.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        (point - self.origin).dot(self.normal)
    }

    /// Intersects the ray `origin + t * direction` with the plane.
    ///
    /// Returns `None` when the direction is parallel to the plane. The
    /// parameter `t` may be negative: the ray is treated as a full line.
    pub fn intersect_ray(&self, origin: DVec3, direction: DVec3) -> Option<DVec3> {
        let denom = direction.dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.origin - origin).dot(self.normal) / denom;
        Some(origin + direction * t)
    }
}

/// Signed angle in radians from `from` to `to`, measured about `axis`
/// (right-handed). Both vectors are expected to be roughly perpendicular to
/// the axis.
pub fn signed_angle(from: DVec3, to: DVec3, axis: DVec3) -> f64 {
    from.cross(to).dot(axis).atan2(from.dot(to))
}

/// Rotates `v` by `angle` radians about the unit `axis`.
#[inline]
pub fn rotate_about(v: DVec3, axis: DVec3, angle: f64) -> DVec3 {
    DQuat::from_axis_angle(axis, angle) * v
}

/// Component of `v` perpendicular to the unit `axis`.
#[inline]
pub fn reject(v: DVec3, axis: DVec3) -> DVec3 {
    v - axis * v.dot(axis)
}

/// `i / (count - 1)` with a zero result for single-sample ranges.
#[inline]
pub(crate) fn fraction(i: usize, count: usize) -> f64 {
    if count > 1 {
        i as f64 / (count - 1) as f64
    } else {
        0.0
    }
}

/// Newell normal of a polygon loop (unnormalized, zero for degenerate loops).
pub(crate) fn polygon_normal(points: &[DVec3]) -> DVec3 {
    let mut normal = DVec3::ZERO;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        normal += a.cross(b);
    }
    normal
}
