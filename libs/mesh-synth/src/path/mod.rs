//! # Path Sweeping
//!
//! Orientation frames along a polyline and the pipe surface swept along it.
//!
//! ## Pipeline
//!
//! 1. [`PathFrameSolver`] validates the path, builds one miter plane per
//!    waypoint and folds a [`TwistState`] over the joints.
//! 2. [`generate_pipe`] samples one circle per segment end, projects it
//!    onto the miter planes and assembles the rings with caps.
//!
//! Observability goes through [`FrameTrace`]; the math never depends on it.

pub mod frame;
pub mod pipe;
pub mod trace;

pub use frame::{PathFrameSolver, PathFrames, SegmentFrame, TwistState};
pub use pipe::{generate_pipe, generate_pipe_traced, PipeParams};
pub use trace::{FrameTrace, LogTrace};

use glam::{DMat3, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::math::rotate_about;
use crate::ring::RingBasis;

/// A path vertex: position plus facing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedWaypoint {
    /// World position
    pub position: DVec3,
    /// Facing; maps +X to right, +Y to up and +Z to forward
    pub rotation: DQuat,
}

impl OrientedWaypoint {
    /// Creates a waypoint.
    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    /// Creates a waypoint with identity rotation.
    pub fn at(position: DVec3) -> Self {
        Self::new(position, DQuat::IDENTITY)
    }
}

/// Orthonormal right-handed basis attached to a path location.
///
/// `forward = right × up`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Direction of travel
    pub forward: DVec3,
    /// Cross-section up axis
    pub up: DVec3,
    /// Cross-section right axis
    pub right: DVec3,
}

impl Frame {
    /// Creates a frame from its three axes.
    pub fn new(forward: DVec3, up: DVec3, right: DVec3) -> Self {
        Self { forward, up, right }
    }

    /// Frame facing `forward`, with up and right derived from reference
    /// axes.
    ///
    /// When `forward` is within `threshold` (absolute cosine) of
    /// `up_ref`, the cross product with `up_ref` degenerates, so up is
    /// derived from `right_ref` instead.
    pub fn from_reference(forward: DVec3, up_ref: DVec3, right_ref: DVec3, threshold: f64) -> Self {
        if up_ref.dot(forward).abs() > threshold {
            let up = right_ref.cross(forward).normalize_or_zero();
            Self::new(forward, up, up.cross(forward))
        } else {
            let right = up_ref.cross(forward).normalize_or_zero();
            Self::new(forward, forward.cross(right), right)
        }
    }

    /// The frame rotated about its forward axis by `angle` radians.
    pub fn rotated(&self, angle: f64) -> Self {
        Self::new(
            self.forward,
            rotate_about(self.up, self.forward, angle),
            rotate_about(self.right, self.forward, angle),
        )
    }

    /// Cross-section basis for ring sampling.
    pub fn basis(&self) -> RingBasis {
        RingBasis::new(self.up, self.right)
    }

    /// Rotation taking +X, +Y and +Z to right, up and forward.
    pub fn rotation(&self) -> DQuat {
        DQuat::from_mat3(&DMat3::from_cols(self.right, self.up, self.forward))
    }

    /// Returns true if the axes are unit length and mutually orthogonal.
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let unit = |v: DVec3| (v.length() - 1.0).abs() < tolerance;
        unit(self.forward)
            && unit(self.up)
            && unit(self.right)
            && self.forward.dot(self.up).abs() < tolerance
            && self.forward.dot(self.right).abs() < tolerance
            && self.up.dot(self.right).abs() < tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_frame_is_right_handed() {
        for forward in [DVec3::X, DVec3::Z, DVec3::new(1.0, 2.0, 3.0).normalize()] {
            let frame = Frame::from_reference(forward, DVec3::Y, DVec3::X, 0.95);
            assert!(frame.is_orthonormal(1e-12));
            assert!(frame.right.cross(frame.up).abs_diff_eq(forward, 1e-12));
        }
    }

    #[test]
    fn test_gimbal_branch_for_vertical_forward() {
        let frame = Frame::from_reference(DVec3::Y, DVec3::Y, DVec3::X, 0.95);
        assert!(frame.is_orthonormal(1e-12));
        assert!(frame.up.abs_diff_eq(DVec3::X.cross(DVec3::Y), 1e-12));
        assert!(frame.right.cross(frame.up).abs_diff_eq(DVec3::Y, 1e-12));
    }

    #[test]
    fn test_rotation_maps_axes() {
        let frame = Frame::from_reference(DVec3::new(1.0, 1.0, 0.0).normalize(), DVec3::Y, DVec3::X, 0.95);
        let q = frame.rotation();
        assert!((q * DVec3::X).abs_diff_eq(frame.right, 1e-12));
        assert!((q * DVec3::Y).abs_diff_eq(frame.up, 1e-12));
        assert!((q * DVec3::Z).abs_diff_eq(frame.forward, 1e-12));
    }

    #[test]
    fn test_rotated_keeps_forward() {
        let frame = Frame::from_reference(DVec3::Z, DVec3::Y, DVec3::X, 0.95);
        let turned = frame.rotated(std::f64::consts::FRAC_PI_2);
        assert_eq!(turned.forward, frame.forward);
        assert!(turned.up.abs_diff_eq(-frame.right, 1e-12));
        assert!(turned.is_orthonormal(1e-12));
    }
}
