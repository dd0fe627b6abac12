//! # Path Frame Solver
//!
//! Computes miter planes, waypoint frames and twist-corrected segment frames
//! for a polyline.
//!
//! ## Twist cancellation
//!
//! Each segment starts from a naive frame derived from the reference axes.
//! Naive frames of consecutive segments disagree about where "up" is, which
//! would show up as a seam twisting around the pipe. At every joint one
//! probe point of the incoming cross-section is projected onto the miter
//! plane and its angle is measured about both segment axes; the difference
//! is added to a running angle that rotates every later segment frame.
//!
//! The miter plane bisects the joint, so the two cross-sections it cuts are
//! the same ellipse with the same orientation: aligning one probe point
//! aligns the whole ring.
//!
//! ## Closed loops
//!
//! When the last waypoint returns to the first, the end planes become the
//! closing miter plane. The twist left over at the closing joint is spread
//! evenly over all segments so every joint, the closing one included,
//! matches up.

use std::f64::consts::{PI, TAU};

use config::constants::{LOOP_CLOSURE_EPSILON, MIN_LOOP_WAYPOINTS, MIN_SEGMENT_LENGTH};
use glam::DVec3;

use super::pipe::PipeParams;
use super::trace::FrameTrace;
use super::{Frame, OrientedWaypoint};
use crate::error::PipeError;
use crate::math::{reject, signed_angle, Plane};

// =============================================================================
// TWIST STATE
// =============================================================================

/// Running state of the twist fold: the angle accumulated so far and the
/// corrected frame of the last visited segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwistState {
    /// Rotation applied to the current segment's naive frame (radians)
    pub accumulated_angle: f64,
    /// Corrected frame of the current segment
    pub prev_frame: Frame,
}

impl TwistState {
    /// Starts the fold on the first segment's frame with no correction.
    pub fn new(first: Frame) -> Self {
        Self {
            accumulated_angle: 0.0,
            prev_frame: first,
        }
    }

    /// Advances the fold over one joint.
    ///
    /// # Arguments
    ///
    /// * `probe` - A point of the incoming cross-section, on the joint's
    ///   miter plane
    /// * `joint` - The joint waypoint position
    /// * `next` - Naive frame of the outgoing segment
    pub fn step(&self, probe: DVec3, joint: DVec3, next: Frame) -> Self {
        let prev = &self.prev_frame;
        let offset = probe - joint;

        let angle_prev = signed_angle(prev.up, reject(offset, prev.forward), prev.forward);
        let carried = next.rotated(self.accumulated_angle);
        let angle_next = signed_angle(carried.up, reject(offset, next.forward), next.forward);

        let accumulated = self.accumulated_angle + wrap_angle(angle_next - angle_prev);
        Self {
            accumulated_angle: accumulated,
            prev_frame: next.rotated(accumulated),
        }
    }
}

// =============================================================================
// SOLVED FRAMES
// =============================================================================

/// Cross-section frames of one path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentFrame {
    /// Frame of the ring at the segment start
    pub start: Frame,
    /// Frame of the ring at the segment end
    pub end: Frame,
    /// Midpoint of the segment; rings are sampled around it
    pub center: DVec3,
    /// Accumulated twist correction for this segment (radians)
    pub twist: f64,
}

impl SegmentFrame {
    /// Unit direction of the segment.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.start.forward
    }
}

/// Result of [`PathFrameSolver::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathFrames {
    /// Miter frame at each waypoint
    pub waypoints: Vec<Frame>,
    /// Miter plane at each waypoint
    pub planes: Vec<Plane>,
    /// Twist-corrected frames, one per segment
    pub segments: Vec<SegmentFrame>,
    /// Cumulative arc length at each waypoint
    pub arc_lengths: Vec<f64>,
    /// The path returns to its first waypoint
    pub closed: bool,
    /// Twist spread over the segments to close a loop (zero for open paths)
    pub closure_twist: f64,
}

impl PathFrames {
    /// Total path length.
    pub fn total_length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Twist accumulated by the fold at the last segment.
    pub fn accumulated_twist(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.twist)
    }

    /// Returns the path with each rotation replaced by the solved frame.
    pub fn oriented_waypoints(&self, path: &[OrientedWaypoint]) -> Vec<OrientedWaypoint> {
        path.iter()
            .zip(&self.waypoints)
            .map(|(waypoint, frame)| OrientedWaypoint::new(waypoint.position, frame.rotation()))
            .collect()
    }
}

// =============================================================================
// SOLVER
// =============================================================================

/// Computes continuous orientation frames along a path.
///
/// # Example
///
/// ```rust
/// use mesh_synth::path::{OrientedWaypoint, PathFrameSolver, PipeParams};
/// use glam::DVec3;
///
/// let path = [
///     OrientedWaypoint::at(DVec3::ZERO),
///     OrientedWaypoint::at(DVec3::new(0.0, 0.0, 2.0)),
///     OrientedWaypoint::at(DVec3::new(2.0, 0.0, 2.0)),
/// ];
/// let frames = PathFrameSolver::new(PipeParams::default()).solve(&path, &mut ()).unwrap();
/// assert_eq!(frames.segments.len(), 2);
/// assert!(!frames.closed);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathFrameSolver {
    params: PipeParams,
}

impl PathFrameSolver {
    /// Creates a solver with the given pipe parameters.
    pub fn new(params: PipeParams) -> Self {
        Self { params }
    }

    /// Solves frames for `path`.
    ///
    /// # Errors
    ///
    /// - [`PipeError::PathTooShort`] for fewer than two waypoints
    /// - [`PipeError::NonFiniteWaypoint`] when a position is NaN or infinite
    /// - [`PipeError::CoincidentWaypoints`] when a segment has no length,
    ///   naming the segment's first waypoint
    /// - [`PipeError::NoIntersection`] when a joint folds back on itself so
    ///   no miter plane exists, or a projection runs parallel to it
    pub fn solve(
        &self,
        path: &[OrientedWaypoint],
        trace: &mut impl FrameTrace,
    ) -> Result<PathFrames, PipeError> {
        let n = path.len();
        if n < 2 {
            return Err(PipeError::PathTooShort { len: n });
        }

        let positions: Vec<DVec3> = path.iter().map(|w| w.position).collect();
        if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
            return Err(PipeError::NonFiniteWaypoint { waypoint_index: i });
        }
        let mut directions = Vec::with_capacity(n - 1);
        let mut arc_lengths = Vec::with_capacity(n);
        arc_lengths.push(0.0);
        for (i, pair) in positions.windows(2).enumerate() {
            let delta = pair[1] - pair[0];
            let length = delta.length();
            if length < MIN_SEGMENT_LENGTH {
                return Err(PipeError::CoincidentWaypoints { waypoint_index: i });
            }
            directions.push(delta / length);
            arc_lengths.push(arc_lengths[i] + length);
        }

        let closed =
            n >= MIN_LOOP_WAYPOINTS && positions[0].distance(positions[n - 1]) < LOOP_CLOSURE_EPSILON;
        let segment_count = directions.len();
        let planes = self.miter_planes(&positions, &directions, closed)?;

        let (up_ref, right_ref) = if self.params.update_orientations {
            (self.params.world_up, self.params.world_right)
        } else {
            let rotation = path[0].rotation;
            (rotation * DVec3::Y, rotation * DVec3::X)
        };
        let naive: Vec<Frame> = directions
            .iter()
            .map(|d| Frame::from_reference(*d, up_ref, right_ref, self.params.gimbal_threshold))
            .collect();

        // Twist fold over the interior joints.
        let mut state = TwistState::new(naive[0]);
        let mut twists = Vec::with_capacity(segment_count);
        twists.push(0.0);
        for j in 1..segment_count {
            let probe = self.probe(&state.prev_frame, &positions, &planes[j], j)?;
            let next = state.step(probe, positions[j], naive[j]);
            trace.twist(j, next.accumulated_angle - state.accumulated_angle, next.accumulated_angle);
            twists.push(next.accumulated_angle);
            state = next;
        }

        let closure_twist = if closed {
            let probe = self.probe(&state.prev_frame, &positions, &planes[n - 1], n - 1)?;
            let closing = state.step(probe, positions[n - 1], naive[0]);
            let residual = wrap_angle(closing.accumulated_angle);
            trace.twist(n - 1, closing.accumulated_angle - state.accumulated_angle, residual);
            residual
        } else {
            0.0
        };

        let spread = closure_twist / segment_count as f64;
        let segments: Vec<SegmentFrame> = (0..segment_count)
            .map(|j| SegmentFrame {
                start: naive[j].rotated(twists[j] - spread * j as f64),
                end: naive[j].rotated(twists[j] - spread * (j + 1) as f64),
                center: (positions[j] + positions[j + 1]) * 0.5,
                twist: twists[j],
            })
            .collect();

        let waypoints: Vec<Frame> = (0..n)
            .map(|i| {
                let frame = waypoint_frame(i, &planes, &directions, &segments, closed);
                trace.frame(i, &frame);
                frame
            })
            .collect();

        log::debug!(
            "path: {} waypoints, length {:.4}, closed {}, twist {:.6}",
            n,
            arc_lengths[n - 1],
            closed,
            state.accumulated_angle
        );

        Ok(PathFrames {
            waypoints,
            planes,
            segments,
            arc_lengths,
            closed,
            closure_twist,
        })
    }

    /// One plane per waypoint. Ends of an open path are perpendicular to
    /// their segment; every other plane bisects its joint.
    fn miter_planes(
        &self,
        positions: &[DVec3],
        directions: &[DVec3],
        closed: bool,
    ) -> Result<Vec<Plane>, PipeError> {
        let n = positions.len();
        let last = directions.len() - 1;

        (0..n)
            .map(|i| -> Result<Plane, PipeError> {
                let normal = match i {
                    0 if closed => self.bisector(directions[last], directions[0], i)?,
                    0 => directions[0],
                    i if i == n - 1 && closed => self.bisector(directions[last], directions[0], i)?,
                    i if i == n - 1 => directions[last],
                    i => self.bisector(directions[i - 1], directions[i], i)?,
                };
                Ok(Plane::new(positions[i], normal))
            })
            .collect()
    }

    fn bisector(&self, incoming: DVec3, outgoing: DVec3, index: usize) -> Result<DVec3, PipeError> {
        (incoming + outgoing)
            .try_normalize()
            .filter(|n| n.dot(outgoing).abs() > self.params.tolerance)
            .ok_or_else(|| PipeError::no_intersection(index))
    }

    /// Projects the twist probe of the segment ending at `joint` onto the
    /// joint's miter plane. The probe lies on a unit circle around the
    /// segment axis at the configured sample index.
    fn probe(
        &self,
        frame: &Frame,
        positions: &[DVec3],
        plane: &Plane,
        joint: usize,
    ) -> Result<DVec3, PipeError> {
        let resolution = self.params.resolution.max(1) as usize;
        let k = self.params.twist_check_index % resolution;
        let angle = TAU * k as f64 / resolution as f64;

        let center = (positions[joint - 1] + positions[joint]) * 0.5;
        let origin = center + frame.basis().direction(angle);
        project_along(plane, origin, frame.forward, self.params.tolerance, joint)
    }
}

/// Moves `point` along `direction` onto `plane`.
pub(crate) fn project_along(
    plane: &Plane,
    point: DVec3,
    direction: DVec3,
    tolerance: f64,
    index: usize,
) -> Result<DVec3, PipeError> {
    if direction.dot(plane.normal).abs() < tolerance {
        return Err(PipeError::no_intersection(index));
    }
    plane
        .intersect_ray(point, direction)
        .ok_or_else(|| PipeError::no_intersection(index))
}

/// Miter frame at waypoint `i`.
fn waypoint_frame(
    i: usize,
    planes: &[Plane],
    directions: &[DVec3],
    segments: &[SegmentFrame],
    closed: bool,
) -> Frame {
    let last = segments.len() - 1;
    let (incoming, outgoing) = match i {
        0 if !closed => return segments[0].start,
        i if i == last + 1 && !closed => return segments[last].end,
        0 => (directions[last], directions[0]),
        i if i == last + 1 => (directions[last], directions[0]),
        i => (directions[i - 1], directions[i]),
    };

    let forward = planes[i].normal;
    // External bisector; undefined on straight joints.
    let up = (incoming - outgoing).try_normalize().unwrap_or_else(|| {
        let carried = segments[i.min(last)].start.up;
        reject(carried, forward).normalize_or_zero()
    });
    Frame::new(forward, up, up.cross(forward))
}

/// Wraps an angle to `(-π, π]`.
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
