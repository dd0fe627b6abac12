//! # Pipe Generator
//!
//! Sweeps a circular cross-section along a polyline.
//!
//! ## Algorithm
//!
//! 1. Solve miter planes and twist-corrected frames ([`PathFrameSolver`])
//! 2. For every segment, sample a circle around the segment midpoint and
//!    project it along the segment onto the start and end miter planes
//! 3. Assemble the `2 * (waypoints - 1)` rings, either as one smooth grid
//!    or as flat-shaded per-segment bridges
//! 4. Close open paths with fan caps
//!
//! ## Texture Coordinates
//!
//! - `uv0`: U is the normalized arc length, V runs around the ring
//! - `uv1`: U scaled by `length / circumference` so tiling stays square


use std::f64::consts::TAU;

use config::constants::{
    approx_zero, GlobalConfig, DEFAULT_RESOLUTION, DEFAULT_TWIST_CHECK_INDEX, GIMBAL_DOT_THRESHOLD,
    PARALLEL_EPSILON,
};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::frame::{project_along, PathFrameSolver, PathFrames};
use super::trace::{FrameTrace, LogTrace};
use super::OrientedWaypoint;
use crate::error::PipeError;
use crate::mesh::MeshBuffer;
use crate::ops::{bridge_hard, combine, fan};
use crate::ring::{circle_points, rings_to_mesh, PointSample, Ring};

/// Parameters for [`generate_pipe`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeParams {
    /// Cross-section radius
    pub radius: f64,
    /// Segments around the cross-section
    pub resolution: u32,
    /// Derive the reference axes from `world_up`/`world_right` instead of
    /// the first waypoint's rotation
    pub update_orientations: bool,
    /// Flat-shade every segment instead of sharing ring vertices
    pub hard_normals: bool,
    /// Ring sample used to measure twist at each joint
    pub twist_check_index: usize,
    /// World up reference
    pub world_up: DVec3,
    /// World right reference, used when a segment runs along `world_up`
    pub world_right: DVec3,
    /// Minimum `|direction · normal|` for a miter projection
    pub tolerance: f64,
    /// Absolute cosine above which a segment counts as parallel to up
    pub gimbal_threshold: f64,
}

impl Default for PipeParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            resolution: DEFAULT_RESOLUTION,
            update_orientations: true,
            hard_normals: false,
            twist_check_index: DEFAULT_TWIST_CHECK_INDEX,
            world_up: DVec3::Y,
            world_right: DVec3::X,
            tolerance: PARALLEL_EPSILON,
            gimbal_threshold: GIMBAL_DOT_THRESHOLD,
        }
    }
}

impl PipeParams {
    /// Creates parameters with the given radius and resolution.
    pub fn new(radius: f64, resolution: u32) -> Self {
        Self {
            radius,
            resolution,
            ..Self::default()
        }
    }

    /// Takes resolution and tolerances from a validated configuration.
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self {
            resolution: config.default_resolution,
            tolerance: config.tolerance,
            gimbal_threshold: config.gimbal_threshold,
            ..Self::default()
        }
    }
}

/// Generates a pipe along `path`.
///
/// Intermediate frames, rings and twist values go to `log::trace!`.
///
/// # Errors
///
/// See [`PathFrameSolver::solve`].
///
/// # Example
///
/// ```rust
/// use mesh_synth::path::{generate_pipe, OrientedWaypoint, PipeParams};
/// use glam::DVec3;
///
/// let path = [
///     OrientedWaypoint::at(DVec3::ZERO),
///     OrientedWaypoint::at(DVec3::new(0.0, 0.0, 4.0)),
///     OrientedWaypoint::at(DVec3::new(3.0, 0.0, 4.0)),
/// ];
/// let pipe = generate_pipe(&path, &PipeParams::new(0.25, 8)).unwrap();
/// // Four rings of nine samples plus two caps.
/// assert_eq!(pipe.vertex_count(), 4 * 9 + 2 * 10);
/// ```
pub fn generate_pipe(path: &[OrientedWaypoint], params: &PipeParams) -> Result<MeshBuffer, PipeError> {
    generate_pipe_traced(path, params, &mut LogTrace)
}

/// [`generate_pipe`] with a custom trace.
pub fn generate_pipe_traced(
    path: &[OrientedWaypoint],
    params: &PipeParams,
    trace: &mut impl FrameTrace,
) -> Result<MeshBuffer, PipeError> {
    let frames = PathFrameSolver::new(*params).solve(path, trace)?;
    let rings = segment_rings(params, &frames)?;
    for (i, ring) in rings.iter().enumerate() {
        trace.ring(i, ring);
    }

    let mut mesh = if params.hard_normals {
        hard_body(&rings, &frames)
    } else {
        rings_to_mesh(&rings, false)
    };

    if !frames.closed {
        if let (Some(first), Some(last)) = (rings.first(), rings.last()) {
            let start = &frames.segments[0];
            let end = &frames.segments[frames.segments.len() - 1];
            let start_cap = fan(
                &first.reversed().positions(),
                path[0].position,
                DVec2::new(0.0, 0.5),
                Some(-start.direction()),
                false,
                false,
            );
            let end_cap = fan(
                &last.positions(),
                path[path.len() - 1].position,
                DVec2::new(1.0, 0.5),
                Some(end.direction()),
                false,
                false,
            );
            combine(&mut mesh, &start_cap);
            combine(&mut mesh, &end_cap);
        }
    }

    fill_scaled_uvs(&mut mesh, frames.total_length(), TAU * params.radius);

    log::debug!(
        "pipe: {} rings, {} vertices, {} triangles",
        rings.len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Two rings per segment, projected onto the segment's miter planes.
fn segment_rings(params: &PipeParams, frames: &PathFrames) -> Result<Vec<Ring>, PipeError> {
    let total = frames.total_length();
    let u = |i: usize| {
        if approx_zero(total) {
            0.0
        } else {
            frames.arc_lengths[i] / total
        }
    };

    let mut rings = Vec::with_capacity(2 * frames.segments.len());
    for (j, segment) in frames.segments.iter().enumerate() {
        let direction = segment.direction();
        for (index, frame) in [(j, &segment.start), (j + 1, &segment.end)] {
            let circle = circle_points(params.radius, segment.center, params.resolution, frame.basis());
            let samples = circle
                .samples()
                .iter()
                .map(|s| -> Result<PointSample, PipeError> {
                    let position = project_along(
                        &frames.planes[index],
                        s.position,
                        direction,
                        params.tolerance,
                        index,
                    )?;
                    Ok(PointSample {
                        position,
                        uv: DVec2::new(u(index), s.uv.y),
                        normal: s.normal,
                    })
                })
                .collect::<Result<Vec<_>, PipeError>>()?;
            rings.push(Ring::new(samples));
        }
    }
    Ok(rings)
}

/// Flat-shaded body: one hard bridge per segment, U remapped to the
/// segment's arc-length interval.
fn hard_body(rings: &[Ring], frames: &PathFrames) -> MeshBuffer {
    let mut mesh = MeshBuffer::new();
    for pair in rings.chunks_exact(2) {
        let (start, end) = (&pair[0], &pair[1]);
        let u0 = start.samples().first().map_or(0.0, |s| s.uv.x);
        let u1 = end.samples().first().map_or(0.0, |s| s.uv.x);

        let mut strip = bridge_hard(&start.positions(), &end.positions(), false, false, false);
        for uv in &mut strip.uvs[0] {
            uv.x = u0 + (u1 - u0) * uv.x;
        }
        combine(&mut mesh, &strip);
    }
    log::trace!("pipe: {} hard segments", frames.segments.len());
    mesh
}

/// Fills `uv1` from `uv0`, stretching U to the physical aspect ratio.
fn fill_scaled_uvs(mesh: &mut MeshBuffer, length: f64, circumference: f64) {
    let scale = if approx_zero(circumference) {
        0.0
    } else {
        length / circumference
    };
    mesh.uvs[1] = mesh.uvs[0]
        .iter()
        .map(|uv| DVec2::new(uv.x * scale, uv.y))
        .collect();
}
