//! # Mesh Errors
//!
//! Error types for mesh synthesis.
//!
//! ## Error Policy
//!
//! - Primitive generators are total over numeric input and never fail
//! - Hand-assembled buffers that break the channel invariant are rejected
//! - The pipe generator reports numerically degenerate paths

use thiserror::Error;

/// Errors raised when a buffer would violate the channel invariant.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A non-empty attribute channel does not match the position count.
    #[error("Channel '{channel}' has {len} entries, expected {expected}")]
    ChannelLengthMismatch {
        /// Name of the offending channel
        channel: &'static str,
        /// Actual number of entries
        len: usize,
        /// Number of positions in the buffer
        expected: usize,
    },

    /// A triangle references a vertex that does not exist.
    #[error("Triangle index out of range: {index} (vertex count: {vertex_count})")]
    IndexOutOfRange {
        /// The offending index
        index: u32,
        /// Number of positions in the buffer
        vertex_count: usize,
    },

    /// The triangle list length is not a multiple of three.
    #[error("Triangle list length {len} is not a multiple of 3")]
    IncompleteTriangle {
        /// Length of the triangle list
        len: usize,
    },

    /// A UV channel outside the supported range was requested.
    #[error("UV channel {channel} out of range (max: {max})")]
    InvalidUvChannel {
        /// Requested channel
        channel: usize,
        /// Highest valid channel
        max: usize,
    },
}

impl MeshError {
    /// Creates a channel length mismatch error.
    pub fn channel_mismatch(channel: &'static str, len: usize, expected: usize) -> Self {
        Self::ChannelLengthMismatch {
            channel,
            len,
            expected,
        }
    }
}

/// Errors reported by the path-swept pipe generator.
///
/// ## Example
///
/// ```rust
/// use mesh_synth::PipeError;
///
/// let err = PipeError::NoIntersection { waypoint_index: 3 };
/// assert_eq!(err.to_string(), "No intersection found at path index 3");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipeError {
    /// The path does not contain enough waypoints to form a segment.
    #[error("Path requires at least 2 waypoints, got {len}")]
    PathTooShort {
        /// Number of supplied waypoints
        len: usize,
    },

    /// A waypoint position has a NaN or infinite component.
    #[error("Waypoint {waypoint_index} has a non-finite position")]
    NonFiniteWaypoint {
        /// Index of the offending waypoint
        waypoint_index: usize,
    },

    /// Two consecutive waypoints share a position, so the segment has no
    /// direction.
    #[error("Waypoints {waypoint_index} and {} coincide", waypoint_index + 1)]
    CoincidentWaypoints {
        /// Index of the first waypoint of the zero-length segment
        waypoint_index: usize,
    },

    /// A cross-section ray ran parallel to a miter plane.
    ///
    /// The caller should adjust the waypoints around this index and retry.
    #[error("No intersection found at path index {waypoint_index}")]
    NoIntersection {
        /// Index of the waypoint whose plane could not be hit
        waypoint_index: usize,
    },
}

impl PipeError {
    /// Creates a no-intersection error for a waypoint.
    pub fn no_intersection(waypoint_index: usize) -> Self {
        Self::NoIntersection { waypoint_index }
    }
}
