//! # Configuration Constants
//!
//! Centralized constants for the mesh synthesis kernel. Every tolerance,
//! resolution default and threshold used by the generators lives here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Default tessellation parameters
//! - **Frames**: Path frame propagation thresholds
//! - **Channels**: Vertex attribute layout

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance below which a ray is treated as parallel to a plane.
///
/// Ray/plane intersections whose direction has a smaller dot product with
/// the plane normal report "no intersection" instead of producing huge
/// parameters.
///
/// # Example
///
/// ```rust
/// use config::constants::PARALLEL_EPSILON;
/// assert!(PARALLEL_EPSILON < 1e-6);
/// ```
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// Distance under which the first and last sample of a ring are considered
/// the same point (a closed ring).
///
/// # Example
///
/// ```rust
/// use config::constants::RING_CLOSURE_EPSILON;
/// assert_eq!(RING_CLOSURE_EPSILON, 1e-4);
/// ```
pub const RING_CLOSURE_EPSILON: f64 = 1e-4;

/// Distance under which the first and last waypoint of a path close a loop.
pub const LOOP_CLOSURE_EPSILON: f64 = 1e-4;

/// Minimum number of waypoints (including the repeated closing waypoint)
/// for a path to be treated as a closed loop.
pub const MIN_LOOP_WAYPOINTS: usize = 4;

/// Minimum distance between consecutive path waypoints.
///
/// Shorter segments have no usable direction and are rejected.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-8;

/// Area under which a triangle counts as degenerate in validation reports.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default number of segments around circular cross-sections.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_RESOLUTION;
/// assert!(DEFAULT_RESOLUTION >= 3);
/// ```
pub const DEFAULT_RESOLUTION: u32 = 16;

/// Default number of rings stacked along a cylinder body.
pub const DEFAULT_HEIGHT_RESOLUTION: u32 = 2;

/// Default number of segments per rounded corner arc.
pub const DEFAULT_CORNER_RESOLUTION: u32 = 4;

/// Minimum segment count that still encloses area.
pub const MIN_RESOLUTION: u32 = 3;

// =============================================================================
// FRAME CONSTANTS
// =============================================================================

/// Absolute dot product between the world up axis and a path direction above
/// which the direction is considered near-vertical (gimbal lock).
///
/// # Example
///
/// ```rust
/// use config::constants::GIMBAL_DOT_THRESHOLD;
/// let forward_dot_up: f64 = 0.99;
/// assert!(forward_dot_up.abs() > GIMBAL_DOT_THRESHOLD);
/// ```
pub const GIMBAL_DOT_THRESHOLD: f64 = 0.95;

/// Ring sample used to measure twist between adjacent pipe segments.
pub const DEFAULT_TWIST_CHECK_INDEX: usize = 0;

// =============================================================================
// CHANNEL CONSTANTS
// =============================================================================

/// Number of UV channels carried by a mesh buffer.
pub const UV_CHANNEL_COUNT: usize = 3;

/// Default vertex color (light gray).
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

// =============================================================================
// GLOBAL CONFIGURATION
// =============================================================================

/// Immutable snapshot of kernel configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Numeric tolerance propagated into geometry kernels.
    pub tolerance: f64,
    /// Default segment count for circular cross-sections.
    pub default_resolution: u32,
    /// Gimbal-lock threshold used when deriving path frames.
    pub gimbal_threshold: f64,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6, 24, 0.9).expect("valid config");
    /// assert_eq!(cfg.default_resolution, 24);
    /// ```
    pub fn new(
        tolerance: f64,
        default_resolution: u32,
        gimbal_threshold: f64,
    ) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if default_resolution < MIN_RESOLUTION {
            return Err(ConfigError::InvalidResolution(default_resolution));
        }
        if !(gimbal_threshold > 0.0 && gimbal_threshold < 1.0) {
            return Err(ConfigError::InvalidGimbalThreshold(gimbal_threshold));
        }
        Ok(Self {
            tolerance,
            default_resolution,
            gimbal_threshold,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: PARALLEL_EPSILON,
            default_resolution: DEFAULT_RESOLUTION,
            gimbal_threshold: GIMBAL_DOT_THRESHOLD,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the requested resolution is too small to form a polygon.
    InvalidResolution(u32),
    /// Raised when the gimbal threshold is outside the open interval (0, 1).
    InvalidGimbalThreshold(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidResolution(value) => {
                write!(f, "default_resolution must be >= {MIN_RESOLUTION}: {value}")
            }
            ConfigError::InvalidGimbalThreshold(value) => {
                write!(f, "gimbal_threshold must be in (0, 1): {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
