//! # Config Crate
//!
//! Centralized configuration constants for the mesh synthesis kernel.
//! All tolerances, default resolutions and tunable thresholds are defined
//! here so that generators never scatter literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_RESOLUTION, RING_CLOSURE_EPSILON};
//!
//! // Ring seams are compared with RING_CLOSURE_EPSILON
//! let seam_gap: f64 = 0.00001;
//! assert!(seam_gap < RING_CLOSURE_EPSILON);
//!
//! // Resolution defaults for tessellation
//! let requested = 0;
//! let loops = if requested > 0 { requested } else { DEFAULT_RESOLUTION };
//! assert_eq!(loops, DEFAULT_RESOLUTION);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Engine-Agnostic**: No engine or platform specific values
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
