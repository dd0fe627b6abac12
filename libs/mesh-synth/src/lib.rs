//! # Mesh Synth
//!
//! Procedural triangle-mesh synthesis for parametric solids and swept pipes.
//!
//! ## Architecture
//!
//! ```text
//! shape params / waypoints
//!        ↓
//! ring (samplers) + path (frame solver)
//!        ↓
//! triangulate + ops::bridge (strips, fans)
//!        ↓
//! MeshBuffer
//! ```
//!
//! ## Modules
//!
//! - [`mesh`]: the attribute-channel buffer every generator returns
//! - [`triangulate`]: the ring-grid index scheme and its winding rule
//! - [`ring`]: circle and arc sampling, ring stacking
//! - [`primitives`]: cylinder, sphere, capsule, torus, boxes, helix, ...
//! - [`ops`]: combining, bridging, capping and parallel batches
//! - [`path`]: frame solving and pipe sweeping
//!
//! All math is `f64`; the buffer exposes `f32` views for upload.
//!
//! ## Usage
//!
//! ```rust
//! use mesh_synth::primitives::{generate_cylinder, CylinderParams};
//! use mesh_synth::path::{generate_pipe, OrientedWaypoint, PipeParams};
//! use mesh_synth::combine;
//! use glam::DVec3;
//!
//! let mut scene = generate_cylinder(&CylinderParams::new(1.0, 2.0, 8, 2));
//! let path = [
//!     OrientedWaypoint::at(DVec3::new(0.0, 1.0, 0.0)),
//!     OrientedWaypoint::at(DVec3::new(0.0, 3.0, 0.0)),
//! ];
//! let pipe = generate_pipe(&path, &PipeParams::new(0.2, 8)).unwrap();
//! combine(&mut scene, &pipe);
//! assert!(scene.validate().is_ok());
//! ```

pub mod error;
pub mod math;
pub mod mesh;
pub mod ops;
pub mod path;
pub mod primitives;
pub mod ring;
pub mod triangulate;

pub use error::{MeshError, PipeError};
pub use math::Plane;
pub use mesh::{Color, MeshBuffer, MeshParts};
pub use ops::{combine, combine_all};
pub use path::{generate_pipe, OrientedWaypoint, PipeParams};
pub use ring::{arc_points, circle_points, rings_to_mesh, PointSample, Ring, RingBasis};
pub use triangulate::triangulate;
