//! # Mesh Operations
//!
//! Buffer combination, ring bridging and capping, and parallel batch
//! generation.

pub mod batch;
pub mod bridge;
pub mod combine;

pub use batch::{build_parallel, try_build_parallel};
pub use bridge::{bridge_chain, bridge_hard, bridge_soft, fan};
pub use combine::{combine, combine_all};
