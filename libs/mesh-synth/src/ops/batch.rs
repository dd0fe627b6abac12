//! # Batch Generation
//!
//! Builds independent meshes on the rayon thread pool and folds them into
//! one buffer. Every builder call owns its output, so no buffer is shared
//! between workers; the fold combines results in input order.

use rayon::prelude::*;

use crate::mesh::MeshBuffer;
use crate::ops::combine;

/// Builds one mesh per item in parallel and combines them in input order.
///
/// # Example
///
/// ```rust
/// use mesh_synth::ops::build_parallel;
/// use mesh_synth::primitives::{generate_sphere, SphereParams};
///
/// let spheres: Vec<SphereParams> = (1..=4).map(|i| SphereParams::new(i as f64, 8, false)).collect();
/// let mesh = build_parallel(&spheres, generate_sphere);
/// assert_eq!(mesh.vertex_count(), 4 * generate_sphere(&spheres[0]).vertex_count());
/// ```
pub fn build_parallel<T, F>(items: &[T], build: F) -> MeshBuffer
where
    T: Sync,
    F: Fn(&T) -> MeshBuffer + Sync + Send,
{
    items
        .par_iter()
        .map(|item| build(item))
        .reduce(MeshBuffer::new, |mut acc, mesh| {
            combine(&mut acc, &mesh);
            acc
        })
}

/// Fallible variant of [`build_parallel`].
///
/// # Errors
///
/// Returns the error of the first failing item, in input order.
pub fn try_build_parallel<T, E, F>(items: &[T], build: F) -> Result<MeshBuffer, E>
where
    T: Sync,
    E: Send,
    F: Fn(&T) -> Result<MeshBuffer, E> + Sync + Send,
{
    let results: Vec<Result<MeshBuffer, E>> = items.par_iter().map(|item| build(item)).collect();
    let meshes = results.into_iter().collect::<Result<Vec<_>, E>>()?;
    log::debug!("batch: built {} meshes", meshes.len());
    Ok(crate::ops::combine_all(&meshes))
}
