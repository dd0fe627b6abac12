//! # Mesh Combiner
//!
//! Concatenates mesh buffers. Triangle indices of the appended buffer are
//! shifted by the destination's pre-append vertex count.
//!
//! A channel only survives if it is populated for every vertex of the
//! result. Appending a buffer without normals to one with normals drops
//! the normal channel for the whole buffer instead of leaving it
//! misaligned. The rule is applied to each channel independently.

use crate::mesh::MeshBuffer;

/// Appends `src` to `dst`.
///
/// # Example
///
/// ```rust
/// use mesh_synth::{combine, MeshBuffer, MeshParts};
/// use glam::DVec3;
///
/// let tri = MeshBuffer::from_parts(MeshParts {
///     positions: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
///     triangles: vec![0, 1, 2],
///     ..Default::default()
/// })
/// .unwrap();
///
/// let mut mesh = tri.clone();
/// combine(&mut mesh, &tri);
/// assert_eq!(mesh.triangles(), &[0, 1, 2, 3, 4, 5]);
/// ```
pub fn combine(dst: &mut MeshBuffer, src: &MeshBuffer) {
    let offset = dst.positions.len() as u32;

    dst.positions.extend_from_slice(&src.positions);
    dst.normals.extend_from_slice(&src.normals);
    for (d, s) in dst.uvs.iter_mut().zip(&src.uvs) {
        d.extend_from_slice(s);
    }
    dst.colors.extend_from_slice(&src.colors);
    dst.extend_triangles(&src.triangles, offset);

    let count = dst.positions.len();
    prune(&mut dst.normals, count, "normals");
    for uv in &mut dst.uvs {
        prune(uv, count, "uv");
    }
    prune(&mut dst.colors, count, "colors");
}

/// Combines a sequence of buffers in order into a fresh buffer.
pub fn combine_all<'a, I>(meshes: I) -> MeshBuffer
where
    I: IntoIterator<Item = &'a MeshBuffer>,
{
    let mut result = MeshBuffer::new();
    for mesh in meshes {
        combine(&mut result, mesh);
    }
    result
}

fn prune<T>(channel: &mut Vec<T>, count: usize, name: &str) {
    if !channel.is_empty() && channel.len() != count {
        log::debug!(
            "combine: dropping {name} channel ({} of {count} vertices)",
            channel.len()
        );
        channel.clear();
    }
}
